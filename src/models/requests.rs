//! Request DTOs for the relay API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string of `GET /api/image-proxy`
///
/// `url` is optional here so a missing parameter reaches the handler and is
/// reported in the relay's own JSON error shape rather than axum's rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyQuery {
    /// Target image URL, percent-decoded
    #[serde(default)]
    pub url: Option<String>,
}
