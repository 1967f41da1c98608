//! Error types for the image relay
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::{ErrorResponse, FetchFailureResponse};

// == Fetch Error Enum ==
/// Failure of a single outbound fetch attempt.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(StatusCode),

    /// Connection, timeout or body read failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Upstream status code, when the upstream answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status(status) => Some(*status),
            FetchError::Transport(err) => err.status(),
        }
    }
}

// == Proxy Error Enum ==
/// Unified error type for the relay endpoints.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing or invalid request input
    #[error("{0}")]
    BadRequest(String),

    /// Both the direct fetch and the fallback proxy failed
    #[error("Failed to fetch image: {message}")]
    FetchFailure {
        /// The target URL exactly as the caller sent it
        url: String,
        /// Status reported by the last upstream, if any
        status: Option<u16>,
        /// Human-readable detail of the last failure
        message: String,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Builds a `FetchFailure` for `url` from the final fetch attempt's error.
    pub fn fetch_failure(url: impl Into<String>, err: &FetchError) -> Self {
        ProxyError::FetchFailure {
            url: url.into(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::FetchFailure { .. } | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ProxyError::BadRequest(msg) => (status, Json(ErrorResponse::new(msg))).into_response(),
            ProxyError::FetchFailure { url, message, .. } => {
                let body = FetchFailureResponse::new("Failed to fetch image", message, url);
                (status, Json(body)).into_response()
            }
            ProxyError::Internal(msg) => (
                status,
                Json(json!({
                    "error": "Internal error",
                    "message": msg
                })),
            )
                .into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the relay.
pub type Result<T> = std::result::Result<T, ProxyError>;
