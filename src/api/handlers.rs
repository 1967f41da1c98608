//! API Handlers
//!
//! HTTP request handlers for each relay endpoint, plus the per-invocation
//! adapter for hosts that run one request per process.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::routes::cors_headers;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{ClearCacheResponse, HealthResponse, ProxyQuery, StatsResponse};
use crate::relay::{ImageRelay, RelayedImage};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-then-fetch pipeline; cheap to clone
    pub relay: ImageRelay,
}

impl AppState {
    pub fn new(relay: ImageRelay) -> Self {
        Self { relay }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ImageRelay::from_config(config)?))
    }
}

/// Handler for GET /api/image-proxy?url=...
///
/// Serves the target image from the cache or upstream with `X-Cache` set
/// to `HIT` or `MISS`.
pub async fn image_proxy_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProxyQuery>, QueryRejection>,
) -> Result<RelayedImage> {
    let Query(query) = query.map_err(|e| ProxyError::BadRequest(e.body_text()))?;
    state.relay.relay(query.url.as_deref()).await
}

/// Handler for OPTIONS /api/image-proxy
///
/// Bare 200; the CORS headers are added by the router.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

/// Handler for GET /api/health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.relay.cache() {
        Some(cache) => {
            let cache = cache.read().await;
            HealthResponse::healthy(true, cache.len(), cache.max_entries())
        }
        None => HealthResponse::healthy(false, 0, 0),
    };

    Json(response)
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = match state.relay.cache() {
        Some(cache) => cache.read().await.stats(),
        None => Default::default(),
    };

    Json(StatsResponse::from(stats))
}

/// Handler for POST /api/clear-cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = match state.relay.cache() {
        Some(cache) => cache.write().await.clear(),
        None => 0,
    };

    tracing::info!("Cleared {} cached image(s)", cleared);
    Json(ClearCacheResponse::new(cleared))
}

// == Per-Invocation Adapter ==
/// Serves a single image-proxy request without any state shared across
/// invocations.
///
/// Nothing is cached, so every successful answer is a `MISS`. The response
/// carries the same CORS headers as the server route.
pub async fn handle_invocation(config: &Config, method: &Method, uri: &Uri) -> Response {
    let mut response = if *method == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        invoke(config, uri).await.into_response()
    };

    response.headers_mut().extend(cors_headers());
    response
}

async fn invoke(config: &Config, uri: &Uri) -> Result<RelayedImage> {
    let Query(query) = Query::<ProxyQuery>::try_from_uri(uri)
        .map_err(|e| ProxyError::BadRequest(e.body_text()))?;

    let relay = ImageRelay::from_config(&Config {
        stateless: true,
        ..config.clone()
    })?;
    relay.relay(query.url.as_deref()).await
}
