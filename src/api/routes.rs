//! API Routes
//!
//! Configures the Axum router with all relay endpoints.

use std::any::Any;

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    clear_cache_handler, health_handler, image_proxy_handler, preflight_handler, stats_handler,
    AppState,
};
use crate::error::ProxyError;

/// Cross-origin headers attached to every relay response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ),
    ]
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/image-proxy?url=` - Relay a remote image
/// - `OPTIONS /api/image-proxy` - CORS preflight
/// - `GET /api/health` - Health check with cache occupancy
/// - `GET /api/stats` - Cache statistics
/// - `POST /api/clear-cache` - Drop every cached image
///
/// # Middleware
/// - Panics become the JSON 500 error shape
/// - CORS headers on every response, errors included
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(
            "/api/image-proxy",
            get(image_proxy_handler).options(preflight_handler),
        )
        .route("/api/health", get(health_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/clear-cache", post(clear_cache_handler))
        .layer(CatchPanicLayer::custom(handle_panic));

    for (name, value) in cors_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("request handler panicked: {}", detail);
    ProxyError::Internal(detail).into_response()
}
