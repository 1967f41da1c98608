//! API Module
//!
//! HTTP handlers and routing for the image relay.
//!
//! # Endpoints
//! - `GET /api/image-proxy?url=` - Relay a remote image through the cache
//! - `GET /api/health` - Health check endpoint
//! - `GET /api/stats` - Cache statistics
//! - `POST /api/clear-cache` - Drop every cached image

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{cors_headers, create_router};
