//! Request and Response models for the relay API
//!
//! This module defines the DTOs used for query strings and JSON bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ProxyQuery;
pub use responses::{
    ClearCacheResponse, ErrorResponse, FetchFailureResponse, HealthResponse, StatsResponse,
};
