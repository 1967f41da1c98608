//! Response DTOs for the relay API
//!
//! Defines the JSON bodies the relay writes back.

use serde::Serialize;

use crate::cache::CacheStats;

/// Body of a 500 response when neither the origin nor the fallback proxy
/// produced the image.
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailureResponse {
    /// Short summary
    pub error: String,
    /// Detail of the last upstream failure
    pub message: String,
    /// The target URL exactly as requested
    pub url: String,
}

impl FetchFailureResponse {
    pub fn new(
        error: impl Into<String>,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            url: url.into(),
        }
    }
}

/// Response body for `GET /api/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Whether images are cached across requests
    pub cache_enabled: bool,
    /// Images currently cached
    pub cache_entries: usize,
    /// Cache capacity
    pub max_entries: usize,
}

impl HealthResponse {
    /// Creates a healthy response stamped with the current time
    pub fn healthy(cache_enabled: bool, cache_entries: usize, max_entries: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache_enabled,
            cache_entries,
            max_entries,
        }
    }
}

/// Response body for `GET /api/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for `POST /api/clear-cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    /// Number of images dropped
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached image(s)", cleared),
            cleared,
        }
    }
}

/// Error response body for simple error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
