//! Cache Entry Module
//!
//! Defines a cached image payload with the metadata needed for expiry.

use std::time::{Duration, Instant};

use bytes::Bytes;

/// Content type assumed when the upstream response does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

// == Cache Entry ==
/// A fetched image held in the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Raw image bytes
    pub payload: Bytes,
    /// MIME type reported by the upstream
    pub content_type: String,
    /// Insertion time on the monotonic clock
    pub stored_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            payload,
            content_type: content_type.into(),
            stored_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is at least `ttl_secs` old.
    ///
    /// Boundary condition: an entry whose age equals the TTL is already
    /// expired, so a stale payload is never served on the last millisecond.
    pub fn is_expired(&self, ttl_secs: u64) -> bool {
        self.is_expired_at(ttl_secs, Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit clock reading.
    pub fn is_expired_at(&self, ttl_secs: u64, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= Duration::from_secs(ttl_secs)
    }
}
