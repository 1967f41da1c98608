//! Cache Module
//!
//! In-memory image cache with TTL expiration and FIFO eviction.

mod entry;
mod fifo;
mod stats;
mod store;


use std::sync::Arc;
use tokio::sync::RwLock;

// Re-export public types
pub use entry::{CacheEntry, DEFAULT_CONTENT_TYPE};
pub use fifo::InsertionOrder;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache store shared between request handlers and the expiry sweep.
pub type SharedCache = Arc<RwLock<CacheStore>>;
