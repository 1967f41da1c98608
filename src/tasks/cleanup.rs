//! Expiry Sweep Task
//!
//! Background task that periodically drops stale images so their bytes do
//! not linger until the key is requested again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that removes expired images every `cleanup_interval_secs`.
///
/// Returns the task handle so shutdown can abort it. An interval of 0 is
/// treated as 1 second.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::new(100, 1800)));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} stale images", removed);
            } else {
                debug!("Expiry sweep: no stale images found");
            }
        }
    })
}
