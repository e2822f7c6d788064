//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::store::KeyValueStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// Expired keys are removed from the store and from the recency order under
/// the cache's write lock, so idle caches do not keep dead entries around.
///
/// The task only holds a weak reference: it stops by itself once every
/// [`SharedCache`] handle has been dropped. The returned `JoinHandle` can
/// also be used to abort it earlier.
///
/// # Arguments
/// * `cache` - Cache to sweep
/// * `interval` - Time between sweeps
///
/// # Example
/// ```ignore
/// let cache = SharedCache::with_store(MemoryStore::<String>::new(), 1000)?;
/// let cleanup_handle = spawn_cleanup_task(&cache, Duration::from_secs(1));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task<S>(cache: &SharedCache<S>, interval: Duration) -> JoinHandle<()>
where
    S: KeyValueStore + Send + Sync + 'static,
{
    let cache = cache.downgrade();

    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let Some(inner) = cache.upgrade() else {
                info!("Cache dropped, stopping TTL cleanup task");
                break;
            };

            let result = {
                let mut cache_guard = inner.write().await;
                cache_guard
                    .purge_expired()
                    .map(|removed| (removed, cache_guard.stats()))
            };

            match result {
                Ok((removed, stats)) if removed > 0 => info!(
                    "TTL cleanup: removed {} expired entries ({} live, hit rate {:.2})",
                    removed,
                    stats.total_entries,
                    stats.hit_rate()
                ),
                Ok(_) => debug!("TTL cleanup: no expired entries found"),
                Err(err) => warn!("TTL cleanup failed: {}", err),
            }
        }
    })
}
