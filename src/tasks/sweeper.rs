//! Expiration Sweeper Task
//!
//! Background task that periodically evicts expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheContainer;

/// Spawns a background task that periodically evicts expired entries.
///
/// Each pass takes the container's write lock once and emits an `Evicted`
/// notification per removed key. Reads and writes also evict lazily, so the
/// sweeper only bounds how long an untouched expired entry lingers.
///
/// # Arguments
/// * `cache` - Shared cache container
/// * `interval` - Time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheContainer::<String>::new(rules));
/// let sweeper = spawn_expiration_sweeper(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_expiration_sweeper<V>(cache: Arc<CacheContainer<V>>, interval: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiration sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let evicted = cache.sweep_expired();
            if evicted > 0 {
                info!("Expiration sweep: evicted {} entries", evicted);
            } else {
                debug!("Expiration sweep: no expired entries found");
            }
        }
    })
}
