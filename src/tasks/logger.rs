//! Notification Logger Task
//!
//! A built-in subscriber that writes every cache lifecycle event to the log.

use tokio::sync::broadcast::{error::RecvError, Receiver};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheEvent;

/// Spawns a task logging events from `events` until the channel closes.
///
/// Lagging never stops the logger; skipped events are reported and the task
/// carries on with the newest ones.
pub fn spawn_notification_logger(mut events: Receiver<CacheEvent>) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut logged = 0u64;
        loop {
            match events.recv().await {
                Ok(event) => {
                    log_event(&event);
                    logged += 1;
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!(logged, "Notification logger stopped");
        logged
    })
}

fn log_event(event: &CacheEvent) {
    match event {
        CacheEvent::Added { key, at } => debug!(%key, %at, "item added"),
        CacheEvent::Updated { key, at } => debug!(%key, %at, "item updated"),
        CacheEvent::Evicted { key, at } => debug!(%key, %at, "item evicted"),
        CacheEvent::Invalidated {
            operation,
            removed,
            at,
        } => info!(%operation, removed, %at, "cache invalidated"),
    }
}
