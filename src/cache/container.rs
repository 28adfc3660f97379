//! Cache Container Module
//!
//! Policy layer over the expiring store: gates writes by prefix rules,
//! raises lifecycle notifications, and wipes the cache when an invalidating
//! operation is observed.

use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::cache::{CacheEvent, CacheStats, ExpiringStore, Lookup, Notifier, RuleSet, Upsert};

// == Cache Container ==
/// Thread-safe, explicitly owned cache instance.
///
/// Share it with `Arc<CacheContainer<V>>`. Every operation takes the store
/// lock once, so entries are never observed half-written and invalidation
/// clears the whole key space in one step. Notifications are emitted after
/// the lock is released.
#[derive(Debug)]
pub struct CacheContainer<V> {
    rules: RuleSet,
    store: RwLock<ExpiringStore<V>>,
    notifier: Notifier,
}

impl<V: Clone> CacheContainer<V> {
    // == Constructor ==
    /// Creates a container with the given rules and a default notifier.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_notifier(rules, Notifier::default())
    }

    pub fn with_notifier(rules: RuleSet, notifier: Notifier) -> Self {
        Self {
            rules,
            store: RwLock::new(ExpiringStore::new()),
            notifier,
        }
    }

    /// Returns true iff `identifier` starts with a cacheable prefix.
    pub fn is_cacheable(&self, identifier: &str) -> bool {
        self.rules.is_cacheable(identifier)
    }

    /// Registers an observer for added, updated, evicted and invalidated events.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.notifier.subscribe()
    }

    // == Try Add ==
    /// Stores `value` under `key` with a sliding expiration.
    ///
    /// The key itself is the gating identifier: it must start with a
    /// cacheable prefix. Returns false, without touching the store, when the
    /// key is not cacheable, is empty, or `value` is None. Otherwise a live
    /// entry is overwritten (emitting `Updated`) or a new one is inserted
    /// (emitting `Added`); an expired, not yet swept entry counts as absent.
    pub fn try_add(&self, key: &str, value: Option<V>, sliding: Duration) -> bool {
        self.add(key, value, sliding, None)
    }

    // == Try Add If Generation ==
    /// Like [`try_add`](Self::try_add), but refuses the write if the cache
    /// was invalidated since `generation` was read.
    ///
    /// Use it to store a result computed after a miss, so that a value read
    /// before an invalidation cannot leak into the cleared cache.
    pub fn try_add_if_generation(
        &self,
        key: &str,
        value: Option<V>,
        sliding: Duration,
        generation: u64,
    ) -> bool {
        self.add(key, value, sliding, Some(generation))
    }

    /// Current cache generation; advanced by every invalidation.
    pub fn generation(&self) -> u64 {
        self.store.read().generation()
    }

    fn add(&self, key: &str, value: Option<V>, sliding: Duration, generation: Option<u64>) -> bool {
        if !self.rules.is_cacheable(key) {
            return false;
        }
        let value = match value {
            Some(value) if !key.is_empty() => value,
            _ => return false,
        };

        let outcome = {
            let mut store = self.store.write();
            if generation.map_or(false, |g| g != store.generation()) {
                debug!(key, "Dropped write from an invalidated generation");
                return false;
            }
            store.upsert(key, value, sliding)
        };

        match outcome {
            Upsert::Added => {
                debug!(key, ?sliding, "Cache entry added");
                self.notifier.emit(CacheEvent::added(key));
            }
            Upsert::Updated => {
                debug!(key, ?sliding, "Cache entry updated");
                self.notifier.emit(CacheEvent::updated(key));
            }
        }
        true
    }

    // == Try Get ==
    /// Looks up `key`, restarting its sliding window on a hit.
    ///
    /// Empty keys, unknown keys and expired entries are misses. Reads never
    /// notify; expired entries are evicted by [`sweep_expired`](Self::sweep_expired).
    pub fn try_get(&self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }

        match self.store.write().get(key) {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss | Lookup::Expired => None,
        }
    }

    // == Invalidate If Needed ==
    /// Clears the whole cache if `operation` starts with an invalidating prefix.
    ///
    /// Returns true if an invalidation happened.
    pub fn invalidate_if_needed(&self, operation: &str) -> bool {
        let Some(prefix) = self.rules.invalidating_match(operation) else {
            return false;
        };

        let removed = self.store.write().clear();
        info!(operation, prefix, removed, "Cache invalidated");
        self.notifier
            .emit(CacheEvent::invalidated(operation, removed));
        true
    }

    // == Sweep Expired ==
    /// Evicts every entry whose window has elapsed, emitting one `Evicted`
    /// notification per key. Returns the number of evicted entries.
    pub fn sweep_expired(&self) -> usize {
        let evicted = self.store.write().drain_expired();
        let count = evicted.len();
        self.notifier
            .emit_all(evicted.into_iter().map(CacheEvent::evicted));
        count
    }

    // == Introspection ==
    /// Checks for a live entry without restarting its window.
    pub fn contains(&self, key: &str) -> bool {
        self.store.read().contains_live(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.store.read().keys()
    }

    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }
}
