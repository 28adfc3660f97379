//! Expiring Store Module
//!
//! Keyed storage where every entry carries a sliding expiration window.
//! The store is single-threaded; `CacheContainer` owns it behind a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == Lookup ==
/// Result of reading a key from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Live entry; its window has been restarted
    Hit(V),
    /// No entry under the key
    Miss,
    /// The entry's window has elapsed; it stays until the next sweep
    Expired,
}

// == Upsert ==
/// What a write did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Added,
    Updated,
}

// == Expiring Store ==
/// Key-value storage with sliding expiration.
///
/// Expired entries are only removed by [`drain_expired`](Self::drain_expired)
/// or replaced by a later write; reads never mutate the key space.
#[derive(Debug)]
pub struct ExpiringStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Bumped by every clear
    generation: u64,
    /// Activity counters
    stats: CacheStats,
}

impl<V: Clone> ExpiringStore<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            generation: 0,
            stats: CacheStats::new(),
        }
    }

    // == Upsert ==
    /// Inserts a new entry or overwrites a live one in place.
    ///
    /// An expired entry under `key` is replaced as if it were absent and the
    /// write counts as an addition.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `sliding` - Sliding window; `Duration::ZERO` disables expiration
    pub fn upsert(&mut self, key: &str, value: V, sliding: Duration) -> Upsert {
        let outcome = if let Some(entry) = self.entries.get_mut(key) {
            let outcome = if entry.is_expired() {
                self.stats.record_evictions(1);
                Upsert::Added
            } else {
                Upsert::Updated
            };
            entry.replace(value, sliding);
            outcome
        } else {
            self.entries
                .insert(key.to_string(), CacheEntry::new(value, sliding));
            Upsert::Added
        };

        match outcome {
            Upsert::Added => self.stats.record_addition(),
            Upsert::Updated => self.stats.record_update(),
        }

        self.stats.set_total_entries(self.entries.len());
        outcome
    }

    // == Get ==
    /// Retrieves a value by key, restarting its sliding window on a hit.
    ///
    /// Expired entries are counted as misses and left in place.
    pub fn get(&mut self, key: &str) -> Lookup<V> {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                entry.touch();
                self.stats.record_hit();
                Lookup::Hit(entry.value.clone())
            }
            Some(_) => {
                self.stats.record_miss();
                Lookup::Expired
            }
            None => {
                self.stats.record_miss();
                Lookup::Miss
            }
        }
    }

    // == Contains ==
    /// Checks for a live entry without touching it.
    pub fn contains_live(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map_or(false, |entry| !entry.is_expired())
    }

    // == Remove ==
    /// Removes an entry by key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.entries.remove(key).map(|entry| entry.value);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Drain Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the keys that were evicted.
    pub fn drain_expired(&mut self) -> Vec<String> {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
        }

        self.stats.record_evictions(expired_keys.len());
        self.stats.set_total_entries(self.entries.len());
        expired_keys
    }

    // == Clear ==
    /// Removes every entry and starts a new generation.
    ///
    /// Returns how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.generation += 1;
        self.stats.record_invalidation();
        self.stats.set_total_entries(0);
        count
    }

    // == Generation ==
    /// Number of clears so far. Writers computed against an older
    /// generation must not land in the current one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // == Keys ==
    /// Returns all keys currently held, including not yet swept expired ones.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for ExpiringStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
