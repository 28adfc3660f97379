//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with sliding expiration.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and sliding expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Sliding window, None = no sliding expiration
    pub sliding: Option<Duration>,
    /// Last time the entry was written or successfully read
    pub last_access: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry whose window starts now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `sliding` - Sliding window; `Duration::ZERO` disables expiration
    pub fn new(value: V, sliding: Duration) -> Self {
        Self {
            value,
            sliding: (!sliding.is_zero()).then_some(sliding),
            last_access: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once the time since its last access is greater
    /// than or equal to its sliding window.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.sliding {
            Some(window) => now.saturating_duration_since(self.last_access) >= window,
            None => false,
        }
    }

    /// Checks if the entry has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Touch ==
    /// Restarts the sliding window.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }

    // == Replace ==
    /// Overwrites the value in place and restarts the window with `sliding`.
    pub fn replace(&mut self, value: V, sliding: Duration) {
        self.value = value;
        self.sliding = (!sliding.is_zero()).then_some(sliding);
        self.touch();
    }

    // == Time To Live ==
    /// Returns the time left before expiration, or None if the entry never expires.
    pub fn remaining(&self) -> Option<Duration> {
        self.sliding
            .map(|window| window.saturating_sub(self.last_access.elapsed()))
    }
}
