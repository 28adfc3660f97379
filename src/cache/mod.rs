//! Cache Module
//!
//! Policy-gated in-memory caching with sliding expiration, lifecycle
//! notifications and prefix-triggered invalidation.

mod container;
mod entry;
mod events;
mod key;
mod rules;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use container::CacheContainer;
pub use entry::CacheEntry;
pub use events::{CacheEvent, Notifier, DEFAULT_NOTIFICATION_CAPACITY};
pub use key::{CacheKey, KeyGenerator};
pub use rules::RuleSet;
pub use stats::CacheStats;
pub use store::{ExpiringStore, Lookup, Upsert};
