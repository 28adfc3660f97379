//! Temporal Cache - A policy-gated in-process object cache
//!
//! Caches operation results with sliding expiration, gated by operation
//! name prefixes, and clears everything when an invalidating operation runs.

pub mod cache;
pub mod config;
pub mod error;
pub mod intercept;
pub mod tasks;

pub use cache::{CacheContainer, CacheEvent, CacheKey, CacheStats, KeyGenerator, RuleSet};
pub use config::Config;
pub use error::{CacheError, Result};
pub use intercept::CachingInterceptor;
pub use tasks::{spawn_expiration_sweeper, spawn_notification_logger};
