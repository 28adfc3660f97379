//! Configuration Module
//!
//! Loads cache configuration from environment variables and validates it
//! before any cache is built.

use std::env;
use std::time::Duration;

use crate::cache::{RuleSet, DEFAULT_NOTIFICATION_CAPACITY};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Operation prefixes whose results may be cached
    pub cacheable_prefixes: Vec<String>,
    /// Operation prefixes that clear the whole cache
    pub invalidating_prefixes: Vec<String>,
    /// Default sliding expiration in seconds
    pub sliding_expiration_secs: u64,
    /// Background expiration sweep interval in milliseconds
    pub sweep_interval_ms: u64,
    /// Notification channel buffer per subscriber
    pub notification_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHEABLE_PREFIXES` - Comma-separated prefixes (default: none, nothing is cached)
    /// - `INVALIDATING_PREFIXES` - Comma-separated prefixes (default: none)
    /// - `SLIDING_EXPIRATION_SECS` - Default sliding window (default: 300)
    /// - `SWEEP_INTERVAL_MS` - Expiration sweep frequency (default: 1000)
    /// - `NOTIFICATION_CAPACITY` - Buffered events per subscriber (default: 256)
    ///
    /// Unparseable numbers fall back to their defaults; call
    /// [`validate`](Self::validate) before use.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cacheable_prefixes: env::var("CACHEABLE_PREFIXES")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.cacheable_prefixes),
            invalidating_prefixes: env::var("INVALIDATING_PREFIXES")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.invalidating_prefixes),
            sliding_expiration_secs: env::var("SLIDING_EXPIRATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sliding_expiration_secs),
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_ms),
            notification_capacity: env::var("NOTIFICATION_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.notification_capacity),
        }
    }

    /// Checks the configuration for setup defects.
    pub fn validate(&self) -> Result<()> {
        if self.sweep_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.notification_capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "notification capacity must be greater than zero".to_string(),
            ));
        }
        self.rules().map(|_| ())
    }

    /// Builds the rule set, rejecting empty prefixes.
    pub fn rules(&self) -> Result<RuleSet> {
        RuleSet::new(
            self.cacheable_prefixes.iter().cloned(),
            self.invalidating_prefixes.iter().cloned(),
        )
    }

    pub fn sliding_expiration(&self) -> Duration {
        Duration::from_secs(self.sliding_expiration_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cacheable_prefixes: Vec::new(),
            invalidating_prefixes: Vec::new(),
            sliding_expiration_secs: 300,
            sweep_interval_ms: 1000,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

/// Splits a comma-separated list, trimming whitespace around items.
///
/// An all-blank value yields an empty list; an empty item between commas is
/// kept so that validation can reject it.
fn parse_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|item| item.trim().to_string()).collect()
}
