//! Error types for the cache
//!
//! Provides unified error handling using thiserror. Ordinary policy
//! rejections and cache misses are not errors; they surface as `bool` or
//! `Option` results.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration is malformed (setup defect)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A cache key could not be derived from an operation and its arguments
    #[error("Cannot generate key for `{identity}`: {reason}")]
    KeyGeneration { identity: String, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CacheError::InvalidConfig("empty prefix".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: empty prefix");

        let err = CacheError::KeyGeneration {
            identity: "GetPerson".to_string(),
            reason: "map key must be a string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot generate key for `GetPerson`: map key must be a string"
        );
    }
}
