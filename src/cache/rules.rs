//! Rule Set Module
//!
//! Prefix lists deciding which operations may be cached and which ones wipe
//! the cache.

use crate::error::{CacheError, Result};

// == Rule Set ==
/// Cacheable and invalidating operation prefixes.
///
/// Matching is case-sensitive `starts_with`; any matching prefix is enough.
/// An empty cacheable list means nothing is cacheable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    cacheable: Vec<String>,
    invalidating: Vec<String>,
}

impl RuleSet {
    // == Constructor ==
    /// Creates a rule set, rejecting empty prefixes.
    ///
    /// Prefixes are taken literally; whitespace is significant.
    pub fn new<C, I>(cacheable: C, invalidating: I) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let cacheable = collect_prefixes("cacheable", cacheable)?;
        let invalidating = collect_prefixes("invalidating", invalidating)?;
        Ok(Self {
            cacheable,
            invalidating,
        })
    }

    // == Cacheability Gate ==
    /// Returns true iff `identifier` starts with a cacheable prefix.
    pub fn is_cacheable(&self, identifier: &str) -> bool {
        matches_any(&self.cacheable, identifier)
    }

    // == Invalidation Gate ==
    /// Returns the first invalidating prefix `identifier` starts with.
    pub fn invalidating_match(&self, identifier: &str) -> Option<&str> {
        self.invalidating
            .iter()
            .find(|prefix| identifier.starts_with(prefix.as_str()))
            .map(String::as_str)
    }

    pub fn triggers_invalidation(&self, identifier: &str) -> bool {
        self.invalidating_match(identifier).is_some()
    }
}

fn matches_any(prefixes: &[String], identifier: &str) -> bool {
    prefixes
        .iter()
        .any(|prefix| identifier.starts_with(prefix.as_str()))
}

fn collect_prefixes<P>(kind: &str, prefixes: P) -> Result<Vec<String>>
where
    P: IntoIterator,
    P::Item: Into<String>,
{
    prefixes
        .into_iter()
        .map(Into::into)
        .map(|prefix: String| {
            if prefix.is_empty() {
                Err(CacheError::InvalidConfig(format!(
                    "{} prefixes must not be empty",
                    kind
                )))
            } else {
                Ok(prefix)
            }
        })
        .collect()
}
