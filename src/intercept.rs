//! Call Interception Module
//!
//! Runs a single operation call through a cache container: try a hit, fall
//! back to the real operation and cache its result, then apply invalidation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use crate::cache::{CacheContainer, CacheKey, KeyGenerator};
use crate::error::Result;

// == Caching Interceptor ==
/// Applies the cache protocol around operation calls.
///
/// Operations return `Option<V>`; `None` results are passed through but never
/// cached.
#[derive(Debug)]
pub struct CachingInterceptor<V> {
    cache: Arc<CacheContainer<V>>,
    keys: KeyGenerator,
    sliding: Duration,
}

impl<V: Clone> Clone for CachingInterceptor<V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            keys: self.keys,
            sliding: self.sliding,
        }
    }
}

impl<V: Clone> CachingInterceptor<V> {
    // == Constructor ==
    /// Creates an interceptor caching results for `sliding`.
    pub fn new(cache: Arc<CacheContainer<V>>, sliding: Duration) -> Self {
        Self {
            cache,
            keys: KeyGenerator::new(),
            sliding,
        }
    }

    pub fn cache(&self) -> &Arc<CacheContainer<V>> {
        &self.cache
    }

    // == Call ==
    /// Calls `invoke` unless a cached result for `operation(args)` exists.
    ///
    /// A result computed on a miss is only cached if no invalidation ran
    /// while `invoke` was in flight.
    ///
    /// # Errors
    /// Propagates key generation failures; the operation is not invoked then.
    pub fn call<A, F>(&self, operation: &str, args: &A, invoke: F) -> Result<Option<V>>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Option<V>,
    {
        let key = self.keys.generate(operation, args)?;
        let generation = self.cache.generation();
        let result = match self.lookup(&key) {
            Some(hit) => Some(hit),
            None => self.store(&key, invoke(), generation),
        };
        self.cache.invalidate_if_needed(operation);
        Ok(result)
    }

    // == Call Async ==
    /// Async counterpart of [`call`](Self::call).
    pub async fn call_async<A, F, Fut>(&self, operation: &str, args: &A, invoke: F) -> Result<Option<V>>
    where
        A: Serialize + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<V>>,
    {
        let key = self.keys.generate(operation, args)?;
        let generation = self.cache.generation();
        let result = match self.lookup(&key) {
            Some(hit) => Some(hit),
            None => self.store(&key, invoke().await, generation),
        };
        self.cache.invalidate_if_needed(operation);
        Ok(result)
    }

    fn lookup(&self, key: &CacheKey) -> Option<V> {
        if !self.cache.is_cacheable(key.as_str()) {
            return None;
        }
        let hit = self.cache.try_get(key.as_str());
        trace!(key = key.as_str(), hit = hit.is_some(), "Cache lookup");
        hit
    }

    fn store(&self, key: &CacheKey, result: Option<V>, generation: u64) -> Option<V> {
        // Rejections (not cacheable, None, invalidated meanwhile) are expected and silent
        self.cache
            .try_add_if_generation(key.as_str(), result.clone(), self.sliding, generation);
        result
    }
}
