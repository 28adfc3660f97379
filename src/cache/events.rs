//! Cache Events Module
//!
//! Lifecycle notifications broadcast to any number of observers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Default buffer size of the notification channel
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

// == Cache Event ==
/// A lifecycle notification about one or more cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CacheEvent {
    /// A new entry was inserted
    Added { key: String, at: DateTime<Utc> },
    /// An existing entry was overwritten
    Updated { key: String, at: DateTime<Utc> },
    /// An entry was removed because its sliding window elapsed
    Evicted { key: String, at: DateTime<Utc> },
    /// The whole cache was cleared by an invalidating operation
    Invalidated {
        operation: String,
        removed: usize,
        at: DateTime<Utc>,
    },
}

impl CacheEvent {
    pub fn added(key: impl Into<String>) -> Self {
        Self::Added {
            key: key.into(),
            at: Utc::now(),
        }
    }

    pub fn updated(key: impl Into<String>) -> Self {
        Self::Updated {
            key: key.into(),
            at: Utc::now(),
        }
    }

    pub fn evicted(key: impl Into<String>) -> Self {
        Self::Evicted {
            key: key.into(),
            at: Utc::now(),
        }
    }

    pub fn invalidated(operation: impl Into<String>, removed: usize) -> Self {
        Self::Invalidated {
            operation: operation.into(),
            removed,
            at: Utc::now(),
        }
    }

    /// Returns the entry key, if the event concerns a single entry.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Added { key, .. } | Self::Updated { key, .. } | Self::Evicted { key, .. } => {
                Some(key.as_str())
            }
            Self::Invalidated { .. } => None,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Added { at, .. }
            | Self::Updated { at, .. }
            | Self::Evicted { at, .. }
            | Self::Invalidated { at, .. } => *at,
        }
    }
}

// == Notifier ==
/// Fire-and-forget fan-out of cache events.
///
/// Sending never blocks and never fails the caller: with no subscribers the
/// event is dropped, and slow subscribers observe a lag instead of stalling
/// the cache.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<CacheEvent>,
}

impl Notifier {
    // == Constructor ==
    /// Creates a notifier buffering up to `capacity` events per subscriber.
    ///
    /// # Panics
    /// If `capacity` is zero; `Config::validate` rejects that value upstream.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Registers a new observer. Only events emitted afterwards are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.tx.subscribe()
    }

    /// Emits an event to every current subscriber.
    pub fn emit(&self, event: CacheEvent) {
        // Err only means nobody is listening
        let _ = self.tx.send(event);
    }

    pub fn emit_all(&self, events: impl IntoIterator<Item = CacheEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_CAPACITY)
    }
}
