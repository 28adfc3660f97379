//! Background Tasks Module
//!
//! Contains background tasks that run alongside a cache container.
//!
//! # Tasks
//! - Expiration sweeper: evicts entries whose sliding window elapsed
//! - Notification logger: logs every cache lifecycle event

mod logger;
mod sweeper;

pub use logger::spawn_notification_logger;
pub use sweeper::spawn_expiration_sweeper;
