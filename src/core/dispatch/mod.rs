//! Notification dispatch
//!
//! Fan-out of a blood request to compatible donors: the dispatcher itself,
//! the fixed message templates and the dispatch summary.

pub mod dispatcher;
pub mod message;
pub mod summary;

pub use dispatcher::NotificationDispatcher;
pub use summary::DispatchSummary;
