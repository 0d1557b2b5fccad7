//! Storage adapters
//!
//! Contracts for the request and notification stores plus the in-memory
//! reference implementations.

pub mod memory;
pub mod traits;

pub use memory::{InMemoryNotificationStore, InMemoryRequestStore};
pub use traits::{NotificationStore, RequestStore};
