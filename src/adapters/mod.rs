//! External collaborator adapters
//!
//! The matching core talks to the rest of the platform through the traits
//! defined here: the donor directory, the request and notification stores,
//! and the authentication identity. In-memory implementations of each are
//! provided as the reference behavior, for tests and for the simulate
//! harness.

pub mod auth;
pub mod directory;
pub mod store;

pub use auth::{AuthIdentity, StaticIdentity};
pub use directory::{DonorDirectory, InMemoryDonorDirectory};
pub use store::{InMemoryNotificationStore, InMemoryRequestStore, NotificationStore, RequestStore};
