//! Core business logic
//!
//! The matching workflow: notification dispatch, donor response handling,
//! stale-request housekeeping and the service facade the platform calls.

pub mod dispatch;
pub mod housekeeping;
pub mod response;
pub mod retry;
pub mod service;

pub use dispatch::{DispatchSummary, NotificationDispatcher};
pub use housekeeping::Housekeeping;
pub use response::{ResponseHandler, ResponseOutcome};
pub use service::{BloodRequestService, ServiceOptions, SubmitOutcome};
