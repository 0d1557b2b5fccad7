//! Domain models and types for Crossmatch.
//!
//! This module contains the core domain models, the compatibility table
//! and the error taxonomy. Identifier newtypes keep request, user and
//! notification ids from being confused; all fallible operations return
//! [`Result<T, CrossmatchError>`].
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RequestId`], [`UserId`], [`NotificationId`])
//! - **The blood-group model** ([`BloodGroup`], [`UrgencyLevel`], [`compatibility`])
//! - **Aggregates** ([`BloodRequest`] with embedded [`DonorResponse`]s,
//!   [`Notification`], the [`Donor`] read model)
//! - **Error types** ([`CrossmatchError`], [`StoreError`], [`DirectoryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```
//! use crossmatch::domain::{compatibility, BloodGroup, UrgencyLevel};
//!
//! let score = compatibility::compatibility_score(
//!     BloodGroup::ONegative,
//!     BloodGroup::APositive,
//!     UrgencyLevel::Critical,
//! );
//! assert_eq!(score, 6);
//! ```

pub mod blood_group;
pub mod compatibility;
pub mod donor;
pub mod errors;
pub mod ids;
pub mod notification;
pub mod request;
pub mod result;

// Re-export commonly used types for convenience
pub use blood_group::{BloodGroup, UrgencyLevel};
pub use compatibility::RankedDonor;
pub use donor::Donor;
pub use errors::{CrossmatchError, DirectoryError, StoreError};
pub use ids::{NotificationId, RequestId, UserId};
pub use notification::{Notification, NotificationAddress, NotificationBuilder, NotificationKind};
pub use request::{
    BloodRequest, DonorResponse, NewBloodRequest, NewBloodRequestBuilder, RequestFilter,
    RequestStatus, ResponseChoice,
};
pub use result::Result;
