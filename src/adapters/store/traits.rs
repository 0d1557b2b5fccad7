//! Persistence abstraction traits
//!
//! This module defines the contracts the matching core requires from its
//! storage collaborators. The platform's document store implements these;
//! the in-memory implementations in [`super::memory`] are the reference
//! behavior and back the simulate harness and tests.

use crate::domain::ids::{RequestId, UserId};
use crate::domain::notification::Notification;
use crate::domain::request::{
    BloodRequest, DonorResponse, NewBloodRequest, RequestFilter, RequestStatus,
};
use crate::domain::Result;
use async_trait::async_trait;

/// Blood request persistence
///
/// The store owns identity assignment and timestamps. Mutating operations
/// must be atomic per document: `upsert_donor_response` is a serialized
/// read-modify-write of the embedded response list, so concurrent replies
/// from different donors never lose updates.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Create a request from validated input data
    ///
    /// Assigns an id and timestamps and initializes the lifecycle fields
    /// (`status = active`, `fulfilled = false`, empty response list).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn create(&self, data: NewBloodRequest) -> Result<BloodRequest>;

    /// Fetch a request by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no such request exists.
    async fn get(&self, id: &RequestId) -> Result<BloodRequest>;

    /// List requests matching the filter, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list(&self, filter: &RequestFilter) -> Result<Vec<BloodRequest>>;

    /// Insert or replace the response keyed by `response.donor_id`
    ///
    /// Updates `updated_at`. Implementations must serialize this against
    /// concurrent upserts on the same request; a lost race surfaces as a
    /// conflict error and may be retried by the caller.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the request is missing, or a conflict
    /// error on a concurrent-update collision.
    async fn upsert_donor_response(
        &self,
        id: &RequestId,
        response: DonorResponse,
    ) -> Result<BloodRequest>;

    /// Apply a status transition, optionally updating `fulfilled`
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the request is missing, or a
    /// validation error for an illegal transition.
    async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        fulfilled: Option<bool>,
    ) -> Result<BloodRequest>;

    /// Delete a request by id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no such request exists.
    async fn delete(&self, id: &RequestId) -> Result<()>;

    /// Delete requests older than `max_age_days` in a terminal
    /// `completed`/`rejected` status
    ///
    /// Active requests are never deleted regardless of age. Idempotent.
    ///
    /// # Returns
    ///
    /// The number of requests deleted.
    async fn delete_if_stale_and_terminal(&self, max_age_days: i64) -> Result<usize>;
}

/// Notification persistence
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a single notification
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn create(&self, notification: Notification) -> Result<Notification>;

    /// Persist a batch of notifications atomically (all-or-nothing)
    ///
    /// # Returns
    ///
    /// The number of notifications written.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch cannot be written; no partial state
    /// is left behind.
    async fn create_batch(&self, notifications: Vec<Notification>) -> Result<usize>;

    /// Mark the addressed donor's open `blood_request` prompt for this
    /// request as responded and read
    ///
    /// A no-op if the prompt no longer exists.
    async fn mark_responded(&self, request_id: &RequestId, user_id: &UserId) -> Result<()>;

    /// Delete the addressed donor's `blood_request` prompt for this request
    ///
    /// # Returns
    ///
    /// The number of notifications deleted (0 if already gone).
    async fn delete_by_request_and_user(
        &self,
        request_id: &RequestId,
        user_id: &UserId,
    ) -> Result<usize>;

    /// List unexpired notifications referencing a request
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    async fn list_for_request(&self, request_id: &RequestId) -> Result<Vec<Notification>>;

    /// List unexpired notifications addressed to a user (global ones included)
    ///
    /// Expiry is checked on read against `expires_at`; there is no
    /// background sweep.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>>;
}
