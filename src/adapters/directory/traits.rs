//! Donor directory abstraction
//!
//! The user directory is owned by the wider platform; the matching core
//! only queries it. Implementations normalize their own record shapes
//! into the strict [`Donor`] model before anything reaches the core.

use crate::domain::blood_group::BloodGroup;
use crate::domain::donor::Donor;
use crate::domain::ids::UserId;
use crate::domain::Result;
use async_trait::async_trait;

/// Read-only donor directory
#[async_trait]
pub trait DonorDirectory: Send + Sync {
    /// Find donors eligible to be asked for a donation
    ///
    /// Returns donors whose blood group is in `groups`, who are active
    /// and whose donation ability has not been disabled. Donors without
    /// a known blood group never appear.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory query fails.
    async fn find_active_eligible_donors(&self, groups: &[BloodGroup]) -> Result<Vec<Donor>>;

    /// Fetch a donor profile by user id
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the user does not exist or is not a
    /// donor.
    async fn get_by_id(&self, id: &UserId) -> Result<Donor>;
}
