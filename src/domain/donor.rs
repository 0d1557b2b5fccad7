//! Donor read model
//!
//! The subset of a platform user that matters to matching. Donor records
//! are owned by the donor directory collaborator; the core only reads
//! them. Raw directory payloads are normalized into this strict shape at
//! the adapter boundary, so the core never branches on missing or
//! alternately-named fields.

use super::blood_group::BloodGroup;
use super::ids::UserId;
use serde::{Deserialize, Serialize};

/// A registered donor as seen by the matching core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// Platform user id
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    pub phone: String,

    /// The donor's blood group
    pub blood_group: BloodGroup,

    /// Whether the account is active
    pub is_active: bool,

    /// Whether the donor is currently allowed to donate
    /// (true unless explicitly disabled, e.g. after a recent donation)
    pub can_donate: bool,
}

impl Donor {
    /// Creates a new active, donation-eligible donor
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        blood_group: BloodGroup,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            blood_group,
            is_active: true,
            can_donate: true,
        }
    }

    /// Whether this donor may currently be asked to donate
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.can_donate
    }
}
