//! Raw donor record normalization
//!
//! Upstream user records arrive with loose shapes: the blood group may sit
//! under `bloodGroup` or `blood_type`, contact fields may be absent, and
//! eligibility flags may be missing entirely. Everything is normalized
//! here, at the directory boundary, into the strict [`Donor`] model; the
//! core never branches on alternate field names.

use crate::domain::blood_group::BloodGroup;
use crate::domain::donor::Donor;
use crate::domain::errors::DirectoryError;
use crate::domain::ids::UserId;
use regex::Regex;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::OnceLock;

/// A donor record as the upstream directory serializes it
#[derive(Debug, Clone, Deserialize)]
pub struct RawDonorRecord {
    /// User id; `_id` is the document-store spelling
    #[serde(alias = "_id", alias = "userId")]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: Option<String>,

    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,

    /// Blood group label; key name varies across upstream versions
    #[serde(default, alias = "bloodGroup", alias = "blood_type")]
    pub blood_group: Option<String>,

    /// Active flag, defaults to true when absent
    #[serde(default = "default_true", alias = "isActive")]
    pub is_active: bool,

    /// Donation-eligibility flag, defaults to true when absent
    #[serde(default = "default_true", alias = "canDonate")]
    pub can_donate: bool,
}

fn default_true() -> bool {
    true
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^+0-9]").expect("static pattern"))
}

impl RawDonorRecord {
    /// Normalizes the raw record into the strict [`Donor`] shape
    ///
    /// Missing contact fields become empty strings; phone numbers are
    /// stripped to digits and a leading `+`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidRecord`] when the id is empty or
    /// the blood group is absent or unparseable - such records cannot
    /// participate in matching.
    pub fn normalize(self) -> Result<Donor, DirectoryError> {
        let id = UserId::new(&self.id)
            .map_err(|e| DirectoryError::InvalidRecord(format!("record '{}': {e}", self.id)))?;

        let label = self.blood_group.as_deref().unwrap_or("").trim().to_string();
        if label.is_empty() {
            return Err(DirectoryError::InvalidRecord(format!(
                "record '{}': missing blood group",
                self.id
            )));
        }
        let blood_group = BloodGroup::from_str(&label).map_err(|_| {
            DirectoryError::InvalidRecord(format!(
                "record '{}': unknown blood group '{label}'",
                self.id
            ))
        })?;

        let phone = self
            .phone
            .map(|p| phone_pattern().replace_all(&p, "").into_owned())
            .unwrap_or_default();

        Ok(Donor {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone,
            blood_group,
            is_active: self.is_active,
            can_donate: self.can_donate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_full_record() {
        let record: RawDonorRecord = serde_json::from_value(json!({
            "id": "donor-1",
            "name": "Ada Osei",
            "email": "ada@example.com",
            "phone": "+233 (20) 000-0001",
            "blood_group": "O-",
            "is_active": true,
            "can_donate": true
        }))
        .unwrap();

        let donor = record.normalize().unwrap();
        assert_eq!(donor.blood_group, BloodGroup::ONegative);
        assert_eq!(donor.phone, "+233200000001", "phone stripped to digits");
    }

    #[test]
    fn test_alternate_key_names() {
        let record: RawDonorRecord = serde_json::from_value(json!({
            "_id": "donor-2",
            "bloodGroup": "AB+",
            "isActive": false
        }))
        .unwrap();

        let donor = record.normalize().unwrap();
        assert_eq!(donor.id.as_str(), "donor-2");
        assert_eq!(donor.blood_group, BloodGroup::AbPositive);
        assert!(!donor.is_active);
        assert!(donor.can_donate, "can_donate defaults to true");
    }

    #[test]
    fn test_missing_contact_fields_default_empty() {
        let record: RawDonorRecord = serde_json::from_value(json!({
            "id": "donor-3",
            "blood_type": "B+"
        }))
        .unwrap();

        let donor = record.normalize().unwrap();
        assert_eq!(donor.name, "");
        assert_eq!(donor.email, "");
        assert_eq!(donor.phone, "");
    }

    #[test]
    fn test_missing_blood_group_rejected() {
        let record: RawDonorRecord =
            serde_json::from_value(json!({ "id": "donor-4" })).unwrap();
        let err = record.normalize().unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidRecord(_)));
    }

    #[test]
    fn test_unknown_blood_group_rejected() {
        let record: RawDonorRecord =
            serde_json::from_value(json!({ "id": "donor-5", "blood_group": "Z-" })).unwrap();
        assert!(record.normalize().is_err());
    }
}
