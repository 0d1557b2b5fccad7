//! In-memory donor directory
//!
//! Reference [`DonorDirectory`] implementation holding normalized donors.
//! Backs the simulate harness (seeded from a JSON file) and tests. Raw
//! records that fail normalization are skipped with a warning rather than
//! failing the whole load - a single malformed user must not take donor
//! matching down.

use super::record::RawDonorRecord;
use super::traits::DonorDirectory;
use crate::domain::blood_group::BloodGroup;
use crate::domain::donor::Donor;
use crate::domain::errors::DirectoryError;
use crate::domain::ids::UserId;
use crate::domain::{CrossmatchError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

/// In-memory [`DonorDirectory`]
#[derive(Debug, Default)]
pub struct InMemoryDonorDirectory {
    donors: RwLock<HashMap<UserId, Donor>>,
}

impl InMemoryDonorDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory from already-normalized donors
    pub fn with_donors(donors: Vec<Donor>) -> Self {
        let map = donors.into_iter().map(|d| (d.id.clone(), d)).collect();
        Self {
            donors: RwLock::new(map),
        }
    }

    /// Creates a directory from raw upstream records
    ///
    /// Records that fail normalization are skipped with a warning.
    pub fn from_raw_records(records: Vec<RawDonorRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            match record.normalize() {
                Ok(donor) => {
                    map.insert(donor.id.clone(), donor);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping donor record that failed normalization");
                }
            }
        }
        Self {
            donors: RwLock::new(map),
        }
    }

    /// Loads a directory from a JSON seed file (an array of raw records)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CrossmatchError::Configuration(format!(
                "Failed to read donor seed file {}: {e}",
                path.display()
            ))
        })?;
        let records: Vec<RawDonorRecord> = serde_json::from_str(&contents)?;
        tracing::info!(path = %path.display(), count = records.len(), "Loaded donor seed file");
        Ok(Self::from_raw_records(records))
    }

    /// Inserts or replaces a donor
    pub async fn upsert(&self, donor: Donor) {
        self.donors.write().await.insert(donor.id.clone(), donor);
    }

    /// Number of donors in the directory
    pub async fn len(&self) -> usize {
        self.donors.read().await.len()
    }

    /// Whether the directory is empty
    pub async fn is_empty(&self) -> bool {
        self.donors.read().await.is_empty()
    }
}

#[async_trait]
impl DonorDirectory for InMemoryDonorDirectory {
    async fn find_active_eligible_donors(&self, groups: &[BloodGroup]) -> Result<Vec<Donor>> {
        let donors = self.donors.read().await;
        let mut matches: Vec<Donor> = donors
            .values()
            .filter(|d| d.is_eligible() && groups.contains(&d.blood_group))
            .cloned()
            .collect();
        // Deterministic order for the stable ranking sort downstream.
        matches.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(matches)
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Donor> {
        let donors = self.donors.read().await;
        donors
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::DonorNotFound(id.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn donor(id: &str, blood_group: BloodGroup) -> Donor {
        Donor::new(
            UserId::new(id).unwrap(),
            format!("Donor {id}"),
            format!("{id}@example.com"),
            "+10000000000",
            blood_group,
        )
    }

    #[tokio::test]
    async fn test_find_filters_on_group_and_eligibility() {
        let mut ineligible = donor("donor-3", BloodGroup::ONegative);
        ineligible.can_donate = false;
        let mut inactive = donor("donor-4", BloodGroup::ONegative);
        inactive.is_active = false;

        let directory = InMemoryDonorDirectory::with_donors(vec![
            donor("donor-1", BloodGroup::ONegative),
            donor("donor-2", BloodGroup::BPositive),
            ineligible,
            inactive,
        ]);

        let found = directory
            .find_active_eligible_donors(&[BloodGroup::ONegative, BloodGroup::OPositive])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "donor-1");
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let directory = InMemoryDonorDirectory::new();
        let err = directory
            .get_by_id(&UserId::new("ghost").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_from_raw_records_skips_invalid() {
        let records: Vec<RawDonorRecord> = serde_json::from_value(json!([
            { "id": "donor-1", "bloodGroup": "A+" },
            { "id": "donor-2" },
            { "id": "donor-3", "blood_group": "nope" }
        ]))
        .unwrap();

        let directory = InMemoryDonorDirectory::from_raw_records(records);
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_seed_file_roundtrip() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "donor-1", "blood_group": "O-", "name": "Ada"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let directory = InMemoryDonorDirectory::from_seed_file(file.path()).unwrap();
        assert_eq!(directory.len().await, 1);

        let missing = InMemoryDonorDirectory::from_seed_file("no-such-file.json");
        assert!(missing.is_err());
    }
}
