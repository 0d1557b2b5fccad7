//! Stale-request pruning
//!
//! Completed and rejected requests older than the configured age are
//! deleted; active requests are never touched regardless of age. Pruning
//! runs opportunistically (the service triggers it after list-fetches by
//! default) rather than on a schedule, and is idempotent.

use crate::adapters::store::RequestStore;
use crate::domain::Result;
use std::sync::Arc;

/// Default maximum age before a terminal request is pruned
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

/// Prunes stale terminal requests
pub struct Housekeeping {
    requests: Arc<dyn RequestStore>,
    max_age_days: i64,
}

impl Housekeeping {
    /// Creates a housekeeper with the default 7-day age limit
    pub fn new(requests: Arc<dyn RequestStore>) -> Self {
        Self {
            requests,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
        }
    }

    /// Overrides the maximum age in days
    pub fn with_max_age_days(mut self, max_age_days: i64) -> Self {
        self.max_age_days = max_age_days;
        self
    }

    /// The configured maximum age in days
    pub fn max_age_days(&self) -> i64 {
        self.max_age_days
    }

    /// Deletes stale `completed`/`rejected` requests
    ///
    /// Safe to call repeatedly; a second pass over the same data deletes
    /// nothing.
    ///
    /// # Returns
    ///
    /// The number of requests deleted.
    pub async fn prune_stale_requests(&self) -> Result<usize> {
        let deleted = self
            .requests
            .delete_if_stale_and_terminal(self.max_age_days)
            .await?;
        if deleted > 0 {
            tracing::info!(
                deleted,
                max_age_days = self.max_age_days,
                "Pruned stale terminal requests"
            );
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::store::InMemoryRequestStore;

    #[tokio::test]
    async fn test_prune_on_empty_store_is_zero() {
        let housekeeping = Housekeeping::new(Arc::new(InMemoryRequestStore::new()));
        assert_eq!(housekeeping.prune_stale_requests().await.unwrap(), 0);
        // Idempotent.
        assert_eq!(housekeeping.prune_stale_requests().await.unwrap(), 0);
    }

    #[test]
    fn test_default_age() {
        assert_eq!(DEFAULT_MAX_AGE_DAYS, 7);
    }
}
