//! Dispatch result summary

use serde::{Deserialize, Serialize};

/// Outcome of fanning a blood request out to compatible donors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Compatible, eligible donors found (after requester exclusion)
    pub compatible_donors: usize,

    /// Notifications actually written in this dispatch
    pub notifications_sent: usize,

    /// Donors skipped because they already hold a live prompt for this
    /// request (dedupe on retried dispatch)
    pub duplicates_skipped: usize,
}

impl DispatchSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the summary at info level
    pub fn log_summary(&self, request_id: &str) {
        tracing::info!(
            request_id,
            compatible_donors = self.compatible_donors,
            notifications_sent = self.notifications_sent,
            duplicates_skipped = self.duplicates_skipped,
            "Dispatch complete"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let summary = DispatchSummary::new();
        assert_eq!(summary.compatible_donors, 0);
        assert_eq!(summary.notifications_sent, 0);
        assert_eq!(summary.duplicates_skipped, 0);
    }
}
