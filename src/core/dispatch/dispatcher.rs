//! Notification fan-out
//!
//! Turns a newly created blood request into one `blood_request`
//! notification per compatible, eligible donor. Dispatch never mutates the
//! request: a failed batch write leaves the request created and valid, and
//! the whole dispatch may be retried - the `(request, donor)` dedupe below
//! keeps a retry from handing any donor a second live prompt.

use super::message;
use super::summary::DispatchSummary;
use crate::adapters::directory::DonorDirectory;
use crate::adapters::store::NotificationStore;
use crate::domain::compatibility;
use crate::domain::ids::UserId;
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::request::BloodRequest;
use crate::domain::{CrossmatchError, Result};
use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;

/// Fans a blood request out to compatible donors
pub struct NotificationDispatcher {
    directory: Arc<dyn DonorDirectory>,
    notifications: Arc<dyn NotificationStore>,
    ttl_days: Option<i64>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given collaborators
    pub fn new(
        directory: Arc<dyn DonorDirectory>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            directory,
            notifications,
            ttl_days: None,
        }
    }

    /// Sets an expiry on dispatched prompts, in days
    pub fn with_ttl_days(mut self, ttl_days: Option<i64>) -> Self {
        self.ttl_days = ttl_days;
        self
    }

    /// Dispatches the request to all compatible, eligible donors
    ///
    /// The requester never receives their own request. Donors already
    /// holding a live prompt for this request are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CrossmatchError::DispatchFailed`] if the notification
    /// batch cannot be written; the request itself is untouched and the
    /// dispatch may be retried.
    pub async fn dispatch(&self, request: &BloodRequest) -> Result<DispatchSummary> {
        let eligible_groups = compatibility::compatible_donor_groups(request.blood_group);

        tracing::debug!(
            request_id = %request.id,
            blood_group = %request.blood_group,
            eligible_groups = ?eligible_groups,
            "Computed eligible donor groups"
        );

        let donors = self
            .directory
            .find_active_eligible_donors(eligible_groups)
            .await?;

        // Self-notification prevention, plus a donor-id dedupe in case the
        // directory returns a user twice.
        let mut seen: HashSet<UserId> = HashSet::new();
        let donors: Vec<_> = donors
            .into_iter()
            .filter(|d| Some(&d.id) != request.requester_id.as_ref())
            .filter(|d| seen.insert(d.id.clone()))
            .collect();

        let mut summary = DispatchSummary {
            compatible_donors: donors.len(),
            ..DispatchSummary::new()
        };

        if donors.is_empty() {
            tracing::warn!(
                request_id = %request.id,
                blood_group = %request.blood_group,
                "No compatible donors found for request"
            );
            return Ok(summary);
        }

        // Donors who already hold a live prompt for this request keep it;
        // a retried dispatch must not write a second one.
        let already_prompted: HashSet<UserId> = self
            .notifications
            .list_for_request(&request.id)
            .await?
            .into_iter()
            .filter(|n| n.kind == NotificationKind::BloodRequest)
            .filter_map(|n| n.address.user_id().cloned())
            .collect();

        let ranked = compatibility::sort_donors_by_compatibility(
            donors,
            request.blood_group,
            request.urgency_level,
        );
        if let Some(best) = ranked.first() {
            tracing::debug!(
                request_id = %request.id,
                donor_id = %best.donor.id,
                score = best.score,
                "Best-ranked compatible donor"
            );
        }

        let now = Utc::now();
        let expires_at = self.ttl_days.map(|days| now + Duration::days(days));
        let mut batch = Vec::new();
        for ranked_donor in &ranked {
            let donor = &ranked_donor.donor;
            if already_prompted.contains(&donor.id) {
                summary.duplicates_skipped += 1;
                continue;
            }
            let mut builder = Notification::builder(
                NotificationKind::BloodRequest,
                request.id.clone(),
            )
            .to_user(donor.id.clone())
            .message(message::blood_request_message(request, donor))
            .recipient_blood_group(request.blood_group)
            .donor_blood_group(donor.blood_group)
            .urgency_level(request.urgency_level)
            .hospital_name(request.hospital_name.clone())
            .units_required(request.units_required)
            .patient_name(request.patient_name.clone());
            if let Some(at) = expires_at {
                builder = builder.expires_at(at);
            }
            batch.push(builder.build(now));
        }

        if !batch.is_empty() {
            let batch_size = batch.len();
            match self.notifications.create_batch(batch).await {
                Ok(written) => summary.notifications_sent = written,
                Err(e) => {
                    tracing::error!(
                        request_id = %request.id,
                        batch_size,
                        error = %e,
                        "Notification batch write failed; request remains created"
                    );
                    return Err(CrossmatchError::DispatchFailed {
                        sent: 0,
                        compatible: summary.compatible_donors,
                    });
                }
            }
        }

        summary.log_summary(request.id.as_str());
        Ok(summary)
    }
}
