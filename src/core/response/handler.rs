//! Donor response handling
//!
//! Records a donor's reply to a blood request and reconciles notification
//! state. The upsert of the reply is the source of truth: once it has
//! landed, notification reconciliation (marking, deleting, creating the
//! accepted/reminder notifications) is best-effort and independently
//! retryable - a failure there is logged, never rolled back.

use crate::adapters::directory::DonorDirectory;
use crate::adapters::store::{NotificationStore, RequestStore};
use crate::core::dispatch::message;
use crate::core::retry::{with_conflict_retry, RetryPolicy};
use crate::domain::ids::{RequestId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::request::{BloodRequest, DonorResponse, ResponseChoice};
use crate::domain::{CrossmatchError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of recording a donor response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseOutcome {
    /// Human-readable result message; differs by response value
    pub message: String,

    /// The recorded (possibly replacing) response entry
    pub donor_response: DonorResponse,
}

/// Records donor replies and reconciles notifications
pub struct ResponseHandler {
    requests: Arc<dyn RequestStore>,
    notifications: Arc<dyn NotificationStore>,
    directory: Arc<dyn DonorDirectory>,
    retry: RetryPolicy,
}

impl ResponseHandler {
    /// Creates a handler over the given collaborators
    pub fn new(
        requests: Arc<dyn RequestStore>,
        notifications: Arc<dyn NotificationStore>,
        directory: Arc<dyn DonorDirectory>,
    ) -> Self {
        Self {
            requests,
            notifications,
            directory,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the conflict-retry policy for the response upsert
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Records `donor_id`'s reply to `request_id`
    ///
    /// A donor may respond any number of times; the latest reply wins
    /// (replace-on-donor-id upsert). Accepting shares the donor's contact
    /// details with the requester via a global `donor_accepted`
    /// notification and sends the donor a reminder; the donor's open
    /// prompt is deleted. Declined/maybe merely mark the prompt
    /// responded.
    ///
    /// # Errors
    ///
    /// Fails `Unauthorized` when `caller` is not the donor, `NotFound`
    /// when the request or donor profile is missing, and surfaces a store
    /// conflict only after bounded retries are exhausted.
    pub async fn respond(
        &self,
        caller: Option<&UserId>,
        request_id: &RequestId,
        donor_id: &UserId,
        choice: ResponseChoice,
        donor_message: &str,
    ) -> Result<ResponseOutcome> {
        if caller != Some(donor_id) {
            return Err(CrossmatchError::Unauthorized(format!(
                "caller is not donor {donor_id}"
            )));
        }

        let request = self.requests.get(request_id).await.map_err(not_found)?;
        let donor = self.directory.get_by_id(donor_id).await.map_err(not_found)?;

        let response = DonorResponse::from_donor(&donor, choice, donor_message, Utc::now());

        let request = with_conflict_retry(&self.retry, "upsert_donor_response", || {
            self.requests
                .upsert_donor_response(request_id, response.clone())
        })
        .await?;

        tracing::info!(
            request_id = %request_id,
            donor_id = %donor_id,
            response = %choice,
            "Recorded donor response"
        );

        // From here on the reply is committed; reconciliation must not
        // undo it.
        if let Err(e) = self.notifications.mark_responded(request_id, donor_id).await {
            tracing::warn!(
                request_id = %request_id,
                donor_id = %donor_id,
                error = %e,
                "Failed to mark prompt responded; continuing"
            );
        }

        if choice == ResponseChoice::Accepted {
            self.reconcile_acceptance(&request, &response).await;
        }

        let message = match choice {
            ResponseChoice::Accepted => {
                "Thank you for accepting! Your contact details have been shared with the requester."
            }
            ResponseChoice::Declined | ResponseChoice::Maybe => {
                "Your response has been recorded."
            }
        };

        Ok(ResponseOutcome {
            message: message.to_string(),
            donor_response: response,
        })
    }

    /// Acceptance follow-up: resolve the prompt, broadcast the contact
    /// details, remind the donor. Each step is best-effort.
    async fn reconcile_acceptance(&self, request: &BloodRequest, response: &DonorResponse) {
        let now = Utc::now();

        if let Err(e) = self
            .notifications
            .delete_by_request_and_user(&request.id, &response.donor_id)
            .await
        {
            tracing::warn!(
                request_id = %request.id,
                donor_id = %response.donor_id,
                error = %e,
                "Failed to delete resolved prompt; continuing"
            );
        }

        let accepted = Notification::builder(NotificationKind::DonorAccepted, request.id.clone())
            .global()
            .message(message::donor_accepted_message(request, response))
            .recipient_blood_group(request.blood_group)
            .donor_blood_group(response.donor_blood_group)
            .urgency_level(request.urgency_level)
            .hospital_name(request.hospital_name.clone())
            .units_required(request.units_required)
            .patient_name(request.patient_name.clone())
            .build(now);
        if let Err(e) = self.notifications.create(accepted).await {
            tracing::warn!(
                request_id = %request.id,
                error = %e,
                "Failed to create donor_accepted notification; continuing"
            );
        }

        let reminder =
            Notification::builder(NotificationKind::DonationReminder, request.id.clone())
                .to_user(response.donor_id.clone())
                .message(message::donation_reminder_message(request))
                .recipient_blood_group(request.blood_group)
                .urgency_level(request.urgency_level)
                .hospital_name(request.hospital_name.clone())
                .units_required(request.units_required)
                .patient_name(request.patient_name.clone())
                .build(now);
        if let Err(e) = self.notifications.create(reminder).await {
            tracing::warn!(
                request_id = %request.id,
                donor_id = %response.donor_id,
                error = %e,
                "Failed to create donation_reminder notification; continuing"
            );
        }
    }
}

/// Collapses collaborator not-found errors to the caller-facing variant
fn not_found(e: CrossmatchError) -> CrossmatchError {
    if e.is_not_found() {
        CrossmatchError::NotFound(e.to_string())
    } else {
        e
    }
}
