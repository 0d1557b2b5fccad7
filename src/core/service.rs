//! Blood request service
//!
//! The operation surface consumed by the platform's web and admin layers:
//! submit, respond, list, get and status updates. The service wires the
//! dispatcher, response handler and housekeeping over the injected
//! collaborators and turns their results into caller-facing envelopes
//! with human-readable messages.

use crate::adapters::auth::AuthIdentity;
use crate::adapters::directory::DonorDirectory;
use crate::adapters::store::{NotificationStore, RequestStore};
use crate::core::dispatch::{DispatchSummary, NotificationDispatcher};
use crate::core::housekeeping::{Housekeeping, DEFAULT_MAX_AGE_DAYS};
use crate::core::response::{ResponseHandler, ResponseOutcome};
use crate::core::retry::RetryPolicy;
use crate::domain::ids::{RequestId, UserId};
use crate::domain::request::{
    BloodRequest, NewBloodRequest, RequestFilter, RequestStatus, ResponseChoice,
};
use crate::domain::{CrossmatchError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tuning knobs for the service, typically filled from configuration
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Run housekeeping opportunistically after list-fetches
    pub prune_on_list: bool,

    /// Include internal error detail in caller-facing messages
    pub debug_errors: bool,

    /// Age limit for pruning terminal requests
    pub housekeeping_max_age_days: i64,

    /// Optional expiry for dispatched donor prompts
    pub notification_ttl_days: Option<i64>,

    /// Conflict-retry policy for the response upsert
    pub response_retry: RetryPolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            prune_on_list: true,
            debug_errors: false,
            housekeeping_max_age_days: DEFAULT_MAX_AGE_DAYS,
            notification_ttl_days: None,
            response_retry: RetryPolicy::default(),
        }
    }
}

/// Result envelope for a submitted blood request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// The created request's id
    pub request_id: RequestId,

    /// Notifications written by the dispatch
    pub notifications_sent: usize,

    /// Compatible, eligible donors found
    pub compatible_donors_found: usize,

    /// Human-readable result message
    pub message: String,
}

/// The blood-request matching service
pub struct BloodRequestService {
    auth: Arc<dyn AuthIdentity>,
    requests: Arc<dyn RequestStore>,
    dispatcher: NotificationDispatcher,
    handler: ResponseHandler,
    housekeeping: Housekeeping,
    prune_on_list: bool,
    debug_errors: bool,
}

impl BloodRequestService {
    /// Creates a service with default options
    pub fn new(
        auth: Arc<dyn AuthIdentity>,
        directory: Arc<dyn DonorDirectory>,
        requests: Arc<dyn RequestStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self::with_options(
            auth,
            directory,
            requests,
            notifications,
            ServiceOptions::default(),
        )
    }

    /// Creates a service with explicit options
    pub fn with_options(
        auth: Arc<dyn AuthIdentity>,
        directory: Arc<dyn DonorDirectory>,
        requests: Arc<dyn RequestStore>,
        notifications: Arc<dyn NotificationStore>,
        options: ServiceOptions,
    ) -> Self {
        let dispatcher = NotificationDispatcher::new(directory.clone(), notifications.clone())
            .with_ttl_days(options.notification_ttl_days);
        let handler = ResponseHandler::new(requests.clone(), notifications, directory)
            .with_retry_policy(options.response_retry.clone());
        let housekeeping = Housekeeping::new(requests.clone())
            .with_max_age_days(options.housekeeping_max_age_days);

        Self {
            auth,
            requests,
            dispatcher,
            handler,
            housekeeping,
            prune_on_list: options.prune_on_list,
            debug_errors: options.debug_errors,
        }
    }

    /// Submits a blood request and fans it out to compatible donors
    ///
    /// Validation fails fast with no side effects. Once the request is
    /// created, a dispatch failure is non-fatal: the request stands, the
    /// outcome reports zero notifications, and dispatch can be retried
    /// with [`redispatch_blood_request`].
    ///
    /// [`redispatch_blood_request`]: Self::redispatch_blood_request
    pub async fn submit_blood_request(&self, mut data: NewBloodRequest) -> Result<SubmitOutcome> {
        data.validate()?;
        data.requester_id = self.auth.current_user_id();

        let request = self.requests.create(data).await?;
        tracing::info!(
            request_id = %request.id,
            blood_group = %request.blood_group,
            urgency = %request.urgency_level,
            "Blood request submitted"
        );

        match self.dispatcher.dispatch(&request).await {
            Ok(summary) => Ok(SubmitOutcome {
                request_id: request.id,
                notifications_sent: summary.notifications_sent,
                compatible_donors_found: summary.compatible_donors,
                message: format!(
                    "Blood request submitted. {} compatible donor(s) notified.",
                    summary.notifications_sent
                ),
            }),
            Err(e) => {
                tracing::error!(
                    request_id = %request.id,
                    error = %e,
                    "Dispatch failed; request remains created"
                );
                let compatible = match &e {
                    CrossmatchError::DispatchFailed { compatible, .. } => *compatible,
                    _ => 0,
                };
                let mut message = "Blood request submitted, but donor notifications could not \
                                   be sent. Dispatch can be retried."
                    .to_string();
                if self.debug_errors {
                    message.push_str(&format!(" ({e})"));
                }
                Ok(SubmitOutcome {
                    request_id: request.id,
                    notifications_sent: 0,
                    compatible_donors_found: compatible,
                    message,
                })
            }
        }
    }

    /// Re-runs dispatch for an existing request
    ///
    /// Donors already holding a live prompt are skipped, so retries never
    /// double-notify.
    pub async fn redispatch_blood_request(&self, id: &RequestId) -> Result<DispatchSummary> {
        let request = self.get_blood_request(id).await?;
        self.dispatcher.dispatch(&request).await
    }

    /// Records the calling donor's response to a request
    pub async fn respond_to_blood_request(
        &self,
        request_id: &RequestId,
        donor_id: &UserId,
        choice: ResponseChoice,
        message: &str,
    ) -> Result<ResponseOutcome> {
        let caller = self.auth.current_user_id();
        self.handler
            .respond(caller.as_ref(), request_id, donor_id, choice, message)
            .await
    }

    /// Lists requests matching the filter, newest first
    ///
    /// Housekeeping runs opportunistically before the fetch when enabled;
    /// a pruning failure is logged and never fails the listing.
    pub async fn list_blood_requests(&self, filter: &RequestFilter) -> Result<Vec<BloodRequest>> {
        if self.prune_on_list {
            if let Err(e) = self.housekeeping.prune_stale_requests().await {
                tracing::warn!(error = %e, "Opportunistic pruning failed; continuing with list");
            }
        }
        self.requests.list(filter).await
    }

    /// Fetches a request by id
    pub async fn get_blood_request(&self, id: &RequestId) -> Result<BloodRequest> {
        self.requests.get(id).await.map_err(flatten_not_found)
    }

    /// Applies an admin status transition
    ///
    /// Fulfillment is an explicit admin action; accepting donors never
    /// triggers it.
    pub async fn update_blood_request_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        fulfilled: Option<bool>,
    ) -> Result<()> {
        self.requests
            .update_status(id, status, fulfilled)
            .await
            .map_err(flatten_not_found)?;
        Ok(())
    }

    /// Runs housekeeping explicitly
    pub async fn prune_stale_requests(&self) -> Result<usize> {
        self.housekeeping.prune_stale_requests().await
    }
}

/// Collapses collaborator not-found errors to the caller-facing variant
fn flatten_not_found(e: CrossmatchError) -> CrossmatchError {
    if e.is_not_found() {
        CrossmatchError::NotFound(e.to_string())
    } else {
        e
    }
}
