//! Blood request aggregate
//!
//! [`BloodRequest`] is the aggregate root of the request lifecycle. It owns
//! its embedded [`DonorResponse`] list (keyed by donor id,
//! replace-on-respond) and enforces the status state machine: `active` may
//! move to `completed`, `cancelled` or `rejected`; terminal states admit no
//! further transition, and `fulfilled` is only valid together with
//! `completed`.

use super::blood_group::{BloodGroup, UrgencyLevel};
use super::donor::Donor;
use super::ids::{RequestId, UserId};
use crate::domain::errors::CrossmatchError;
use crate::domain::result::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a blood request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Open and dispatchable
    #[default]
    Active,
    /// Closed by an admin after enough units were secured
    Completed,
    /// Withdrawn by the requester or an admin
    Cancelled,
    /// Declined by an admin
    Rejected,
}

impl RequestStatus {
    /// Whether this status admits no further transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Active)
    }

    /// Whether a transition to `next` is allowed
    ///
    /// Active requests may move anywhere; terminal requests only admit the
    /// identity transition (idempotent re-apply).
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        !self.is_terminal() || *self == next
    }

    /// Returns the lowercase label, e.g. `"active"`
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Active => "active",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CrossmatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(RequestStatus::Active),
            "completed" => Ok(RequestStatus::Completed),
            "cancelled" => Ok(RequestStatus::Cancelled),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(CrossmatchError::Validation(format!(
                "Invalid request status '{other}'. Must be one of: active, completed, cancelled, rejected"
            ))),
        }
    }
}

/// A donor's reply to a blood request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseChoice {
    /// Willing to donate; shares contact details with the requester
    Accepted,
    /// Not available
    Declined,
    /// Undecided, may follow up
    Maybe,
}

impl ResponseChoice {
    /// Returns the lowercase label, e.g. `"accepted"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseChoice::Accepted => "accepted",
            ResponseChoice::Declined => "declined",
            ResponseChoice::Maybe => "maybe",
        }
    }
}

impl fmt::Display for ResponseChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseChoice {
    type Err = CrossmatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "accepted" => Ok(ResponseChoice::Accepted),
            "declined" => Ok(ResponseChoice::Declined),
            "maybe" => Ok(ResponseChoice::Maybe),
            other => Err(CrossmatchError::Validation(format!(
                "Invalid response '{other}'. Must be one of: accepted, declined, maybe"
            ))),
        }
    }
}

/// A recorded donor reply, embedded in the parent [`BloodRequest`]
///
/// Upserted by donor id into the request's response list; never deleted on
/// its own (deletion happens at the request level). `contact_shared` is
/// true exactly when the response is `accepted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorResponse {
    /// Responding donor's user id
    pub donor_id: UserId,

    /// Donor display name, snapshotted at response time
    pub donor_name: String,

    /// Donor contact email, snapshotted at response time
    pub donor_email: String,

    /// Donor contact phone, snapshotted at response time
    pub donor_phone: String,

    /// Donor blood group, snapshotted at response time
    pub donor_blood_group: BloodGroup,

    /// The reply itself
    pub response: ResponseChoice,

    /// Free-form message from the donor
    pub message: String,

    /// When the reply was recorded
    pub responded_at: DateTime<Utc>,

    /// Whether contact details were shared with the requester
    pub contact_shared: bool,
}

impl DonorResponse {
    /// Builds a response from a donor profile snapshot
    ///
    /// `contact_shared` is derived from the choice: only an accepted
    /// response shares the donor's contact details.
    pub fn from_donor(
        donor: &Donor,
        response: ResponseChoice,
        message: impl Into<String>,
        responded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            donor_id: donor.id.clone(),
            donor_name: donor.name.clone(),
            donor_email: donor.email.clone(),
            donor_phone: donor.phone.clone(),
            donor_blood_group: donor.blood_group,
            response,
            message: message.into(),
            responded_at,
            contact_shared: response == ResponseChoice::Accepted,
        }
    }
}

/// Input data for a new blood request, before the store assigns identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBloodRequest {
    /// Submitting user, if authenticated; None for anonymous/public submissions
    pub requester_id: Option<UserId>,

    /// Patient the blood is needed for
    pub patient_name: String,

    /// Blood group needed
    pub blood_group: BloodGroup,

    /// Units required, at least 1
    pub units_required: u32,

    /// Urgency of the request
    pub urgency_level: UrgencyLevel,

    /// Hospital where the donation is needed
    pub hospital_name: String,

    /// On-site contact person
    pub contact_person: String,

    /// Contact phone number
    pub contact_phone: String,

    /// Contact email address
    pub contact_email: String,

    /// Medical context for the request
    pub medical_reason: String,
}

impl NewBloodRequest {
    /// Creates a new builder for constructing a NewBloodRequest
    pub fn builder() -> NewBloodRequestBuilder {
        NewBloodRequestBuilder::new()
    }

    /// Validates the request data
    ///
    /// # Errors
    ///
    /// Returns a validation error if units is zero or a required text
    /// field is empty. Fails fast with no side effects.
    pub fn validate(&self) -> Result<()> {
        if self.units_required < 1 {
            return Err(CrossmatchError::Validation(
                "units_required must be at least 1".to_string(),
            ));
        }
        if self.patient_name.trim().is_empty() {
            return Err(CrossmatchError::Validation(
                "patient_name cannot be empty".to_string(),
            ));
        }
        if self.hospital_name.trim().is_empty() {
            return Err(CrossmatchError::Validation(
                "hospital_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for constructing [`NewBloodRequest`] instances
#[derive(Debug, Default)]
pub struct NewBloodRequestBuilder {
    requester_id: Option<UserId>,
    patient_name: Option<String>,
    blood_group: Option<BloodGroup>,
    units_required: u32,
    urgency_level: UrgencyLevel,
    hospital_name: Option<String>,
    contact_person: Option<String>,
    contact_phone: Option<String>,
    contact_email: Option<String>,
    medical_reason: Option<String>,
}

impl NewBloodRequestBuilder {
    /// Creates a new NewBloodRequestBuilder
    pub fn new() -> Self {
        Self {
            units_required: 1,
            ..Self::default()
        }
    }

    /// Sets the requester user id
    pub fn requester_id(mut self, requester_id: UserId) -> Self {
        self.requester_id = Some(requester_id);
        self
    }

    /// Sets the patient name
    pub fn patient_name(mut self, patient_name: impl Into<String>) -> Self {
        self.patient_name = Some(patient_name.into());
        self
    }

    /// Sets the blood group needed
    pub fn blood_group(mut self, blood_group: BloodGroup) -> Self {
        self.blood_group = Some(blood_group);
        self
    }

    /// Sets the units required
    pub fn units_required(mut self, units_required: u32) -> Self {
        self.units_required = units_required;
        self
    }

    /// Sets the urgency level
    pub fn urgency_level(mut self, urgency_level: UrgencyLevel) -> Self {
        self.urgency_level = urgency_level;
        self
    }

    /// Sets the hospital name
    pub fn hospital_name(mut self, hospital_name: impl Into<String>) -> Self {
        self.hospital_name = Some(hospital_name.into());
        self
    }

    /// Sets the contact person
    pub fn contact_person(mut self, contact_person: impl Into<String>) -> Self {
        self.contact_person = Some(contact_person.into());
        self
    }

    /// Sets the contact phone
    pub fn contact_phone(mut self, contact_phone: impl Into<String>) -> Self {
        self.contact_phone = Some(contact_phone.into());
        self
    }

    /// Sets the contact email
    pub fn contact_email(mut self, contact_email: impl Into<String>) -> Self {
        self.contact_email = Some(contact_email.into());
        self
    }

    /// Sets the medical reason
    pub fn medical_reason(mut self, medical_reason: impl Into<String>) -> Self {
        self.medical_reason = Some(medical_reason.into());
        self
    }

    /// Builds the NewBloodRequest
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or validation fails
    pub fn build(self) -> Result<NewBloodRequest> {
        let request = NewBloodRequest {
            requester_id: self.requester_id,
            patient_name: self
                .patient_name
                .ok_or_else(|| CrossmatchError::Validation("patient_name is required".into()))?,
            blood_group: self
                .blood_group
                .ok_or_else(|| CrossmatchError::Validation("blood_group is required".into()))?,
            units_required: self.units_required,
            urgency_level: self.urgency_level,
            hospital_name: self
                .hospital_name
                .ok_or_else(|| CrossmatchError::Validation("hospital_name is required".into()))?,
            contact_person: self.contact_person.unwrap_or_default(),
            contact_phone: self.contact_phone.unwrap_or_default(),
            contact_email: self.contact_email.unwrap_or_default(),
            medical_reason: self.medical_reason.unwrap_or_default(),
        };
        request.validate()?;
        Ok(request)
    }
}

/// A blood request, the aggregate root of the matching lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloodRequest {
    /// Store-assigned identifier
    pub id: RequestId,

    /// Submitting user, if authenticated
    pub requester_id: Option<UserId>,

    /// Patient the blood is needed for
    pub patient_name: String,

    /// Blood group needed
    pub blood_group: BloodGroup,

    /// Units required
    pub units_required: u32,

    /// Urgency of the request
    pub urgency_level: UrgencyLevel,

    /// Hospital where the donation is needed
    pub hospital_name: String,

    /// On-site contact person
    pub contact_person: String,

    /// Contact phone number
    pub contact_phone: String,

    /// Contact email address
    pub contact_email: String,

    /// Medical context for the request
    pub medical_reason: String,

    /// Lifecycle status
    pub status: RequestStatus,

    /// Whether the request has been fulfilled; implies `completed`
    pub fulfilled: bool,

    /// Donor replies, at most one per donor id
    pub donor_responses: Vec<DonorResponse>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl BloodRequest {
    /// Materializes a stored request from validated input data
    ///
    /// Initializes `status = active`, `fulfilled = false` and an empty
    /// response list. Intended for use by store implementations.
    pub fn create(id: RequestId, data: NewBloodRequest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            requester_id: data.requester_id,
            patient_name: data.patient_name,
            blood_group: data.blood_group,
            units_required: data.units_required,
            urgency_level: data.urgency_level,
            hospital_name: data.hospital_name,
            contact_person: data.contact_person,
            contact_phone: data.contact_phone,
            contact_email: data.contact_email,
            medical_reason: data.medical_reason,
            status: RequestStatus::Active,
            fulfilled: false,
            donor_responses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the recorded response for a donor, if any
    pub fn donor_response(&self, donor_id: &UserId) -> Option<&DonorResponse> {
        self.donor_responses
            .iter()
            .find(|r| &r.donor_id == donor_id)
    }

    /// Inserts or replaces the response for `response.donor_id`
    ///
    /// A donor may change their mind; the latest response wins and the
    /// list never holds two entries for the same donor. Bumps
    /// `updated_at`.
    pub fn upsert_donor_response(&mut self, response: DonorResponse, now: DateTime<Utc>) {
        match self
            .donor_responses
            .iter_mut()
            .find(|r| r.donor_id == response.donor_id)
        {
            Some(existing) => *existing = response,
            None => self.donor_responses.push(response),
        }
        self.updated_at = now;
    }

    /// Applies a status transition, optionally updating `fulfilled`
    ///
    /// # Errors
    ///
    /// Returns a validation error if the transition leaves a terminal
    /// state or would mark a non-completed request fulfilled.
    pub fn apply_status(
        &mut self,
        status: RequestStatus,
        fulfilled: Option<bool>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !self.status.can_transition_to(status) {
            return Err(CrossmatchError::Validation(format!(
                "Cannot transition request {} from {} to {}",
                self.id, self.status, status
            )));
        }

        let fulfilled = fulfilled.unwrap_or(self.fulfilled);
        if fulfilled && status != RequestStatus::Completed {
            return Err(CrossmatchError::Validation(format!(
                "Request {} cannot be fulfilled while {}",
                self.id, status
            )));
        }

        self.status = status;
        self.fulfilled = fulfilled;
        self.updated_at = now;
        Ok(())
    }

    /// Age of the request in whole days at `now`
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days()
    }

    /// Whether housekeeping may delete this request
    ///
    /// Only terminal `completed`/`rejected` requests older than
    /// `max_age_days` qualify; active requests are never pruned,
    /// regardless of age.
    pub fn is_prunable(&self, max_age_days: i64, now: DateTime<Utc>) -> bool {
        matches!(
            self.status,
            RequestStatus::Completed | RequestStatus::Rejected
        ) && now - self.created_at > Duration::days(max_age_days)
    }
}

/// Filter for listing blood requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Only requests with this status
    pub status: Option<RequestStatus>,

    /// Only requests needing this blood group
    pub blood_group: Option<BloodGroup>,

    /// Only requests at this urgency
    pub urgency_level: Option<UrgencyLevel>,

    /// Maximum number of requests to return
    pub limit: Option<usize>,
}

impl RequestFilter {
    /// Whether a request passes every set criterion
    pub fn matches(&self, request: &BloodRequest) -> bool {
        self.status.map_or(true, |s| request.status == s)
            && self.blood_group.map_or(true, |g| request.blood_group == g)
            && self
                .urgency_level
                .map_or(true, |u| request.urgency_level == u)
    }
}
