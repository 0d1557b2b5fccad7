//! Notification domain model
//!
//! Notifications are a separate aggregate that reference a blood request
//! by id only. Deleting a notification never touches the request. A
//! `blood_request` notification is the open prompt shown to a compatible
//! donor; it is deleted once that donor accepts (the action item is
//! resolved) and merely marked responded for declined/maybe.

use super::blood_group::{BloodGroup, UrgencyLevel};
use super::ids::{NotificationId, RequestId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Prompt to a compatible donor asking for a donation
    BloodRequest,
    /// Broadcast that a donor accepted, carrying their contact details
    DonorAccepted,
    /// Reminder to an accepting donor about where and when to show up
    DonationReminder,
}

impl NotificationKind {
    /// Returns the snake_case label, e.g. `"blood_request"`
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BloodRequest => "blood_request",
            NotificationKind::DonorAccepted => "donor_accepted",
            NotificationKind::DonationReminder => "donation_reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who a notification is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationAddress {
    /// A single user
    User(UserId),
    /// Visible to every admin-facing consumer
    Global,
}

impl NotificationAddress {
    /// The addressed user id, if this is a per-user notification
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            NotificationAddress::User(id) => Some(id),
            NotificationAddress::Global => None,
        }
    }

    /// Whether this notification is globally visible
    pub fn is_global(&self) -> bool {
        matches!(self, NotificationAddress::Global)
    }
}

/// A notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned identifier
    pub id: NotificationId,

    /// Recipient addressing
    pub address: NotificationAddress,

    /// Notification kind
    pub kind: NotificationKind,

    /// The referenced blood request (weak reference, never ownership)
    pub blood_request_id: RequestId,

    /// Human-readable message rendered from the fixed templates
    pub message: String,

    /// Blood group the request needs
    pub recipient_blood_group: Option<BloodGroup>,

    /// The addressed or accepting donor's blood group
    pub donor_blood_group: Option<BloodGroup>,

    /// Urgency of the referenced request
    pub urgency_level: Option<UrgencyLevel>,

    /// Hospital of the referenced request
    pub hospital_name: Option<String>,

    /// Units the referenced request needs
    pub units_required: Option<u32>,

    /// Patient of the referenced request
    pub patient_name: Option<String>,

    /// Whether the recipient has seen the notification
    pub read: bool,

    /// Whether the addressed donor has replied to the prompt
    pub responded: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Optional expiry; expired notifications are filtered on read,
    /// there is no background sweep
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Creates a new builder for constructing a Notification
    pub fn builder(kind: NotificationKind, blood_request_id: RequestId) -> NotificationBuilder {
        NotificationBuilder::new(kind, blood_request_id)
    }

    /// Whether the notification has expired at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Marks the prompt as replied to and seen
    pub fn mark_responded(&mut self) {
        self.responded = true;
        self.read = true;
    }
}

/// Builder for constructing [`Notification`] instances
#[derive(Debug)]
pub struct NotificationBuilder {
    address: NotificationAddress,
    kind: NotificationKind,
    blood_request_id: RequestId,
    message: String,
    recipient_blood_group: Option<BloodGroup>,
    donor_blood_group: Option<BloodGroup>,
    urgency_level: Option<UrgencyLevel>,
    hospital_name: Option<String>,
    units_required: Option<u32>,
    patient_name: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl NotificationBuilder {
    /// Creates a new builder; the address defaults to global
    pub fn new(kind: NotificationKind, blood_request_id: RequestId) -> Self {
        Self {
            address: NotificationAddress::Global,
            kind,
            blood_request_id,
            message: String::new(),
            recipient_blood_group: None,
            donor_blood_group: None,
            urgency_level: None,
            hospital_name: None,
            units_required: None,
            patient_name: None,
            expires_at: None,
        }
    }

    /// Addresses the notification to a single user
    pub fn to_user(mut self, user_id: UserId) -> Self {
        self.address = NotificationAddress::User(user_id);
        self
    }

    /// Addresses the notification globally
    pub fn global(mut self) -> Self {
        self.address = NotificationAddress::Global;
        self
    }

    /// Sets the rendered message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the blood group the request needs
    pub fn recipient_blood_group(mut self, group: BloodGroup) -> Self {
        self.recipient_blood_group = Some(group);
        self
    }

    /// Sets the donor's blood group
    pub fn donor_blood_group(mut self, group: BloodGroup) -> Self {
        self.donor_blood_group = Some(group);
        self
    }

    /// Sets the urgency level
    pub fn urgency_level(mut self, urgency: UrgencyLevel) -> Self {
        self.urgency_level = Some(urgency);
        self
    }

    /// Sets the hospital name
    pub fn hospital_name(mut self, hospital: impl Into<String>) -> Self {
        self.hospital_name = Some(hospital.into());
        self
    }

    /// Sets the units required
    pub fn units_required(mut self, units: u32) -> Self {
        self.units_required = Some(units);
        self
    }

    /// Sets the patient name
    pub fn patient_name(mut self, patient: impl Into<String>) -> Self {
        self.patient_name = Some(patient.into());
        self
    }

    /// Sets the expiry timestamp
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }

    /// Builds the Notification with a generated id, unread and unresponded
    pub fn build(self, now: DateTime<Utc>) -> Notification {
        Notification {
            id: NotificationId::generate(),
            address: self.address,
            kind: self.kind,
            blood_request_id: self.blood_request_id,
            message: self.message,
            recipient_blood_group: self.recipient_blood_group,
            donor_blood_group: self.donor_blood_group,
            urgency_level: self.urgency_level,
            hospital_name: self.hospital_name,
            units_required: self.units_required,
            patient_name: self.patient_name,
            read: false,
            responded: false,
            created_at: now,
            expires_at: self.expires_at,
        }
    }
}
