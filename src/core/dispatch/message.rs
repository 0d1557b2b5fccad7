//! Notification message templates
//!
//! Fixed, human-readable renderings for the three notification kinds. The
//! urgency-specific call to action in the donor prompt is part of the
//! product copy and must not drift.

use crate::domain::blood_group::UrgencyLevel;
use crate::domain::donor::Donor;
use crate::domain::request::{BloodRequest, DonorResponse};

/// Urgency-specific call to action appended to donor prompts
pub fn urgency_call_to_action(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::Critical => "CRITICAL: Immediate response needed!",
        UrgencyLevel::Urgent => "URGENT: Response needed within 24-48 hours",
        UrgencyLevel::Normal => "Your donation could save a life!",
    }
}

/// Renders the prompt sent to a compatible donor
pub fn blood_request_message(request: &BloodRequest, donor: &Donor) -> String {
    format!(
        "{patient} needs {units} unit(s) of {group} blood at {hospital}. \
         Your blood group ({donor_group}) is a compatible match. {cta}",
        patient = request.patient_name,
        units = request.units_required,
        group = request.blood_group,
        hospital = request.hospital_name,
        donor_group = donor.blood_group,
        cta = urgency_call_to_action(request.urgency_level),
    )
}

/// Renders the broadcast created when a donor accepts
///
/// This message is how the donor's contact details reach the requester.
pub fn donor_accepted_message(request: &BloodRequest, response: &DonorResponse) -> String {
    let mut message = format!(
        "{donor} ({group}) accepted the blood request for {patient} at {hospital} \
         (urgency: {urgency}). Contact: {email} / {phone}.",
        donor = response.donor_name,
        group = response.donor_blood_group,
        patient = request.patient_name,
        hospital = request.hospital_name,
        urgency = request.urgency_level,
        email = response.donor_email,
        phone = response.donor_phone,
    );
    if !response.message.trim().is_empty() {
        message.push_str(&format!(" Donor message: {}", response.message.trim()));
    }
    message
}

/// Renders the reminder sent back to an accepting donor
pub fn donation_reminder_message(request: &BloodRequest) -> String {
    let contact = if request.contact_person.trim().is_empty() {
        "the ward staff".to_string()
    } else {
        request.contact_person.clone()
    };
    format!(
        "Thank you for accepting! Please go to {hospital} for {patient}'s donation \
         ({units} unit(s) needed, urgency: {urgency}) and ask for {contact}.",
        hospital = request.hospital_name,
        patient = request.patient_name,
        units = request.units_required,
        urgency = request.urgency_level,
    )
}
