//! End-to-end scenarios through the service facade
//!
//! Exercises the public operation surface the web/admin layers consume:
//! submit with dispatch, respond via the authenticated caller, listing
//! with filters and opportunistic pruning, and admin status transitions.

use crossmatch::adapters::{
    AuthIdentity, InMemoryDonorDirectory, InMemoryNotificationStore, InMemoryRequestStore,
    NotificationStore, StaticIdentity,
};
use crossmatch::core::{BloodRequestService, ServiceOptions};
use crossmatch::domain::{
    BloodGroup, CrossmatchError, Donor, NewBloodRequest, NotificationKind, RequestFilter,
    RequestStatus, ResponseChoice, UrgencyLevel, UserId,
};
use std::sync::Arc;

fn donor(id: &str, blood_group: BloodGroup) -> Donor {
    Donor::new(
        UserId::new(id).unwrap(),
        format!("Donor {id}"),
        format!("{id}@example.com"),
        "+10000000000",
        blood_group,
    )
}

fn request_data(blood_group: BloodGroup, urgency: UrgencyLevel) -> NewBloodRequest {
    NewBloodRequest::builder()
        .patient_name("Kofi Mensah")
        .blood_group(blood_group)
        .units_required(2)
        .urgency_level(urgency)
        .hospital_name("Ridge Hospital")
        .contact_person("Dr. Appiah")
        .build()
        .unwrap()
}

/// Identity that can be switched between callers mid-test
struct SwitchableIdentity(std::sync::Mutex<Option<UserId>>);

impl SwitchableIdentity {
    fn new() -> Self {
        Self(std::sync::Mutex::new(None))
    }

    fn switch_to(&self, user: &str) {
        *self.0.lock().unwrap() = Some(UserId::new(user).unwrap());
    }
}

impl AuthIdentity for SwitchableIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.0.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn test_submit_respond_close_full_flow() {
    let identity = Arc::new(SwitchableIdentity::new());
    let notifications = Arc::new(InMemoryNotificationStore::new());
    let service = BloodRequestService::new(
        identity.clone(),
        Arc::new(InMemoryDonorDirectory::with_donors(vec![
            donor("donor-1", BloodGroup::ONegative),
            donor("donor-2", BloodGroup::APositive),
        ])),
        Arc::new(InMemoryRequestStore::new()),
        notifications.clone(),
    );

    // Anonymous public submission.
    let outcome = service
        .submit_blood_request(request_data(BloodGroup::APositive, UrgencyLevel::Urgent))
        .await
        .unwrap();
    assert_eq!(outcome.compatible_donors_found, 2);
    assert_eq!(outcome.notifications_sent, 2);

    // Donor 1 accepts through their own session.
    identity.switch_to("donor-1");
    let donor_1 = UserId::new("donor-1").unwrap();
    let response = service
        .respond_to_blood_request(
            &outcome.request_id,
            &donor_1,
            ResponseChoice::Accepted,
            "on my way",
        )
        .await
        .unwrap();
    assert!(response.donor_response.contact_shared);

    // The request stays open; an admin closes it explicitly.
    let request = service.get_blood_request(&outcome.request_id).await.unwrap();
    assert_eq!(request.status, RequestStatus::Active);

    service
        .update_blood_request_status(&outcome.request_id, RequestStatus::Completed, Some(true))
        .await
        .unwrap();
    let closed = service.get_blood_request(&outcome.request_id).await.unwrap();
    assert!(closed.fulfilled);

    // Contact details crossed over via the global donor_accepted record.
    let admin_view = notifications
        .list_for_user(&UserId::new("any-admin").unwrap())
        .await
        .unwrap();
    assert!(admin_view
        .iter()
        .any(|n| n.kind == NotificationKind::DonorAccepted
            && n.message.contains("donor-1@example.com")));
}

#[tokio::test]
async fn test_respond_as_wrong_caller_is_unauthorized() {
    let identity = Arc::new(SwitchableIdentity::new());
    let service = BloodRequestService::new(
        identity.clone(),
        Arc::new(InMemoryDonorDirectory::with_donors(vec![donor(
            "donor-1",
            BloodGroup::APositive,
        )])),
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryNotificationStore::new()),
    );

    let outcome = service
        .submit_blood_request(request_data(BloodGroup::APositive, UrgencyLevel::Normal))
        .await
        .unwrap();

    identity.switch_to("impostor");
    let err = service
        .respond_to_blood_request(
            &outcome.request_id,
            &UserId::new("donor-1").unwrap(),
            ResponseChoice::Accepted,
            "",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CrossmatchError::Unauthorized(_)));
}

#[tokio::test]
async fn test_list_filters_by_blood_group_and_urgency() {
    let service = BloodRequestService::new(
        Arc::new(StaticIdentity::anonymous()),
        Arc::new(InMemoryDonorDirectory::new()),
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryNotificationStore::new()),
    );

    service
        .submit_blood_request(request_data(BloodGroup::APositive, UrgencyLevel::Critical))
        .await
        .unwrap();
    service
        .submit_blood_request(request_data(BloodGroup::ONegative, UrgencyLevel::Critical))
        .await
        .unwrap();
    service
        .submit_blood_request(request_data(BloodGroup::APositive, UrgencyLevel::Normal))
        .await
        .unwrap();

    let critical_a_pos = service
        .list_blood_requests(&RequestFilter {
            blood_group: Some(BloodGroup::APositive),
            urgency_level: Some(UrgencyLevel::Critical),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(critical_a_pos.len(), 1);

    let limited = service
        .list_blood_requests(&RequestFilter {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_submit_with_no_compatible_donors_still_succeeds() {
    let service = BloodRequestService::new(
        Arc::new(StaticIdentity::anonymous()),
        // Only a B+ donor; nobody can give to O-.
        Arc::new(InMemoryDonorDirectory::with_donors(vec![donor(
            "donor-1",
            BloodGroup::BPositive,
        )])),
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryNotificationStore::new()),
    );

    let outcome = service
        .submit_blood_request(request_data(BloodGroup::ONegative, UrgencyLevel::Critical))
        .await
        .unwrap();
    assert_eq!(outcome.compatible_donors_found, 0);
    assert_eq!(outcome.notifications_sent, 0);
    assert!(service.get_blood_request(&outcome.request_id).await.is_ok());
}

#[tokio::test]
async fn test_service_options_disable_prune_on_list() {
    let service = BloodRequestService::with_options(
        Arc::new(StaticIdentity::anonymous()),
        Arc::new(InMemoryDonorDirectory::new()),
        Arc::new(InMemoryRequestStore::new()),
        Arc::new(InMemoryNotificationStore::new()),
        ServiceOptions {
            prune_on_list: false,
            ..Default::default()
        },
    );

    // Just exercises the path; with pruning off the list call must not
    // touch housekeeping.
    let all = service
        .list_blood_requests(&RequestFilter::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}
