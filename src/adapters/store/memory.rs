//! In-memory document-store implementations
//!
//! Reference implementations of [`RequestStore`] and [`NotificationStore`]
//! backed by a `tokio::sync::RwLock` map. Document mutation happens under
//! the write lock, so per-document read-modify-write (the donor-response
//! upsert in particular) is serialized exactly as the contracts require.
//! Used by the simulate harness and as the test backend.

use super::traits::{NotificationStore, RequestStore};
use crate::domain::errors::StoreError;
use crate::domain::ids::{NotificationId, RequestId, UserId};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::request::{
    BloodRequest, DonorResponse, NewBloodRequest, RequestFilter, RequestStatus,
};
use crate::domain::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory [`RequestStore`]
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    documents: RwLock<HashMap<RequestId, BloodRequest>>,
}

impl InMemoryRequestStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing requests (fixtures)
    pub fn with_requests(requests: Vec<BloodRequest>) -> Self {
        let map = requests.into_iter().map(|r| (r.id.clone(), r)).collect();
        Self {
            documents: RwLock::new(map),
        }
    }

    /// Number of stored requests
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn create(&self, data: NewBloodRequest) -> Result<BloodRequest> {
        let request = BloodRequest::create(RequestId::generate(), data, Utc::now());
        let mut documents = self.documents.write().await;
        documents.insert(request.id.clone(), request.clone());
        tracing::debug!(request_id = %request.id, "Created blood request");
        Ok(request)
    }

    async fn get(&self, id: &RequestId) -> Result<BloodRequest> {
        let documents = self.documents.read().await;
        documents
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("blood request {id}")).into())
    }

    async fn list(&self, filter: &RequestFilter) -> Result<Vec<BloodRequest>> {
        let documents = self.documents.read().await;
        let mut requests: Vec<BloodRequest> = documents
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            requests.truncate(limit);
        }
        Ok(requests)
    }

    async fn upsert_donor_response(
        &self,
        id: &RequestId,
        response: DonorResponse,
    ) -> Result<BloodRequest> {
        // Write lock held across the read-modify-write; concurrent upserts
        // for the same request are serialized here.
        let mut documents = self.documents.write().await;
        let request = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("blood request {id}")))?;
        request.upsert_donor_response(response, Utc::now());
        Ok(request.clone())
    }

    async fn update_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
        fulfilled: Option<bool>,
    ) -> Result<BloodRequest> {
        let mut documents = self.documents.write().await;
        let request = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("blood request {id}")))?;
        request.apply_status(status, fulfilled, Utc::now())?;
        tracing::debug!(request_id = %id, status = %status, "Updated request status");
        Ok(request.clone())
    }

    async fn delete(&self, id: &RequestId) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("blood request {id}")).into())
    }

    async fn delete_if_stale_and_terminal(&self, max_age_days: i64) -> Result<usize> {
        let now = Utc::now();
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, request| !request.is_prunable(max_age_days, now));
        Ok(before - documents.len())
    }
}

/// In-memory [`NotificationStore`]
#[derive(Debug, Default)]
pub struct InMemoryNotificationStore {
    documents: RwLock<HashMap<NotificationId, Notification>>,
}

impl InMemoryNotificationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications, expired ones included
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn create(&self, notification: Notification) -> Result<Notification> {
        let mut documents = self.documents.write().await;
        documents.insert(notification.id.clone(), notification.clone());
        Ok(notification)
    }

    async fn create_batch(&self, notifications: Vec<Notification>) -> Result<usize> {
        // Single write-lock acquisition makes the batch all-or-nothing.
        let mut documents = self.documents.write().await;
        let count = notifications.len();
        for notification in notifications {
            documents.insert(notification.id.clone(), notification);
        }
        Ok(count)
    }

    async fn mark_responded(&self, request_id: &RequestId, user_id: &UserId) -> Result<()> {
        let mut documents = self.documents.write().await;
        for notification in documents.values_mut() {
            if notification.kind == NotificationKind::BloodRequest
                && &notification.blood_request_id == request_id
                && notification.address.user_id() == Some(user_id)
            {
                notification.mark_responded();
            }
        }
        Ok(())
    }

    async fn delete_by_request_and_user(
        &self,
        request_id: &RequestId,
        user_id: &UserId,
    ) -> Result<usize> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|_, n| {
            !(n.kind == NotificationKind::BloodRequest
                && &n.blood_request_id == request_id
                && n.address.user_id() == Some(user_id))
        });
        Ok(before - documents.len())
    }

    async fn list_for_request(&self, request_id: &RequestId) -> Result<Vec<Notification>> {
        let now = Utc::now();
        let documents = self.documents.read().await;
        let mut notifications: Vec<Notification> = documents
            .values()
            .filter(|n| &n.blood_request_id == request_id && !n.is_expired(now))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(notifications)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Notification>> {
        let now = Utc::now();
        let documents = self.documents.read().await;
        let mut notifications: Vec<Notification> = documents
            .values()
            .filter(|n| {
                (n.address.user_id() == Some(user_id) || n.address.is_global())
                    && !n.is_expired(now)
            })
            .cloned()
            .collect();
        notifications.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(notifications)
    }
}
