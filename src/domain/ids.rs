//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that cross the collaborator
//! boundaries. Each type rejects empty values and keeps request, user and
//! notification ids from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Blood request identifier newtype wrapper
///
/// Generated by the request store on creation (UUID v4), but any non-empty
/// string is accepted so external stores may bring their own id scheme.
///
/// # Examples
///
/// ```
/// use crossmatch::domain::ids::RequestId;
/// use std::str::FromStr;
///
/// let id = RequestId::from_str("9b2e9f3a-0c6f-4d19-9d0f-2f6a1a7c1a55").unwrap();
/// assert_eq!(id.as_str(), "9b2e9f3a-0c6f-4d19-9d0f-2f6a1a7c1a55");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a new RequestId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Request ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random RequestId
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the request ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier newtype wrapper
///
/// Identifies a registered platform user - a donor, a requester, or an
/// admin. The user directory is the authority on what the value means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Notification identifier newtype wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates a new NotificationId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Notification ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random NotificationId
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the notification ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NotificationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
