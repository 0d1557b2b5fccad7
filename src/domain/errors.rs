//! Domain error types
//!
//! Error hierarchy for Crossmatch. All errors are domain-specific and
//! don't expose third-party types; collaborator failures arrive through
//! the [`StoreError`] and [`DirectoryError`] taxonomies.

use thiserror::Error;

/// Main Crossmatch error type
///
/// This is the primary error type used throughout the crate. Variants map
/// onto the caller-facing failure classes: invalid input, missing entity,
/// authorization failure, recoverable dispatch failure and collaborator
/// errors.
#[derive(Debug, Error)]
pub enum CrossmatchError {
    /// Blood group outside the eight known values; client input error, never retried
    #[error("Invalid blood group: '{0}'")]
    InvalidBloodGroup(String),

    /// Request, donor or notification missing (404-equivalent)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Responder identity mismatch (403-equivalent), never retried automatically
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Notification batch write failed after the request was created;
    /// the request remains valid and dispatch may be retried
    #[error("Dispatch failed after request creation: {sent}/{compatible} notifications written")]
    DispatchFailed {
        /// Notifications written before the failure
        sent: usize,
        /// Compatible donors that were targeted
        compatible: usize,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request/notification store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Donor directory errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CrossmatchError {
    /// Whether this error means a requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CrossmatchError::NotFound(_)
                | CrossmatchError::Store(StoreError::NotFound(_))
                | CrossmatchError::Directory(DirectoryError::DonorNotFound(_))
        )
    }

    /// Whether retrying the failed operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CrossmatchError::DispatchFailed { .. } | CrossmatchError::Store(StoreError::Conflict(_))
        )
    }
}

/// Request/notification store errors
///
/// Failures surfaced by the persistence collaborators. The concrete store
/// backend translates its own error types into these.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document not found
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Concurrent update conflict; the upsert may be retried
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// Failed to write a document
    #[error("Failed to write document: {0}")]
    WriteFailed(String),

    /// Failed to query documents
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Failed to serialize or deserialize a document
    #[error("Failed to (de)serialize document: {0}")]
    Serialization(String),
}

/// Donor directory errors
///
/// Failures surfaced by the user-directory collaborator.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Donor not found
    #[error("Donor not found: {0}")]
    DonorNotFound(String),

    /// Directory query failed
    #[error("Directory query failed: {0}")]
    QueryFailed(String),

    /// Donor record could not be normalized into the strict shape
    #[error("Invalid donor record: {0}")]
    InvalidRecord(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CrossmatchError {
    fn from(err: std::io::Error) -> Self {
        CrossmatchError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CrossmatchError {
    fn from(err: serde_json::Error) -> Self {
        CrossmatchError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CrossmatchError {
    fn from(err: toml::de::Error) -> Self {
        CrossmatchError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrossmatchError::InvalidBloodGroup("X+".to_string());
        assert_eq!(err.to_string(), "Invalid blood group: 'X+'");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::Conflict("version mismatch".to_string());
        let err: CrossmatchError = store_err.into();
        assert!(matches!(err, CrossmatchError::Store(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_directory_error_conversion() {
        let dir_err = DirectoryError::DonorNotFound("donor-9".to_string());
        let err: CrossmatchError = dir_err.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_not_found_helper() {
        assert!(CrossmatchError::NotFound("request".to_string()).is_not_found());
        assert!(!CrossmatchError::Validation("units".to_string()).is_not_found());
    }

    #[test]
    fn test_dispatch_failed_is_retryable() {
        let err = CrossmatchError::DispatchFailed {
            sent: 0,
            compatible: 4,
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("0/4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CrossmatchError = io_err.into();
        assert!(matches!(err, CrossmatchError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CrossmatchError = json_err.into();
        assert!(matches!(err, CrossmatchError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("bad = toml = here").unwrap_err();
        let err: CrossmatchError = toml_err.into();
        assert!(matches!(err, CrossmatchError::Configuration(_)));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = CrossmatchError::Unauthorized("caller mismatch".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
