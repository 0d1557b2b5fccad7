//! Authentication identity seam
//!
//! The web layer authenticates callers; the core only needs to know who
//! the current caller is, to stamp `requester_id` on submissions and to
//! authorize `respond` calls. [`StaticIdentity`] covers the harness and
//! tests; the production implementation wraps the platform's session
//! machinery.

use crate::domain::ids::UserId;

/// Provides the identity of the current caller
pub trait AuthIdentity: Send + Sync {
    /// The authenticated user id, or None for anonymous/public callers
    fn current_user_id(&self) -> Option<UserId>;
}

/// Fixed identity, for tests and the simulate harness
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user_id: Option<UserId>,
}

impl StaticIdentity {
    /// An anonymous caller
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// A caller authenticated as `user_id`
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

impl AuthIdentity for StaticIdentity {
    fn current_user_id(&self) -> Option<UserId> {
        self.user_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_identity() {
        assert!(StaticIdentity::anonymous().current_user_id().is_none());
    }

    #[test]
    fn test_user_identity() {
        let identity = StaticIdentity::user(UserId::new("requester-1").unwrap());
        assert_eq!(
            identity.current_user_id().unwrap().as_str(),
            "requester-1"
        );
    }
}
