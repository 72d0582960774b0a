//! Identity resolution for mutation actors.
//!
//! Every mutation names the user performing it; this module is how a caller
//! turns credentials into that user. Verification is a hash comparison
//! against the stored opaque hash; issuing and salting hashes is the
//! caller's business.

use crate::clients::UserDirectory;
use crate::model::{Department, UserId};
use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

/// An authenticated user, as seen by the rest of the system.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub role: String,
    pub department: Option<Department>,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// Unknown username, wrong credential, or deactivated account. One
    /// variant for all three so callers cannot probe which it was.
    #[error("unauthorized")]
    Unauthorized,

    /// The user directory was unreachable.
    #[error("directory unavailable: {0}")]
    Directory(String),
}

/// Trades credentials for an [`Identity`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<Identity, AuthError>;
}

/// [`IdentityProvider`] backed by the user directory actor.
#[derive(Clone)]
pub struct DirectoryAuth {
    directory: UserDirectory,
}

impl DirectoryAuth {
    pub fn new(directory: UserDirectory) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl IdentityProvider for DirectoryAuth {
    #[instrument(skip(self, credential_hash))]
    async fn authenticate(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<Identity, AuthError> {
        let user = self
            .directory
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Directory(e.to_string()))?
            .ok_or(AuthError::Unauthorized)?;

        if !user.active || user.credential_hash != credential_hash {
            return Err(AuthError::Unauthorized);
        }

        Ok(Identity {
            user_id: user.id,
            username: user.username,
            role: user.role,
            department: user.department,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use actor_core::mock::MockClient;

    fn user(active: bool) -> User {
        User {
            id: UserId(1),
            username: "mwilson".to_string(),
            name: "Mary Wilson".to_string(),
            role: "drafter".to_string(),
            department: Some(Department::Drafting),
            active,
            credential_hash: "hash-1".to_string(),
        }
    }

    #[tokio::test]
    async fn authenticates_an_active_user() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list().return_ok(vec![user(true)]);

        let auth = DirectoryAuth::new(UserDirectory::new(mock.client()));
        let identity = auth.authenticate("mwilson", "hash-1").await.unwrap();

        assert_eq!(identity.user_id, UserId(1));
        assert_eq!(identity.department, Some(Department::Drafting));
        mock.verify();
    }

    #[tokio::test]
    async fn inactive_user_is_unauthorized() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list().return_ok(vec![user(false)]);

        let auth = DirectoryAuth::new(UserDirectory::new(mock.client()));
        let result = auth.authenticate("mwilson", "hash-1").await;

        assert_eq!(result.unwrap_err(), AuthError::Unauthorized);
        mock.verify();
    }

    #[tokio::test]
    async fn wrong_credential_is_unauthorized() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list().return_ok(vec![user(true)]);

        let auth = DirectoryAuth::new(UserDirectory::new(mock.client()));
        let result = auth.authenticate("mwilson", "hash-2").await;

        assert_eq!(result.unwrap_err(), AuthError::Unauthorized);
        mock.verify();
    }
}
