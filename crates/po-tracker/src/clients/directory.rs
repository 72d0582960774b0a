//! Directory wrappers over the user and client registry actors.
//!
//! Both enforce uniqueness of their natural key (username, client code)
//! with a list-then-create check. The check and the create are two actor
//! round trips; with a single registrar driving each directory that gap is
//! unobservable.

use crate::client_actor::ClientError;
use crate::model::{
    Client, ClientCreate, ClientFilter, ClientId, User, UserCreate, UserFilter, UserId,
};
use crate::user_actor::UserError;
use actor_core::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::instrument;

/// Lookup and registration of users.
#[derive(Clone)]
pub struct UserDirectory {
    inner: ResourceClient<User>,
}

impl UserDirectory {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    fn from_framework(e: FrameworkError) -> UserError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<UserError>() {
                Ok(err) => *err,
                Err(other) => UserError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => UserError::ActorCommunication(other.to_string()),
        }
    }

    #[instrument(skip(self, params))]
    pub async fn register_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        let taken = self
            .find_by_username(&params.username)
            .await?
            .is_some();
        if taken {
            return Err(UserError::UsernameTaken(params.username));
        }
        self.inner
            .create(params)
            .await
            .map_err(Self::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError> {
        let matches = self
            .inner
            .list(UserFilter {
                username: Some(username.to_string()),
            })
            .await
            .map_err(Self::from_framework)?;
        Ok(matches.into_iter().next())
    }
}

#[async_trait]
impl ActorClient<User> for UserDirectory {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}

/// Lookup and registration of commissioning clients.
#[derive(Clone)]
pub struct ClientRegistry {
    inner: ResourceClient<Client>,
}

impl ClientRegistry {
    pub fn new(inner: ResourceClient<Client>) -> Self {
        Self { inner }
    }

    fn from_framework(e: FrameworkError) -> ClientError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<ClientError>() {
                Ok(err) => *err,
                Err(other) => ClientError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => ClientError::NotFound(id),
            other => ClientError::ActorCommunication(other.to_string()),
        }
    }

    #[instrument(skip(self, params))]
    pub async fn register_client(&self, params: ClientCreate) -> Result<ClientId, ClientError> {
        let taken = self.find_by_code(&params.code).await?.is_some();
        if taken {
            return Err(ClientError::CodeTaken(params.code));
        }
        self.inner
            .create(params)
            .await
            .map_err(Self::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Client>, ClientError> {
        let matches = self
            .inner
            .list(ClientFilter {
                code: Some(code.to_string()),
            })
            .await
            .map_err(Self::from_framework)?;
        Ok(matches.into_iter().next())
    }
}

#[async_trait]
impl ActorClient<Client> for ClientRegistry {
    type Error = ClientError;

    fn inner(&self) -> &ResourceClient<Client> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}
