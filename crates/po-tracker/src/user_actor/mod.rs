//! # User Actor
//!
//! A plain registry: users are created once and looked up by id or
//! username. No context dependencies, no audit entries; the directory
//! wrapper enforces username uniqueness before create.

use crate::model::{User, UserCreate, UserFilter, UserId, UserUpdate};
use actor_core::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("username already taken: {0}")]
    UsernameTaken(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = UserFilter;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        if params.username.trim().is_empty() {
            return Err(UserError::Validation("username must not be empty".into()));
        }
        Ok(Self {
            id,
            username: params.username,
            name: params.name,
            role: params.role,
            department: params.department,
            active: true,
            credential_hash: params.credential_hash,
        })
    }

    fn matches_filter(&self, filter: &UserFilter) -> bool {
        filter
            .username
            .as_deref()
            .is_none_or(|username| self.username == username)
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Creates the user actor and its generic client.
pub fn new() -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(16)
}
