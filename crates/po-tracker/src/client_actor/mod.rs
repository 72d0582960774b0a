//! # Client Actor
//!
//! Registry of commissioning clients. Clients are referenced by purchase
//! orders and never cascade-deleted with them.

use crate::model::{Client, ClientCreate, ClientFilter, ClientId, ClientUpdate};
use actor_core::{ActorEntity, ResourceActor, ResourceClient};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("client code already taken: {0}")]
    CodeTaken(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}

#[async_trait]
impl ActorEntity for Client {
    type Id = ClientId;
    type Create = ClientCreate;
    type Update = ClientUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = ClientFilter;
    type Context = ();
    type Error = ClientError;

    fn from_create_params(id: ClientId, params: ClientCreate) -> Result<Self, Self::Error> {
        if params.code.trim().is_empty() {
            return Err(ClientError::Validation(
                "client code must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            code: params.code,
            name: params.name,
            contact_email: params.contact_email,
            contact_phone: params.contact_phone,
        })
    }

    fn matches_filter(&self, filter: &ClientFilter) -> bool {
        filter.code.as_deref().is_none_or(|code| self.code == code)
    }

    async fn on_update(&mut self, update: ClientUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.contact_email {
            self.contact_email = Some(email);
        }
        if let Some(phone) = update.contact_phone {
            self.contact_phone = Some(phone);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Creates the client actor and its generic client.
pub fn new() -> (ResourceActor<Client>, ResourceClient<Client>) {
    ResourceActor::new(16)
}
