//! # Item Client
//!
//! High-level API for the item actor. This is the boundary where loose
//! inputs become typed: an unknown department tag is rejected here, before
//! any message reaches the actor.

use crate::item_actor::{ItemAction, ItemError, ProgressUpdate};
use crate::model::{Item, ItemCreate, ItemId, UserId};
use actor_core::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the item actor.
#[derive(Clone)]
pub struct ItemClient {
    inner: ResourceClient<Item>,
}

impl ItemClient {
    pub fn new(inner: ResourceClient<Item>) -> Self {
        Self { inner }
    }

    fn from_framework(e: FrameworkError) -> ItemError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<ItemError>() {
                Ok(err) => *err,
                Err(other) => ItemError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => ItemError::NotFound(id),
            other => ItemError::ActorCommunication(other.to_string()),
        }
    }

    #[instrument(skip(self, params))]
    pub async fn create_item(&self, params: ItemCreate) -> Result<ItemId, ItemError> {
        debug!(name = %params.name, "creating item");
        self.inner
            .create(params)
            .await
            .map_err(Self::from_framework)
    }

    /// Records departmental progress for an item.
    ///
    /// The department arrives as a plain tag and is validated against the
    /// fixed enumeration before anything else happens.
    #[instrument(skip(self))]
    pub async fn update_progress(
        &self,
        id: ItemId,
        department: &str,
        value: u8,
        actor: UserId,
    ) -> Result<ProgressUpdate, ItemError> {
        let department = department
            .parse()
            .map_err(|e: crate::model::UnknownDepartment| ItemError::InvalidDepartment(e.0))?;
        debug!(%department, value, "updating progress");
        self.inner
            .perform_action(
                id,
                ItemAction::UpdateProgress {
                    department,
                    value,
                    actor,
                },
            )
            .await
            .map_err(Self::from_framework)
    }
}

#[async_trait]
impl ActorClient<Item> for ItemClient {
    type Error = ItemError;

    fn inner(&self) -> &ResourceClient<Item> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}
