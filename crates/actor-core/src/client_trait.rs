//! Shared surface for resource-specific client wrappers.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Default `get`/`delete`/`list` for domain client wrappers.
///
/// A wrapper supplies access to its inner [`ResourceClient`] and a mapping
/// from [`FrameworkError`] into its own error type; the common read and
/// delete paths come for free.
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The wrapper's error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors into the wrapper's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// List entities matching a typed filter.
    #[tracing::instrument(skip(self, filter))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }
}
