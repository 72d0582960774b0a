//! The [`ActorEntity`] contract that every actor-managed resource implements.
//!
//! Associated types keep the message surface fully typed: an item actor can
//! only receive item payloads, an issue actor only issue payloads. The hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`) are async so an
//! entity can call other actors through its injected `Context` — that is where
//! cross-resource validation and audit recording live.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract for a resource managed by a [`ResourceActor`](crate::ResourceActor).
///
/// The `Context` is injected at `run()` time, not construction time, so
/// actors can be created first and wired together afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. `From<u32>` lets the actor assign ids from its
    /// internal counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a new instance.
    type Create: Send + Sync + Debug;

    /// Payload for updating an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations beyond CRUD (e.g. a progress update).
    type Action: Send + Sync + Debug;

    /// Result type returned by [`ActorEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Typed predicate for list queries. Only fields enumerated here can be
    /// filtered on; unrecognized predicates cannot be expressed at all.
    type Filter: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. `()` if none.
    type Context: Send + Sync;

    /// Error type for this entity. One enum per actor; the union of every
    /// failure its operations can produce.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its assigned id and the create payload.
    /// Runs synchronously, before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity matches a list filter. A default-constructed
    /// filter is expected to match everything.
    fn matches_filter(&self, filter: &Self::Filter) -> bool;

    /// Called after construction, before the entity is stored. A failure here
    /// discards the entity, so validation and audit recording that must
    /// precede visibility belong in this hook.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed. A failure aborts the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
