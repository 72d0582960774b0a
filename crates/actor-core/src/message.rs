//! Request messages exchanged between [`ResourceClient`](crate::ResourceClient)
//! and [`ResourceActor`](crate::ResourceActor).
//!
//! Each variant carries a oneshot responder; the actor answers exactly once
//! per request. The variants cover the resource lifecycle (CRUD), a typed
//! `List` query, and an `Action` escape hatch for domain operations.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Oneshot responder used by the actor to answer a request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to a resource actor.
///
/// Generic over `T: ActorEntity`, so payload types are checked at compile
/// time: an item-create payload cannot be addressed to the issue actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    /// Snapshot of every stored entity matching the typed filter. Ordering is
    /// unspecified; callers that need a particular order sort the result.
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
