//! # Activity Recorder
//!
//! The append-only source of truth for "what happened". Mutating actors
//! record an entry here *before* committing their own state, so a recording
//! failure aborts the whole operation and the audit trail never diverges
//! from entity state.
//!
//! After an entry is committed the recorder hands it to the realtime
//! broadcaster (outbox handoff, in [`entity`]): the durable write happens
//! first, the fire-and-forget publish second, and a transport outage can
//! never fail the write path.
//!
//! - [`entity`] — [`ActorEntity`](actor_core::ActorEntity) implementation
//!   for [`ActivityEntry`], including the append-only update rejection
//! - [`error`] — [`ActivityError`]
//! - [`new()`] — factory for the actor/client pair

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::ActivityEntry;
use actor_core::{ResourceActor, ResourceClient};

/// Creates the activity recorder actor and its generic client.
pub fn new() -> (ResourceActor<ActivityEntry>, ResourceClient<ActivityEntry>) {
    ResourceActor::new(64)
}
