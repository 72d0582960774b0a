//! # Item Actor
//!
//! The workflow engine for one item aggregate: per-department progress
//! tracks, the derived overall progress, and the delivery side effect.
//!
//! All mutation goes through [`ItemAction::UpdateProgress`], which enforces
//! the milestone semantics: values step by 5 in `[0, 100]` and never
//! regress. Reaching 100 on the terminal department creates the item's
//! single [`Delivery`](crate::model::Delivery) in the same commit.
//!
//! Every accepted mutation records exactly one activity entry *before* the
//! aggregate state is committed; a recording failure aborts the update and
//! the item is left exactly as it was.
//!
//! - [`actions`] — [`ItemAction`] and its [`ProgressUpdate`] result
//! - [`entity`] — [`ActorEntity`](actor_core::ActorEntity) implementation
//! - [`error`] — [`ItemError`]
//! - [`new()`] — factory for the actor/client pair

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ActivityClient;
use crate::model::{Item, ProgressPolicy};
use actor_core::{ResourceActor, ResourceClient};

/// Dependencies injected into the item actor at `run()` time.
#[derive(Clone)]
pub struct ItemContext {
    pub activity: ActivityClient,
    pub policy: ProgressPolicy,
}

/// Creates the item actor and its generic client.
pub fn new() -> (ResourceActor<Item>, ResourceClient<Item>) {
    ResourceActor::new(32)
}
