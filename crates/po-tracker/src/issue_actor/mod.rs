//! # Issue Actor
//!
//! Owns issue records and their one-way lifecycle. An issue is opened
//! against an existing item and can be resolved exactly once; both
//! transitions record an activity entry before any state is committed.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ActivityClient, ItemClient};
use crate::model::Issue;
use actor_core::{ResourceActor, ResourceClient};

/// Dependencies injected into the issue actor at `run()` time.
///
/// The item client is used read-only, to verify that the target item
/// exists and to scope activity entries to its purchase order.
#[derive(Clone)]
pub struct IssueContext {
    pub items: ItemClient,
    pub activity: ActivityClient,
}

/// Creates the issue actor and its generic client.
pub fn new() -> (ResourceActor<Issue>, ResourceClient<Issue>) {
    ResourceActor::new(32)
}
