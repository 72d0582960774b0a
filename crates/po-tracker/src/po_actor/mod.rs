//! # Purchase Order Actor
//!
//! Owns the PO aggregate root: the client reference, the human-assigned PO
//! number, and the registered item ids. Deleting a PO cascades through its
//! items in dependency order (activity entries, then issues, then the items
//! themselves) before the PO record is removed. Users and clients are never
//! part of the cascade.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ActivityClient, ClientRegistry, IssueClient, ItemClient};
use crate::model::PurchaseOrder;
use actor_core::{ResourceActor, ResourceClient};

/// Dependencies injected into the purchase order actor at `run()` time.
#[derive(Clone)]
pub struct PoContext {
    pub registry: ClientRegistry,
    pub items: ItemClient,
    pub issues: IssueClient,
    pub activity: ActivityClient,
}

/// Creates the purchase order actor and its generic client.
pub fn new() -> (ResourceActor<PurchaseOrder>, ResourceClient<PurchaseOrder>) {
    ResourceActor::new(32)
}
