//! Domain model for the purchase-order tracking core.
//!
//! Pure data: entities, typed ids, create/update payloads, and typed list
//! filters. All behavior (validation, transitions, audit recording) lives in
//! the actor modules.
//!
//! Ownership: a [`PurchaseOrder`] owns its items; an [`Item`] owns its
//! per-department tracks and deliveries; issues and activity entries
//! reference items but live in their own aggregates.

pub mod activity;
pub mod client;
pub mod department;
pub mod issue;
pub mod item;
pub mod purchase_order;
pub mod user;

pub use activity::{
    ActivityAction, ActivityCreate, ActivityEntry, ActivityFilter, ActivityId,
};
pub use client::{Client, ClientCreate, ClientFilter, ClientId, ClientUpdate};
pub use department::{Department, UnknownDepartment};
pub use issue::{Issue, IssueCreate, IssueFilter, IssueId, IssueStatus, Priority, UnknownPriority};
pub use item::{
    Delivery, Item, ItemCreate, ItemFilter, ItemId, ItemTrack, ProgressPolicy,
};
pub use purchase_order::{
    PurchaseOrder, PurchaseOrderCreate, PurchaseOrderFilter, PurchaseOrderId,
};
pub use user::{User, UserCreate, UserFilter, UserId, UserUpdate};
