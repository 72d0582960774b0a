//! The append-only activity log.
//!
//! Every accepted mutation produces exactly one [`ActivityEntry`] whose
//! payload snapshots the post-mutation state. Entries reference items and
//! purchase orders but do not own them: an entry survives if the item it
//! described is later purged (except under a PO cascade delete, which removes
//! the entries referencing the removed items first).

use crate::model::{Department, ItemId, PurchaseOrderId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for activity entries. Assigned monotonically, so id
/// order is a stable tiebreak for entries sharing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub u32);

impl From<u32> for ActivityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "activity_{}", self.0)
    }
}

/// What happened. `Display` renders the human description; `event_name`
/// gives the wire name used on realtime channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityAction {
    PoCreated,
    ItemCreated,
    TrackUpdated,
    IssueCreated,
    IssueResolved,
}

impl ActivityAction {
    /// Event name agreed by convention with realtime consumers.
    pub fn event_name(self) -> &'static str {
        match self {
            ActivityAction::PoCreated => "po-created",
            ActivityAction::ItemCreated => "item-created",
            ActivityAction::TrackUpdated => "track-updated",
            ActivityAction::IssueCreated => "issue-created",
            ActivityAction::IssueResolved => "issue-resolved",
        }
    }
}

impl Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let desc = match self {
            ActivityAction::PoCreated => "purchase order created",
            ActivityAction::ItemCreated => "item registered",
            ActivityAction::TrackUpdated => "department progress updated",
            ActivityAction::IssueCreated => "issue opened",
            ActivityAction::IssueResolved => "issue resolved",
        };
        f.write_str(desc)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: ActivityId,
    pub item_id: Option<ItemId>,
    /// Scopes the entry to a PO-level realtime channel when present.
    pub po_id: Option<PurchaseOrderId>,
    pub actor: UserId,
    pub department: Option<Department>,
    pub action: ActivityAction,
    /// Snapshot of the post-mutation state, as reported by the mutating actor.
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Payload for recording an entry. Timestamp and id are server-assigned.
#[derive(Debug, Clone)]
pub struct ActivityCreate {
    pub item_id: Option<ItemId>,
    pub po_id: Option<PurchaseOrderId>,
    pub actor: UserId,
    pub department: Option<Department>,
    pub action: ActivityAction,
    pub payload: serde_json::Value,
}

/// Equality predicates for activity queries.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub department: Option<Department>,
    pub item_id: Option<ItemId>,
}
