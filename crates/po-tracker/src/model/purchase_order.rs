//! Purchase orders own their items; their status is derived from item
//! progress by the read surface rather than stored.

use crate::model::{ClientId, ItemId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for purchase orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PurchaseOrderId(pub u32);

impl From<u32> for PurchaseOrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for PurchaseOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "po_{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub client_id: ClientId,
    /// Human-assigned PO number, unique across the system.
    pub po_number: String,
    /// Items owned by this PO, in registration order.
    pub item_ids: Vec<ItemId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Transient: who raised the PO. Consumed by the creation audit hook and
    /// absent from snapshots.
    #[serde(skip)]
    pub(crate) registration_actor: Option<UserId>,
}

#[derive(Debug, Clone)]
pub struct PurchaseOrderCreate {
    pub client_id: ClientId,
    pub po_number: String,
    /// Who raised the PO; recorded on the audit trail.
    pub actor: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    pub po_number: Option<String>,
    pub client_id: Option<ClientId>,
}
