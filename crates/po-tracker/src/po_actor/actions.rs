//! The purchase order actor's domain action.

use crate::model::ItemId;

#[derive(Debug, Clone)]
pub enum PoAction {
    /// Attach an already-created item to this PO. Idempotent for an id
    /// that is already registered.
    RegisterItem { item_id: ItemId },
}
