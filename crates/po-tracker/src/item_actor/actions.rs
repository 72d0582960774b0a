//! The item actor's domain action.

use crate::model::{Department, ItemTrack, UserId};

/// Mutations beyond CRUD on the item aggregate.
#[derive(Debug, Clone)]
pub enum ItemAction {
    /// Record departmental progress. Creates the track on first touch.
    UpdateProgress {
        department: Department,
        value: u8,
        actor: UserId,
    },
}

/// Outcome of an accepted progress update.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// The track as committed.
    pub track: ItemTrack,
    /// Overall progress after the update, under the configured policy.
    pub overall_progress: u8,
    /// Whether this update created the item's delivery.
    pub delivery_created: bool,
    /// False when the submitted value equaled the stored one (idempotent
    /// resubmission: no mutation, no activity entry).
    pub changed: bool,
}
