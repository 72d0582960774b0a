//! Items and their per-department progress tracks.
//!
//! An item is an aggregate: it owns one [`ItemTrack`] per department it has
//! passed through and any [`Delivery`] created when the terminal stage
//! completed. Keeping tracks and deliveries inside the aggregate means the
//! item actor commits a progress update, its derived overall progress, and a
//! possible delivery in one step.

use crate::model::{Department, PurchaseOrderId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Type-safe identifier for items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Progress record for one item within one department.
///
/// `progress` is a multiple of 5 in `[0, 100]` and never decreases over the
/// track's lifetime; the item actor enforces both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTrack {
    pub department: Department,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: UserId,
}

/// Created once when the terminal track reaches 100%. At most one per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub item_id: ItemId,
    pub destination: Option<String>,
    pub delivered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub po_id: PurchaseOrderId,
    pub name: String,
    pub specification: Option<String>,
    /// Where a delivery should go when the terminal stage completes.
    pub ship_to: Option<String>,
    /// One track per department, in workflow order.
    pub tracks: BTreeMap<Department, ItemTrack>,
    pub deliveries: Vec<Delivery>,
    /// Derived from `tracks` under the configured [`ProgressPolicy`];
    /// recomputed on every accepted update, never set directly.
    pub overall_progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Transient: who registered the item. Consumed by the creation audit
    /// hook and absent from snapshots.
    #[serde(skip)]
    pub(crate) registration_actor: Option<UserId>,
}

impl Item {
    pub fn has_delivery(&self) -> bool {
        !self.deliveries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub po_id: PurchaseOrderId,
    pub name: String,
    pub specification: Option<String>,
    pub ship_to: Option<String>,
    /// Who is registering the item; recorded on the audit trail.
    pub actor: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub po_id: Option<PurchaseOrderId>,
}

/// How an item's overall progress is derived from its department tracks.
///
/// The source milestone semantics are ambiguous on this point, so the policy
/// is explicit and injected into the item actor rather than hard-coded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressPolicy {
    /// Mean of the recorded non-terminal tracks until a delivery track
    /// exists; once it does, the delivery track's value dominates.
    #[default]
    TerminalDominant,
    /// Plain mean of every recorded track.
    MeanOfTracks,
}

impl ProgressPolicy {
    /// Derives overall progress from the recorded tracks. No tracks means 0.
    pub fn overall(self, tracks: &BTreeMap<Department, ItemTrack>) -> u8 {
        if tracks.is_empty() {
            return 0;
        }
        match self {
            ProgressPolicy::TerminalDominant => {
                if let Some(terminal) = tracks.get(&Department::Delivery) {
                    return terminal.progress;
                }
                mean(tracks.values().map(|t| t.progress))
            }
            ProgressPolicy::MeanOfTracks => mean(tracks.values().map(|t| t.progress)),
        }
    }
}

fn mean(values: impl Iterator<Item = u8>) -> u8 {
    let mut sum: u32 = 0;
    let mut count: u32 = 0;
    for v in values {
        sum += u32::from(v);
        count += 1;
    }
    if count == 0 {
        0
    } else {
        (sum / count) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(department: Department, progress: u8) -> ItemTrack {
        let now = Utc::now();
        ItemTrack {
            department,
            progress,
            created_at: now,
            updated_at: now,
            updated_by: UserId(1),
        }
    }

    fn tracks(entries: &[(Department, u8)]) -> BTreeMap<Department, ItemTrack> {
        entries
            .iter()
            .map(|&(d, p)| (d, track(d, p)))
            .collect()
    }

    #[test]
    fn no_tracks_means_zero() {
        assert_eq!(ProgressPolicy::TerminalDominant.overall(&BTreeMap::new()), 0);
    }

    #[test]
    fn terminal_dominant_averages_until_delivery_exists() {
        let t = tracks(&[(Department::Drafting, 100), (Department::Production, 50)]);
        assert_eq!(ProgressPolicy::TerminalDominant.overall(&t), 75);
    }

    #[test]
    fn terminal_dominant_follows_delivery_track() {
        let t = tracks(&[
            (Department::Drafting, 100),
            (Department::Production, 100),
            (Department::Delivery, 40),
        ]);
        assert_eq!(ProgressPolicy::TerminalDominant.overall(&t), 40);
    }

    #[test]
    fn mean_policy_includes_every_track() {
        let t = tracks(&[
            (Department::Drafting, 100),
            (Department::Production, 100),
            (Department::Delivery, 40),
        ]);
        assert_eq!(ProgressPolicy::MeanOfTracks.overall(&t), 80);
    }
}
