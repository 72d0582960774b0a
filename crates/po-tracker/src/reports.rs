//! Read-side summaries computed over snapshots.
//!
//! These are pure functions: callers list the entities they need from the
//! actors and hand the snapshots in. Nothing here mutates or records.

use crate::model::{
    ActivityAction, ActivityEntry, Department, Issue, IssueStatus, Item, ItemId, Priority,
    PurchaseOrder,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Open/resolved counts, with the open ones broken down by priority.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct IssueSummary {
    pub open: usize,
    pub resolved: usize,
    pub open_high: usize,
    pub open_medium: usize,
    pub open_low: usize,
}

pub fn issue_summary(issues: &[Issue]) -> IssueSummary {
    let mut summary = IssueSummary::default();
    for issue in issues {
        match issue.status {
            IssueStatus::Resolved => summary.resolved += 1,
            IssueStatus::Open => {
                summary.open += 1;
                match issue.priority {
                    Priority::High => summary.open_high += 1,
                    Priority::Medium => summary.open_medium += 1,
                    Priority::Low => summary.open_low += 1,
                }
            }
        }
    }
    summary
}

/// An item that still has at least one open issue, joined with its PO number.
#[derive(Debug, Clone, Serialize)]
pub struct BlockedItem {
    pub item_id: ItemId,
    pub item_name: String,
    pub po_number: String,
    pub open_issues: usize,
}

/// Items with open issues, joined against their purchase orders. Items whose
/// PO is missing from `purchase_orders` are skipped.
pub fn items_with_open_issues(
    items: &[Item],
    issues: &[Issue],
    purchase_orders: &[PurchaseOrder],
) -> Vec<BlockedItem> {
    let po_numbers: BTreeMap<u32, &str> = purchase_orders
        .iter()
        .map(|po| (po.id.0, po.po_number.as_str()))
        .collect();

    let mut blocked = Vec::new();
    for item in items {
        let open_issues = issues
            .iter()
            .filter(|i| i.item_id == item.id && i.status == IssueStatus::Open)
            .count();
        if open_issues == 0 {
            continue;
        }
        let Some(po_number) = po_numbers.get(&item.po_id.0) else {
            continue;
        };
        blocked.push(BlockedItem {
            item_id: item.id,
            item_name: item.name.clone(),
            po_number: po_number.to_string(),
            open_issues,
        });
    }
    blocked
}

/// Progress updates recorded per department, from the activity log.
pub fn department_throughput(entries: &[ActivityEntry]) -> BTreeMap<Department, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        if entry.action != ActivityAction::TrackUpdated {
            continue;
        }
        if let Some(department) = entry.department {
            *counts.entry(department).or_insert(0) += 1;
        }
    }
    counts
}

/// Derived PO status. Never stored; recomputed from item snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoStatus {
    /// No work recorded on any item yet.
    Open,
    /// At least one track recorded, not every item delivered.
    InProgress,
    /// Every item has its delivery.
    Completed,
}

/// Status of one PO given its items' snapshots. `items` should be the PO's
/// own items; others are ignored.
pub fn po_status(po: &PurchaseOrder, items: &[Item]) -> PoStatus {
    let own: Vec<&Item> = items.iter().filter(|i| i.po_id == po.id).collect();
    if own.is_empty() || own.iter().all(|i| i.tracks.is_empty()) {
        return PoStatus::Open;
    }
    if own.iter().all(|i| i.has_delivery()) {
        return PoStatus::Completed;
    }
    PoStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClientId, Delivery, IssueId, PurchaseOrderId, UserId};
    use chrono::Utc;

    fn issue(id: u32, item: u32, status: IssueStatus, priority: Priority) -> Issue {
        Issue {
            id: IssueId(id),
            item_id: ItemId(item),
            title: format!("issue {}", id),
            priority,
            status,
            created_by: UserId(1),
            resolved_by: None,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    fn item(id: u32, po: u32, name: &str) -> Item {
        let now = Utc::now();
        Item {
            id: ItemId(id),
            po_id: PurchaseOrderId(po),
            name: name.to_string(),
            specification: None,
            ship_to: None,
            tracks: BTreeMap::new(),
            deliveries: Vec::new(),
            overall_progress: 0,
            created_at: now,
            updated_at: now,
            registration_actor: None,
        }
    }

    fn po(id: u32, number: &str) -> PurchaseOrder {
        let now = Utc::now();
        PurchaseOrder {
            id: PurchaseOrderId(id),
            client_id: ClientId(1),
            po_number: number.to_string(),
            item_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            registration_actor: None,
        }
    }

    fn track(department: Department, progress: u8) -> crate::model::ItemTrack {
        let now = Utc::now();
        crate::model::ItemTrack {
            department,
            progress,
            created_at: now,
            updated_at: now,
            updated_by: UserId(1),
        }
    }

    #[test]
    fn summary_counts_open_by_priority() {
        let issues = vec![
            issue(1, 1, IssueStatus::Open, Priority::High),
            issue(2, 1, IssueStatus::Open, Priority::Low),
            issue(3, 2, IssueStatus::Resolved, Priority::High),
        ];
        let summary = issue_summary(&issues);
        assert_eq!(summary.open, 2);
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.open_high, 1);
        assert_eq!(summary.open_low, 1);
        assert_eq!(summary.open_medium, 0);
    }

    #[test]
    fn blocked_items_join_po_numbers() {
        let items = vec![item(1, 10, "flange"), item(2, 10, "valve")];
        let issues = vec![
            issue(1, 1, IssueStatus::Open, Priority::High),
            issue(2, 2, IssueStatus::Resolved, Priority::High),
        ];
        let pos = vec![po(10, "PO-1001")];

        let blocked = items_with_open_issues(&items, &issues, &pos);
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].item_id, ItemId(1));
        assert_eq!(blocked[0].po_number, "PO-1001");
        assert_eq!(blocked[0].open_issues, 1);
    }

    #[test]
    fn po_status_progression() {
        let order = po(10, "PO-1001");

        let fresh = vec![item(1, 10, "flange")];
        assert_eq!(po_status(&order, &fresh), PoStatus::Open);

        let mut started = fresh.clone();
        started[0]
            .tracks
            .insert(Department::Drafting, track(Department::Drafting, 30));
        assert_eq!(po_status(&order, &started), PoStatus::InProgress);

        let mut done = started.clone();
        done[0].deliveries.push(Delivery {
            item_id: ItemId(1),
            destination: None,
            delivered_at: Utc::now(),
        });
        assert_eq!(po_status(&order, &done), PoStatus::Completed);
    }

    #[test]
    fn po_with_no_items_is_open() {
        let order = po(10, "PO-1001");
        assert_eq!(po_status(&order, &[]), PoStatus::Open);
    }
}
