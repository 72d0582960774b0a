//! Full-system tests: every actor real, wired through [`TrackingSystem`].

use actor_core::ActorClient;
use po_tracker::clients::{ActivityQuery, IssueQuery, ItemDraft};
use po_tracker::item_actor::ItemError;
use po_tracker::issue_actor::IssueError;
use po_tracker::model::{
    ClientCreate, ClientId, IssueStatus, ItemFilter, PurchaseOrderId, UserCreate, UserId,
};
use po_tracker::po_actor::PoError;
use po_tracker::realtime::{po_channel, GLOBAL_CHANNEL};
use po_tracker::reports;
use po_tracker::TrackingSystem;
use std::time::Duration;
use tokio::time::timeout;

async fn seed_user(system: &TrackingSystem, username: &str) -> UserId {
    system
        .users
        .register_user(UserCreate {
            username: username.to_string(),
            name: username.to_string(),
            role: "operator".to_string(),
            department: None,
            credential_hash: "hash".to_string(),
        })
        .await
        .unwrap()
}

async fn seed_client(system: &TrackingSystem, code: &str) -> ClientId {
    system
        .clients
        .register_client(ClientCreate {
            code: code.to_string(),
            name: format!("{} Ltd", code),
            contact_email: None,
            contact_phone: None,
        })
        .await
        .unwrap()
}

async fn next_event(
    rx: &mut tokio::sync::broadcast::Receiver<po_tracker::realtime::Envelope>,
) -> po_tracker::realtime::Envelope {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for realtime event")
        .expect("realtime channel closed")
}

#[tokio::test]
async fn workflow_produces_one_audit_entry_per_mutation() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "mwilson").await;
    let client = seed_client(&system, "ACME").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-1001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "flange".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    system
        .items
        .update_progress(item, "drafting", 50, user)
        .await
        .unwrap();
    system
        .items
        .update_progress(item, "drafting", 100, user)
        .await
        .unwrap();
    let issue = system
        .issues
        .create_issue(item, "surface scratch", "low", user)
        .await
        .unwrap();
    system.issues.resolve_issue(issue, user).await.unwrap();

    // po-created, item-created, 2x track-updated, issue-created,
    // issue-resolved: six mutations, six entries.
    let entries = system.activity.query(ActivityQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 6);

    // Entries come back newest first.
    assert!(entries.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // The idempotent resubmission adds nothing.
    let repeat = system
        .items
        .update_progress(item, "drafting", 100, user)
        .await
        .unwrap();
    assert!(!repeat.changed);
    let entries = system.activity.query(ActivityQuery::default()).await.unwrap();
    assert_eq!(entries.len(), 6);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn audit_snapshot_matches_committed_state() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "gkim").await;
    let client = seed_client(&system, "VANDELAY").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-9201", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "bracket".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    system
        .items
        .update_progress(item, "drafting", 100, user)
        .await
        .unwrap();
    system
        .items
        .update_progress(item, "production", 50, user)
        .await
        .unwrap();

    let snapshot = system.items.get(item).await.unwrap().unwrap();
    assert_eq!(snapshot.overall_progress, 75);

    // The newest entry's payload is the post-mutation state, field by field.
    let entries = system
        .activity
        .query(ActivityQuery {
            item_id: Some(item),
            ..ActivityQuery::default()
        })
        .await
        .unwrap();
    let newest = &entries[0];
    assert_eq!(newest.payload["department"], "production");
    assert_eq!(newest.payload["progress"], 50);
    assert_eq!(
        newest.payload["overallProgress"],
        u64::from(snapshot.overall_progress)
    );
    assert_eq!(newest.payload["deliveryCreated"], false);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn realtime_events_reach_global_and_po_channels() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "jchen").await;
    let client = seed_client(&system, "GLOBEX").await;

    let mut global_rx = system.realtime.subscribe(GLOBAL_CHANNEL).await.unwrap();

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-2001", user)
        .await
        .unwrap();
    let mut po_rx = system.realtime.subscribe(po_channel(po)).await.unwrap();

    assert_eq!(next_event(&mut global_rx).await.event, "po-created");

    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "valve".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();
    system
        .items
        .update_progress(item, "production", 30, user)
        .await
        .unwrap();

    assert_eq!(next_event(&mut global_rx).await.event, "item-created");
    let envelope = next_event(&mut global_rx).await;
    assert_eq!(envelope.event, "track-updated");
    assert_eq!(envelope.channel, GLOBAL_CHANNEL);
    assert_eq!(envelope.payload["action"], "track-updated");

    // The PO-scoped channel saw the same two events.
    assert_eq!(next_event(&mut po_rx).await.event, "item-created");
    assert_eq!(next_event(&mut po_rx).await.event, "track-updated");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn issue_listing_uses_triage_order() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "asilva").await;
    let client = seed_client(&system, "INITECH").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-3001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "manifold".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    let a = system
        .issues
        .create_issue(item, "issue a", "medium", user)
        .await
        .unwrap();
    let b = system
        .issues
        .create_issue(item, "issue b", "high", user)
        .await
        .unwrap();
    let c = system
        .issues
        .create_issue(item, "issue c", "high", user)
        .await
        .unwrap();
    system.issues.resolve_issue(c, user).await.unwrap();

    // Open before resolved, high before medium.
    let issues = system.issues.list_issues(IssueQuery::default()).await.unwrap();
    let ids: Vec<_> = issues.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![b, a, c]);

    // Status filter narrows the set without changing the order rule.
    let open = system
        .issues
        .list_issues(IssueQuery {
            status: Some(IssueStatus::Open),
            ..IssueQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(open.iter().map(|i| i.id).collect::<Vec<_>>(), vec![b, a]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn resolve_happens_exactly_once() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "tmori").await;
    let client = seed_client(&system, "UMBRELLA").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-4001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "housing".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    let issue = system
        .issues
        .create_issue(item, "casting void", "high", user)
        .await
        .unwrap();
    let resolved = system.issues.resolve_issue(issue, user).await.unwrap();
    let first_resolved_at = resolved.resolved_at.unwrap();

    let second = system.issues.resolve_issue(issue, user).await;
    assert_eq!(second.unwrap_err(), IssueError::AlreadyResolved);

    // The stored resolution is untouched.
    let stored = system.issues.get(issue).await.unwrap().unwrap();
    assert_eq!(stored.resolved_at, Some(first_resolved_at));
    assert_eq!(stored.resolved_by, Some(user));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn issue_against_missing_item_is_rejected() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "kowens").await;

    let result = system
        .issues
        .create_issue(po_tracker::model::ItemId(999), "ghost", "high", user)
        .await;
    assert!(matches!(result, Err(IssueError::ItemNotFound(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn po_numbers_are_unique() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "mlopez").await;
    let client = seed_client(&system, "WAYNE").await;

    system
        .purchase_orders
        .create_purchase_order(client, "PO-5001", user)
        .await
        .unwrap();
    let duplicate = system
        .purchase_orders
        .create_purchase_order(client, "PO-5001", user)
        .await;
    assert_eq!(
        duplicate.unwrap_err(),
        PoError::PoNumberTaken("PO-5001".to_string())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn po_for_missing_client_is_rejected() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "dpatel").await;

    let result = system
        .purchase_orders
        .create_purchase_order(ClientId(42), "PO-6001", user)
        .await;
    assert!(matches!(result, Err(PoError::ClientNotFound(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn cascade_delete_scopes_to_the_po() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "rbauer").await;
    let client = seed_client(&system, "STARK").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-7001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "turbine blade".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();
    system
        .items
        .update_progress(item, "drafting", 40, user)
        .await
        .unwrap();
    system
        .issues
        .create_issue(item, "blade chatter", "medium", user)
        .await
        .unwrap();

    system.purchase_orders.delete_purchase_order(po).await.unwrap();

    // Everything the PO owned is gone.
    assert!(system.purchase_orders.get(po).await.unwrap().is_none());
    assert!(system.items.get(item).await.unwrap().is_none());
    let issues = system
        .issues
        .list_issues(IssueQuery {
            item_id: Some(item),
            ..IssueQuery::default()
        })
        .await
        .unwrap();
    assert!(issues.is_empty());
    let entries = system
        .activity
        .query(ActivityQuery {
            item_id: Some(item),
            ..ActivityQuery::default()
        })
        .await
        .unwrap();
    assert!(entries.is_empty());

    // Users and clients are never part of the cascade.
    assert!(system
        .users
        .find_by_username("rbauer")
        .await
        .unwrap()
        .is_some());
    assert!(system.clients.find_by_code("STARK").await.unwrap().is_some());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn deleting_a_missing_po_reports_not_found() {
    let system = TrackingSystem::new();

    let result = system
        .purchase_orders
        .delete_purchase_order(PurchaseOrderId(404))
        .await;
    assert!(matches!(result, Err(PoError::NotFound(_))));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn concurrent_updates_serialize_through_the_actor() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "yli").await;
    let client = seed_client(&system, "HOOLI").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-8001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "gearbox".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for department in ["drafting", "purchasing", "production", "qc"] {
        let items = system.items.clone();
        tasks.push(tokio::spawn(async move {
            items.update_progress(item, department, 50, user).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let snapshot = system.items.get(item).await.unwrap().unwrap();
    assert_eq!(snapshot.tracks.len(), 4);
    assert!(snapshot.tracks.values().all(|t| t.progress == 50));
    assert_eq!(snapshot.overall_progress, 50);

    // Four updates, four entries (plus registration and po creation).
    let entries = system
        .activity
        .query(ActivityQuery {
            item_id: Some(item),
            ..ActivityQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(entries.len(), 5); // item-created + 4 track updates

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn progress_regression_on_fresh_track_keeps_first_value() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "pnovak").await;
    let client = seed_client(&system, "CYBERDYNE").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-9001", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "actuator".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();

    system
        .items
        .update_progress(item, "qc", 30, user)
        .await
        .unwrap();
    let result = system.items.update_progress(item, "qc", 25, user).await;
    assert!(matches!(result, Err(ItemError::ProgressRegression { .. })));

    let snapshot = system.items.get(item).await.unwrap().unwrap();
    assert_eq!(
        snapshot.tracks[&po_tracker::model::Department::Qc].progress,
        30
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn reports_reflect_the_live_system() {
    let system = TrackingSystem::new();
    let user = seed_user(&system, "fbell").await;
    let client = seed_client(&system, "OSCORP").await;

    let po = system
        .purchase_orders
        .create_purchase_order(client, "PO-9101", user)
        .await
        .unwrap();
    let item = system
        .purchase_orders
        .add_item(
            po,
            ItemDraft {
                name: "frame".to_string(),
                specification: None,
                ship_to: None,
            },
            user,
        )
        .await
        .unwrap();
    system
        .items
        .update_progress(item, "drafting", 60, user)
        .await
        .unwrap();
    system
        .issues
        .create_issue(item, "paint run", "low", user)
        .await
        .unwrap();

    let order = system
        .purchase_orders
        .find_by_number("PO-9101")
        .await
        .unwrap()
        .unwrap();
    let items = system
        .items
        .list(ItemFilter { po_id: Some(po) })
        .await
        .unwrap();
    let issues = system.issues.list_issues(IssueQuery::default()).await.unwrap();

    assert_eq!(reports::po_status(&order, &items), reports::PoStatus::InProgress);

    let summary = reports::issue_summary(&issues);
    assert_eq!(summary.open, 1);
    assert_eq!(summary.open_low, 1);

    let blocked = reports::items_with_open_issues(&items, &issues, &[order]);
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].po_number, "PO-9101");

    system.shutdown().await.unwrap();
}
