//! Demo walkthrough of the tracking system.
//!
//! Starts the full actor system, walks one item through the workflow from
//! drafting to delivery, raises and resolves an issue along the way, and
//! prints the realtime events and report summaries it produced.

use actor_core::tracing::setup_tracing;
use actor_core::ActorClient;
use po_tracker::clients::{ActivityQuery, IssueQuery, ItemDraft};
use po_tracker::model::{ClientCreate, ItemFilter, UserCreate};
use po_tracker::realtime::GLOBAL_CHANNEL;
use po_tracker::reports;
use po_tracker::TrackingSystem;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("starting po tracker demo");
    let system = TrackingSystem::new();

    // Watch the global channel while the demo runs.
    let mut events = system
        .realtime
        .subscribe(GLOBAL_CHANNEL)
        .await
        .map_err(|e| e.to_string())?;

    let user_id = system
        .users
        .register_user(UserCreate {
            username: "mwilson".to_string(),
            name: "Mary Wilson".to_string(),
            role: "production".to_string(),
            department: None,
            credential_hash: "demo-hash".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%user_id, "user registered");

    let client_id = system
        .clients
        .register_client(ClientCreate {
            code: "ACME".to_string(),
            name: "Acme Industrial".to_string(),
            contact_email: Some("orders@acme.example".to_string()),
            contact_phone: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%client_id, "client registered");

    let po_id = system
        .purchase_orders
        .create_purchase_order(client_id, "PO-1001", user_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(%po_id, "purchase order raised");

    let item_id = system
        .purchase_orders
        .add_item(
            po_id,
            ItemDraft {
                name: "pressure vessel".to_string(),
                specification: Some("ASME VIII, 12bar".to_string()),
                ship_to: Some("Acme plant 3".to_string()),
            },
            user_id,
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(%item_id, "item registered");

    // Walk the item through the workflow.
    for (department, value) in [
        ("drafting", 100),
        ("purchasing", 100),
        ("production", 50),
        ("production", 100),
        ("qc", 100),
        ("delivery", 100),
    ] {
        let update = system
            .items
            .update_progress(item_id, department, value, user_id)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            department,
            value,
            overall = update.overall_progress,
            delivery = update.delivery_created,
            "progress recorded"
        );
    }

    // Raise and resolve an issue mid-flight.
    let issue_id = system
        .issues
        .create_issue(item_id, "weld seam porosity", "high", user_id)
        .await
        .map_err(|e| e.to_string())?;
    system
        .issues
        .resolve_issue(issue_id, user_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(%issue_id, "issue raised and resolved");

    // Give the broadcaster a moment to fan out, then drain what arrived.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let mut delivered = 0;
    while let Ok(envelope) = events.try_recv() {
        delivered += 1;
        info!(event = %envelope.event, channel = %envelope.channel, "realtime event");
    }
    info!(delivered, "realtime events observed");

    // Read-side summaries.
    let items = system
        .items
        .list(ItemFilter {
            po_id: Some(po_id),
        })
        .await
        .map_err(|e| e.to_string())?;
    let issues = system
        .issues
        .list_issues(IssueQuery::default())
        .await
        .map_err(|e| e.to_string())?;
    let entries = system
        .activity
        .query(ActivityQuery::default())
        .await
        .map_err(|e| e.to_string())?;

    let po = system
        .purchase_orders
        .find_by_number("PO-1001")
        .await
        .map_err(|e| e.to_string())?
        .ok_or("po disappeared")?;

    info!(status = ?reports::po_status(&po, &items), "po status");
    info!(summary = ?reports::issue_summary(&issues), "issue summary");
    info!(
        throughput = ?reports::department_throughput(&entries),
        "department throughput"
    );

    system.shutdown().await?;
    info!("demo complete");
    Ok(())
}
