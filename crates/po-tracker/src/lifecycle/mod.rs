//! Runtime orchestration: starting, wiring, and stopping the actor system.
//!
//! Actors are created first and started afterwards with their contexts
//! injected, so the dependency graph is wired without circular construction.
//! The graph is acyclic by design:
//!
//! ```text
//! po actor ──> item actor ──> activity actor ──> broadcaster task
//!     │              ^               ^
//!     └──> issue actor ──────────────┘
//! ```
//!
//! Shutdown drops every client handle; each actor drains its mailbox, exits,
//! and drops its own context clients, which closes the next actor down the
//! graph.

use crate::clients::{
    ActivityClient, ClientRegistry, IssueClient, ItemClient, PurchaseOrderClient, UserDirectory,
};
use crate::issue_actor::IssueContext;
use crate::item_actor::ItemContext;
use crate::model::ProgressPolicy;
use crate::po_actor::PoContext;
use crate::realtime::{RealtimeBroadcaster, RealtimeHandle};
use crate::{activity_actor, client_actor, issue_actor, item_actor, po_actor, user_actor};
use tracing::{error, info};

const REALTIME_BUFFER: usize = 256;

/// The running tracking system: one task per actor plus the broadcaster,
/// and a typed client for each.
pub struct TrackingSystem {
    pub users: UserDirectory,
    pub clients: ClientRegistry,
    pub purchase_orders: PurchaseOrderClient,
    pub items: ItemClient,
    pub issues: IssueClient,
    pub activity: ActivityClient,
    pub realtime: RealtimeHandle,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl TrackingSystem {
    /// Starts the system with the default progress policy.
    pub fn new() -> Self {
        Self::with_policy(ProgressPolicy::default())
    }

    /// Starts every actor and wires the dependency graph.
    pub fn with_policy(policy: ProgressPolicy) -> Self {
        // Leaf first: the broadcaster has no dependencies.
        let (broadcaster, realtime) = RealtimeBroadcaster::new(REALTIME_BUFFER);
        let broadcaster_handle = tokio::spawn(broadcaster.run());

        let (activity_actor, activity_resource) = activity_actor::new();
        let activity_handle = tokio::spawn(activity_actor.run(realtime.clone()));
        let activity = ActivityClient::new(activity_resource);

        let (item_actor, item_resource) = item_actor::new();
        let item_handle = tokio::spawn(item_actor.run(ItemContext {
            activity: activity.clone(),
            policy,
        }));
        let items = ItemClient::new(item_resource);

        let (issue_actor, issue_resource) = issue_actor::new();
        let issue_handle = tokio::spawn(issue_actor.run(IssueContext {
            items: items.clone(),
            activity: activity.clone(),
        }));
        let issues = IssueClient::new(issue_resource);

        let (user_actor, user_resource) = user_actor::new();
        let user_handle = tokio::spawn(user_actor.run(()));
        let users = UserDirectory::new(user_resource);

        let (client_actor, client_resource) = client_actor::new();
        let client_handle = tokio::spawn(client_actor.run(()));
        let clients = ClientRegistry::new(client_resource);

        let (po_actor, po_resource) = po_actor::new();
        let po_handle = tokio::spawn(po_actor.run(PoContext {
            registry: clients.clone(),
            items: items.clone(),
            issues: issues.clone(),
            activity: activity.clone(),
        }));
        let purchase_orders = PurchaseOrderClient::new(po_resource, items.clone());

        info!("tracking system started");

        Self {
            users,
            clients,
            purchase_orders,
            items,
            issues,
            activity,
            realtime,
            handles: vec![
                po_handle,
                issue_handle,
                item_handle,
                user_handle,
                client_handle,
                activity_handle,
                broadcaster_handle,
            ],
        }
    }

    /// Gracefully stops the system.
    ///
    /// Dropping the clients closes the actor mailboxes; actors exit after
    /// draining them, releasing their context clients, and the closure
    /// propagates down to the broadcaster. Handles are awaited in dependency
    /// order so a panic anywhere surfaces as an error.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("shutting down tracking system");

        drop(self.purchase_orders);
        drop(self.issues);
        drop(self.items);
        drop(self.users);
        drop(self.clients);
        drop(self.activity);
        drop(self.realtime);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "actor task failed");
                return Err(format!("actor task failed: {:?}", e));
            }
        }

        info!("tracking system shutdown complete");
        Ok(())
    }
}

impl Default for TrackingSystem {
    fn default() -> Self {
        Self::new()
    }
}
