//! # Domain Clients
//!
//! Typed wrappers over the generic resource clients. Each wrapper owns a
//! boundary concern the actor should not: parsing loose tags into enums,
//! unwrapping framework errors back into domain errors, query ordering, and
//! cross-actor orchestration.

pub mod activity_client;
pub mod directory;
pub mod issue_client;
pub mod item_client;
pub mod po_client;

pub use activity_client::{ActivityClient, ActivityQuery, DEFAULT_QUERY_LIMIT};
pub use directory::{ClientRegistry, UserDirectory};
pub use issue_client::{IssueClient, IssueQuery};
pub use item_client::ItemClient;
pub use po_client::{ItemDraft, PurchaseOrderClient};
