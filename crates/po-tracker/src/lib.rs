//! # PO Tracker
//!
//! Workflow tracking for manufactured purchase orders. Items move through
//! five departments (drafting, purchasing, production, qc, delivery); each
//! records milestone progress on its own track, issues are raised and
//! resolved against items, and every accepted mutation lands exactly one
//! entry on an append-only activity log before being broadcast to realtime
//! subscribers.
//!
//! The system is built from sequential actors, one per resource, on top of
//! the generic [`actor_core`] runtime:
//!
//! - [`model`] — plain data types and typed filters
//! - [`user_actor`], [`client_actor`] — registries for actors and clients
//! - [`item_actor`] — the workflow engine (tracks, overall progress, delivery)
//! - [`issue_actor`] — issue lifecycle, open to resolved exactly once
//! - [`po_actor`] — purchase order aggregate root and cascade delete
//! - [`activity_actor`] — append-only audit log with realtime outbox
//! - [`clients`] — typed wrappers and cross-actor orchestration
//! - [`realtime`] — best-effort channel fan-out
//! - [`reports`] — pure read-side summaries
//! - [`auth`] — credential-to-identity resolution
//! - [`lifecycle`] — system startup, wiring, and shutdown

pub mod activity_actor;
pub mod auth;
pub mod client_actor;
pub mod clients;
pub mod issue_actor;
pub mod item_actor;
pub mod lifecycle;
pub mod model;
pub mod po_actor;
pub mod realtime;
pub mod reports;
pub mod user_actor;

pub use lifecycle::TrackingSystem;
