//! # actor-core
//!
//! Generic building blocks for type-safe resource actors.
//!
//! Every stateful resource in the system (purchase orders, items, issues,
//! activity entries, ...) is owned by exactly one [`ResourceActor`] running in
//! its own Tokio task. The actor processes messages sequentially, which is the
//! single-writer-per-entity guarantee: no locks, no interleaved mutations.
//! Callers talk to an actor through a cloneable [`ResourceClient`].
//!
//! The three layers:
//!
//! 1. **Entity** ([`ActorEntity`]) — domain state and lifecycle hooks.
//! 2. **Runtime** ([`ResourceActor`]) — the sequential message loop.
//! 3. **Interface** ([`ResourceClient`] / [`ActorClient`]) — typed async API.
//!
//! Dependencies between actors are injected late, via `actor.run(context)`,
//! so the dependency graph is wired at startup without circular construction.
//!
//! For testing, the [`mock`] module provides `MockClient`, an in-memory stand-in
//! that satisfies the same API as a live client.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
