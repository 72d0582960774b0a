//! Errors produced by the actor plumbing itself.
//!
//! Domain failures travel inside `EntityError`; wrapper clients unwrap them
//! back into their own error enums at the boundary.

/// Errors from the framework layer.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor's mailbox is closed (actor task has exited).
    #[error("actor closed")]
    ActorClosed,
    /// The actor dropped the response channel without answering.
    #[error("actor dropped response channel")]
    ActorDropped,
    /// No entity with the given id.
    #[error("not found: {0}")]
    NotFound(String),
    /// A failure raised by the entity's own hooks.
    #[error("entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
