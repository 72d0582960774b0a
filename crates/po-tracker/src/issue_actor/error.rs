//! Error types for the issue actor.

use thiserror::Error;

/// Failures of issue operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IssueError {
    /// Malformed input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Priority tag outside {high, medium, low}.
    #[error("unknown priority: {0}")]
    InvalidPriority(String),

    /// Resolution happens exactly once; the stored resolution is kept.
    #[error("issue already resolved")]
    AlreadyResolved,

    /// The referenced issue does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The item the issue targets does not exist.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The activity store rejected the audit entry; the mutation was
    /// rolled back.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Failure in the actor plumbing itself.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}
