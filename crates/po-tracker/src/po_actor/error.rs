//! Error types for the purchase order actor.

use crate::item_actor::ItemError;
use thiserror::Error;

/// Failures of purchase order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PoError {
    /// Malformed input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// PO numbers are unique across the system.
    #[error("po number already taken: {0}")]
    PoNumberTaken(String),

    /// The commissioning client does not exist.
    #[error("client not found: {0}")]
    ClientNotFound(String),

    /// The referenced purchase order does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The activity store rejected the audit entry; the mutation was
    /// rolled back.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// A cascade step failed; the PO record is kept so the delete can be
    /// retried.
    #[error("cascade delete failed: {0}")]
    Cascade(String),

    /// Item-side failure during item registration.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// Failure in the actor plumbing itself.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}
