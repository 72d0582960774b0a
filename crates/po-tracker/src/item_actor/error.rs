//! Error types for the item actor.

use crate::model::Department;
use thiserror::Error;

/// Failures of item operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemError {
    /// Malformed input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Department tag outside the fixed enumeration.
    #[error("unknown department: {0}")]
    InvalidDepartment(String),

    /// Progress must be a multiple of 5 in [0, 100].
    #[error("invalid progress value: {0} (must be a multiple of 5 in 0..=100)")]
    InvalidProgressValue(u8),

    /// Departments track forward-only completion; a lower value is rejected
    /// and the track keeps its stored value. Corrections need their own
    /// explicit action, not a silent decrease.
    #[error("progress regression in {department}: {requested} < {current}")]
    ProgressRegression {
        department: Department,
        current: u8,
        requested: u8,
    },

    /// The referenced item (or purchase order) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The activity store rejected the audit entry; the mutation was
    /// rolled back.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Failure in the actor plumbing itself.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}
