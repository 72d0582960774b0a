//! Error type for the activity recorder.

use thiserror::Error;

/// Failures recording or querying activity entries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActivityError {
    /// The log is append-only; entries are never edited.
    #[error("activity entries are append-only")]
    AppendOnly,

    /// The recorder actor is unreachable. Callers treat this as a
    /// persistence failure and roll back the enclosing mutation.
    #[error("activity store unavailable: {0}")]
    Persistence(String),
}
