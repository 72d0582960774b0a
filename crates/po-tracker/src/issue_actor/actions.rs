//! The issue actor's domain action.

use crate::model::UserId;

#[derive(Debug, Clone)]
pub enum IssueAction {
    /// Close the issue. Fails if it was already resolved.
    Resolve { actor: UserId },
}
