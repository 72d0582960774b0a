//! # Issue Client
//!
//! High-level API for the issue actor. Owns the triage ordering: every
//! listing comes back open-first, then by priority, then newest-first.

use crate::issue_actor::{IssueAction, IssueError};
use crate::model::{Issue, IssueCreate, IssueFilter, IssueId, IssueStatus, ItemId, Priority, UserId};
use actor_core::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Typed query accepted by [`IssueClient::list_issues`].
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    pub status: Option<IssueStatus>,
    pub priority: Option<Priority>,
    pub item_id: Option<ItemId>,
}

/// Client for the issue actor.
#[derive(Clone)]
pub struct IssueClient {
    inner: ResourceClient<Issue>,
}

impl IssueClient {
    pub fn new(inner: ResourceClient<Issue>) -> Self {
        Self { inner }
    }

    fn from_framework(e: FrameworkError) -> IssueError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<IssueError>() {
                Ok(err) => *err,
                Err(other) => IssueError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => IssueError::NotFound(id),
            other => IssueError::ActorCommunication(other.to_string()),
        }
    }

    /// Opens an issue against an item. The priority arrives as a plain tag
    /// and is validated here, before any message reaches the actor.
    #[instrument(skip(self))]
    pub async fn create_issue(
        &self,
        item_id: ItemId,
        title: impl Into<String> + std::fmt::Debug,
        priority: &str,
        actor: UserId,
    ) -> Result<IssueId, IssueError> {
        let priority = priority
            .parse()
            .map_err(|e: crate::model::UnknownPriority| IssueError::InvalidPriority(e.0))?;
        self.inner
            .create(IssueCreate {
                item_id,
                title: title.into(),
                priority,
                actor,
            })
            .await
            .map_err(Self::from_framework)
    }

    /// Resolves an issue. Returns the issue as committed; fails with
    /// [`IssueError::AlreadyResolved`] on a second attempt.
    #[instrument(skip(self))]
    pub async fn resolve_issue(&self, id: IssueId, actor: UserId) -> Result<Issue, IssueError> {
        debug!(%id, "resolving issue");
        self.inner
            .perform_action(id, IssueAction::Resolve { actor })
            .await
            .map_err(Self::from_framework)
    }

    /// Issues matching the query, in triage order: open before resolved,
    /// high before medium before low, newest first (id as tiebreak).
    #[instrument(skip(self))]
    pub async fn list_issues(&self, query: IssueQuery) -> Result<Vec<Issue>, IssueError> {
        let filter = IssueFilter {
            status: query.status,
            priority: query.priority,
            item_id: query.item_id,
        };
        let mut issues = self
            .inner
            .list(filter)
            .await
            .map_err(Self::from_framework)?;
        issues.sort_by(|a, b| {
            a.status
                .rank()
                .cmp(&b.status.rank())
                .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(issues)
    }
}

#[async_trait]
impl ActorClient<Issue> for IssueClient {
    type Error = IssueError;

    fn inner(&self) -> &ResourceClient<Issue> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}
