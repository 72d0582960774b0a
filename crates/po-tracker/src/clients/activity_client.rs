//! # Activity Client
//!
//! Wraps the activity recorder's `ResourceClient` and owns the query shape:
//! equality filters, newest-first ordering, and the result cap.

use crate::activity_actor::ActivityError;
use crate::model::{ActivityCreate, ActivityEntry, ActivityFilter, ActivityId, Department, ItemId};
use actor_core::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Result cap applied when a query does not name its own limit.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Typed query accepted by [`ActivityClient::query`]. Only these predicates
/// exist; anything else cannot be expressed.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub department: Option<Department>,
    pub item_id: Option<ItemId>,
    pub limit: Option<usize>,
}

/// Client for the activity recorder actor.
#[derive(Clone)]
pub struct ActivityClient {
    inner: ResourceClient<ActivityEntry>,
}

impl ActivityClient {
    pub fn new(inner: ResourceClient<ActivityEntry>) -> Self {
        Self { inner }
    }

    fn from_framework(e: FrameworkError) -> ActivityError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<ActivityError>() {
                Ok(err) => *err,
                Err(other) => ActivityError::Persistence(other.to_string()),
            },
            other => ActivityError::Persistence(other.to_string()),
        }
    }

    /// Appends one entry. A failure here means the store is unavailable and
    /// the caller must abort the mutation the entry was describing.
    #[instrument(skip(self, params))]
    pub async fn record(&self, params: ActivityCreate) -> Result<ActivityId, ActivityError> {
        debug!(action = %params.action, "recording activity");
        self.inner
            .create(params)
            .await
            .map_err(Self::from_framework)
    }

    /// Entries matching the query, newest first (id as tiebreak), capped at
    /// `limit` or [`DEFAULT_QUERY_LIMIT`].
    #[instrument(skip(self))]
    pub async fn query(&self, query: ActivityQuery) -> Result<Vec<ActivityEntry>, ActivityError> {
        let filter = ActivityFilter {
            department: query.department,
            item_id: query.item_id,
        };
        let mut entries = self
            .inner
            .list(filter)
            .await
            .map_err(Self::from_framework)?;
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        entries.truncate(query.limit.unwrap_or(DEFAULT_QUERY_LIMIT));
        Ok(entries)
    }

    /// Removes every entry referencing `item_id`. Only the purchase-order
    /// cascade delete calls this; the log is otherwise append-only.
    #[instrument(skip(self))]
    pub async fn purge_item(&self, item_id: ItemId) -> Result<usize, ActivityError> {
        let filter = ActivityFilter {
            item_id: Some(item_id),
            ..ActivityFilter::default()
        };
        let entries = self
            .inner
            .list(filter)
            .await
            .map_err(Self::from_framework)?;
        let count = entries.len();
        for entry in entries {
            self.inner
                .delete(entry.id)
                .await
                .map_err(Self::from_framework)?;
        }
        Ok(count)
    }
}

#[async_trait]
impl ActorClient<ActivityEntry> for ActivityClient {
    type Error = ActivityError;

    fn inner(&self) -> &ResourceClient<ActivityEntry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}
