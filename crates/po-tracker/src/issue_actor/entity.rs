//! [`ActorEntity`] implementation for [`Issue`].

use super::actions::IssueAction;
use super::error::IssueError;
use super::IssueContext;
use crate::model::{
    ActivityAction, ActivityCreate, Issue, IssueCreate, IssueFilter, IssueId, IssueStatus,
};
use actor_core::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

#[async_trait]
impl ActorEntity for Issue {
    type Id = IssueId;
    type Create = IssueCreate;
    type Update = ();
    type Action = IssueAction;
    type ActionResult = Issue;
    type Filter = IssueFilter;
    type Context = IssueContext;
    type Error = IssueError;

    fn from_create_params(id: IssueId, params: IssueCreate) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(IssueError::Validation(
                "issue title must not be empty".into(),
            ));
        }
        Ok(Self {
            id,
            item_id: params.item_id,
            title: params.title,
            priority: params.priority,
            status: IssueStatus::Open,
            created_by: params.actor,
            resolved_by: None,
            created_at: Utc::now(),
            resolved_at: None,
        })
    }

    fn matches_filter(&self, filter: &IssueFilter) -> bool {
        filter.status.is_none_or(|s| self.status == s)
            && filter.priority.is_none_or(|p| self.priority == p)
            && filter.item_id.is_none_or(|i| self.item_id == i)
    }

    async fn on_create(&mut self, ctx: &IssueContext) -> Result<(), Self::Error> {
        // The target item must exist; its purchase order scopes the entry.
        let item = ctx
            .items
            .get(self.item_id)
            .await
            .map_err(|e| IssueError::ActorCommunication(e.to_string()))?
            .ok_or_else(|| IssueError::ItemNotFound(self.item_id.to_string()))?;

        ctx.activity
            .record(ActivityCreate {
                item_id: Some(self.item_id),
                po_id: Some(item.po_id),
                actor: self.created_by,
                department: None,
                action: ActivityAction::IssueCreated,
                payload: json!({
                    "issue": self.id,
                    "item": self.item_id,
                    "title": self.title,
                    "priority": self.priority,
                }),
            })
            .await
            .map_err(|e| IssueError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &IssueContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: IssueAction,
        ctx: &IssueContext,
    ) -> Result<Issue, Self::Error> {
        match action {
            IssueAction::Resolve { actor } => {
                if self.status == IssueStatus::Resolved {
                    return Err(IssueError::AlreadyResolved);
                }

                let po_id = ctx
                    .items
                    .get(self.item_id)
                    .await
                    .map_err(|e| IssueError::ActorCommunication(e.to_string()))?
                    .map(|item| item.po_id);

                let now = Utc::now();
                ctx.activity
                    .record(ActivityCreate {
                        item_id: Some(self.item_id),
                        po_id,
                        actor,
                        department: None,
                        action: ActivityAction::IssueResolved,
                        payload: json!({
                            "issue": self.id,
                            "item": self.item_id,
                            "title": self.title,
                        }),
                    })
                    .await
                    .map_err(|e| IssueError::Persistence(e.to_string()))?;

                // Commit.
                self.status = IssueStatus::Resolved;
                self.resolved_by = Some(actor);
                self.resolved_at = Some(now);

                Ok(self.clone())
            }
        }
    }
}
