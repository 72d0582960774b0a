//! [`ActorEntity`] implementation for [`PurchaseOrder`].
//!
//! `on_delete` is the cascade: per registered item it removes activity
//! entries, then issues, then the item itself (which carries its tracks and
//! deliveries), and only then does the framework drop the PO record. Users
//! and clients are untouched.

use super::actions::PoAction;
use super::error::PoError;
use super::PoContext;
use crate::clients::IssueQuery;
use crate::model::{
    ActivityAction, ActivityCreate, PurchaseOrder, PurchaseOrderCreate, PurchaseOrderFilter,
    PurchaseOrderId,
};
use actor_core::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

#[async_trait]
impl ActorEntity for PurchaseOrder {
    type Id = PurchaseOrderId;
    type Create = PurchaseOrderCreate;
    type Update = ();
    type Action = PoAction;
    type ActionResult = ();
    type Filter = PurchaseOrderFilter;
    type Context = PoContext;
    type Error = PoError;

    fn from_create_params(id: PurchaseOrderId, params: PurchaseOrderCreate) -> Result<Self, Self::Error> {
        if params.po_number.trim().is_empty() {
            return Err(PoError::Validation("po number must not be empty".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            client_id: params.client_id,
            po_number: params.po_number,
            item_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            registration_actor: Some(params.actor),
        })
    }

    fn matches_filter(&self, filter: &PurchaseOrderFilter) -> bool {
        filter
            .po_number
            .as_deref()
            .is_none_or(|n| self.po_number == n)
            && filter.client_id.is_none_or(|c| self.client_id == c)
    }

    async fn on_create(&mut self, ctx: &PoContext) -> Result<(), Self::Error> {
        let actor = self
            .registration_actor
            .take()
            .ok_or_else(|| PoError::Validation("po creation requires an actor".into()))?;

        ctx.registry
            .get(self.client_id)
            .await
            .map_err(|e| PoError::ActorCommunication(e.to_string()))?
            .ok_or_else(|| PoError::ClientNotFound(self.client_id.to_string()))?;

        ctx.activity
            .record(ActivityCreate {
                item_id: None,
                po_id: Some(self.id),
                actor,
                department: None,
                action: ActivityAction::PoCreated,
                payload: json!({
                    "po": self.id,
                    "poNumber": self.po_number,
                    "client": self.client_id,
                }),
            })
            .await
            .map_err(|e| PoError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &PoContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_delete(&self, ctx: &PoContext) -> Result<(), Self::Error> {
        for &item_id in &self.item_ids {
            ctx.activity
                .purge_item(item_id)
                .await
                .map_err(|e| PoError::Cascade(e.to_string()))?;

            let issues = ctx
                .issues
                .list_issues(IssueQuery {
                    item_id: Some(item_id),
                    ..IssueQuery::default()
                })
                .await
                .map_err(|e| PoError::Cascade(e.to_string()))?;
            for issue in issues {
                ctx.issues
                    .delete(issue.id)
                    .await
                    .map_err(|e| PoError::Cascade(e.to_string()))?;
            }

            // Tracks and deliveries live inside the item aggregate and go
            // with it.
            ctx.items
                .delete(item_id)
                .await
                .map_err(|e| PoError::Cascade(e.to_string()))?;
        }
        info!(po = %self.id, items = self.item_ids.len(), "cascade delete complete");
        Ok(())
    }

    async fn handle_action(&mut self, action: PoAction, _ctx: &PoContext) -> Result<(), Self::Error> {
        match action {
            PoAction::RegisterItem { item_id } => {
                if !self.item_ids.contains(&item_id) {
                    self.item_ids.push(item_id);
                    self.updated_at = Utc::now();
                }
                Ok(())
            }
        }
    }
}
