//! [`ActorEntity`] implementation for [`Item`].
//!
//! The record-then-commit discipline: the activity entry describing the
//! post-mutation state is recorded first, and only on success is the
//! aggregate mutated. The actor processes messages sequentially, so no
//! caller ever observes the gap between the two.

use super::actions::{ItemAction, ProgressUpdate};
use super::error::ItemError;
use super::ItemContext;
use crate::model::{
    ActivityAction, ActivityCreate, Delivery, Item, ItemCreate, ItemFilter, ItemId, ItemTrack,
};
use actor_core::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

#[async_trait]
impl ActorEntity for Item {
    type Id = ItemId;
    type Create = ItemCreate;
    type Update = ();
    type Action = ItemAction;
    type ActionResult = ProgressUpdate;
    type Filter = ItemFilter;
    type Context = ItemContext;
    type Error = ItemError;

    fn from_create_params(id: ItemId, params: ItemCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ItemError::Validation("item name must not be empty".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            po_id: params.po_id,
            name: params.name,
            specification: params.specification,
            ship_to: params.ship_to,
            tracks: Default::default(),
            deliveries: Vec::new(),
            overall_progress: 0,
            created_at: now,
            updated_at: now,
            registration_actor: Some(params.actor),
        })
    }

    fn matches_filter(&self, filter: &ItemFilter) -> bool {
        filter.po_id.is_none_or(|po_id| self.po_id == po_id)
    }

    async fn on_create(&mut self, ctx: &ItemContext) -> Result<(), Self::Error> {
        // The registering actor comes through the create payload and is kept
        // only for this audit entry.
        let actor = self.registration_actor.take().ok_or_else(|| {
            ItemError::Validation("item registration requires an actor".into())
        })?;
        ctx.activity
            .record(ActivityCreate {
                item_id: Some(self.id),
                po_id: Some(self.po_id),
                actor,
                department: None,
                action: ActivityAction::ItemCreated,
                payload: json!({
                    "item": self.id,
                    "po": self.po_id,
                    "name": self.name,
                }),
            })
            .await
            .map_err(|e| ItemError::Persistence(e.to_string()))?;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &ItemContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ItemAction,
        ctx: &ItemContext,
    ) -> Result<ProgressUpdate, Self::Error> {
        match action {
            ItemAction::UpdateProgress {
                department,
                value,
                actor,
            } => {
                if value > 100 || value % 5 != 0 {
                    return Err(ItemError::InvalidProgressValue(value));
                }

                if let Some(existing) = self.tracks.get(&department) {
                    if value < existing.progress {
                        return Err(ItemError::ProgressRegression {
                            department,
                            current: existing.progress,
                            requested: value,
                        });
                    }
                    if value == existing.progress {
                        // Idempotent resubmission: nothing changes, nothing
                        // is recorded.
                        return Ok(ProgressUpdate {
                            track: existing.clone(),
                            overall_progress: self.overall_progress,
                            delivery_created: false,
                            changed: false,
                        });
                    }
                }

                let now = Utc::now();
                let track = match self.tracks.get(&department) {
                    Some(existing) => ItemTrack {
                        progress: value,
                        updated_at: now,
                        updated_by: actor,
                        ..existing.clone()
                    },
                    None => ItemTrack {
                        department,
                        progress: value,
                        created_at: now,
                        updated_at: now,
                        updated_by: actor,
                    },
                };

                // Stage the post-mutation state without touching self yet.
                let mut tracks = self.tracks.clone();
                tracks.insert(department, track.clone());
                let overall_progress = ctx.policy.overall(&tracks);
                let delivery_created =
                    department.is_terminal() && value == 100 && !self.has_delivery();

                ctx.activity
                    .record(ActivityCreate {
                        item_id: Some(self.id),
                        po_id: Some(self.po_id),
                        actor,
                        department: Some(department),
                        action: ActivityAction::TrackUpdated,
                        payload: json!({
                            "item": self.id,
                            "department": department,
                            "progress": value,
                            "overallProgress": overall_progress,
                            "deliveryCreated": delivery_created,
                        }),
                    })
                    .await
                    .map_err(|e| ItemError::Persistence(e.to_string()))?;

                // Commit.
                self.tracks = tracks;
                self.overall_progress = overall_progress;
                if delivery_created {
                    self.deliveries.push(Delivery {
                        item_id: self.id,
                        destination: self.ship_to.clone(),
                        delivered_at: now,
                    });
                }
                self.updated_at = now;

                Ok(ProgressUpdate {
                    track,
                    overall_progress,
                    delivery_created,
                    changed: true,
                })
            }
        }
    }
}
