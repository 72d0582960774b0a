//! [`ActorEntity`] implementation for [`ActivityEntry`].
//!
//! `on_create` performs the outbox handoff: once the entry is about to be
//! committed it is published to the global channel and, when PO-scoped, to
//! the per-PO channel. The publish is fire-and-forget; its failure is logged
//! inside [`RealtimeHandle::publish`] and never reaches the recording caller.

use super::error::ActivityError;
use crate::model::{ActivityCreate, ActivityEntry, ActivityFilter, ActivityId};
use crate::realtime::{po_channel, RealtimeHandle, GLOBAL_CHANNEL};
use actor_core::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

#[async_trait]
impl ActorEntity for ActivityEntry {
    type Id = ActivityId;
    type Create = ActivityCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Filter = ActivityFilter;
    type Context = RealtimeHandle;
    type Error = ActivityError;

    /// Server-assigned id and timestamp; the caller supplies everything else.
    fn from_create_params(id: ActivityId, params: ActivityCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            item_id: params.item_id,
            po_id: params.po_id,
            actor: params.actor,
            department: params.department,
            action: params.action,
            payload: params.payload,
            created_at: Utc::now(),
        })
    }

    fn matches_filter(&self, filter: &ActivityFilter) -> bool {
        if let Some(department) = filter.department {
            if self.department != Some(department) {
                return false;
            }
        }
        if let Some(item_id) = filter.item_id {
            if self.item_id != Some(item_id) {
                return false;
            }
        }
        true
    }

    async fn on_create(&mut self, realtime: &RealtimeHandle) -> Result<(), Self::Error> {
        let payload = match serde_json::to_value(&*self) {
            Ok(payload) => payload,
            Err(e) => {
                // The entry still commits; only the notification is lost.
                warn!(id = %self.id, error = %e, "activity entry not serializable for broadcast");
                return Ok(());
            }
        };

        realtime.publish(GLOBAL_CHANNEL, self.action.event_name(), payload.clone());
        if let Some(po_id) = self.po_id {
            realtime.publish(po_channel(po_id), self.action.event_name(), payload);
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &RealtimeHandle) -> Result<(), Self::Error> {
        Err(ActivityError::AppendOnly)
    }

    async fn handle_action(&mut self, _action: (), _ctx: &RealtimeHandle) -> Result<(), Self::Error> {
        Ok(())
    }
}
