//! Realtime fan-out of activity to connected dashboards.
//!
//! A single broadcaster task owns the named channels. Producers publish
//! through a [`RealtimeHandle`]; delivery to subscribers is best-effort and
//! at-most-once (a lagged subscriber loses the overflowed events and is
//! expected to reconcile through the read surface). Publishing never blocks
//! and never fails the caller: if the transport is down or saturated the
//! envelope is dropped with a warning.
//!
//! Channel names are plain strings agreed with consumers: the global
//! [`GLOBAL_CHANNEL`] plus one [`po_channel`] per purchase order.

use crate::model::PurchaseOrderId;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

/// Channel every activity entry is published to.
pub const GLOBAL_CHANNEL: &str = "po-channel";

/// Per-subscriber buffer; a subscriber further behind than this loses events.
const SUBSCRIBER_BUFFER: usize = 64;

/// Name of the channel scoped to one purchase order.
pub fn po_channel(id: PurchaseOrderId) -> String {
    format!("po-{}", id.0)
}

/// One published event.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}

#[derive(Debug)]
enum TransportMsg {
    Publish(Envelope),
    Subscribe {
        channel: String,
        respond_to: oneshot::Sender<broadcast::Receiver<Envelope>>,
    },
}

/// The broadcaster task. Runs until every [`RealtimeHandle`] is dropped.
pub struct RealtimeBroadcaster {
    receiver: mpsc::Receiver<TransportMsg>,
    channels: HashMap<String, broadcast::Sender<Envelope>>,
}

impl RealtimeBroadcaster {
    pub fn new(buffer_size: usize) -> (Self, RealtimeHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let broadcaster = Self {
            receiver,
            channels: HashMap::new(),
        };
        (broadcaster, RealtimeHandle { sender })
    }

    pub async fn run(mut self) {
        info!("realtime broadcaster started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TransportMsg::Publish(envelope) => {
                    debug!(
                        channel = %envelope.channel,
                        event = %envelope.event,
                        "publish"
                    );
                    let sender = self.channel_entry(envelope.channel.clone());
                    // Err here just means nobody is subscribed right now.
                    let _ = sender.send(envelope);
                }
                TransportMsg::Subscribe {
                    channel,
                    respond_to,
                } => {
                    debug!(channel = %channel, "subscribe");
                    let receiver = self.channel_entry(channel).subscribe();
                    let _ = respond_to.send(receiver);
                }
            }
        }

        info!(channels = self.channels.len(), "realtime broadcaster shutdown");
    }

    fn channel_entry(&mut self, channel: String) -> &broadcast::Sender<Envelope> {
        self.channels
            .entry(channel)
            .or_insert_with(|| broadcast::channel(SUBSCRIBER_BUFFER).0)
    }
}

/// Errors on the subscriber side of the transport. Publishing has no error
/// surface at all; transport failure there is logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("realtime transport unavailable")]
    Unavailable,
}

/// Cloneable producer/subscriber handle to the broadcaster task.
#[derive(Clone)]
pub struct RealtimeHandle {
    sender: mpsc::Sender<TransportMsg>,
}

impl RealtimeHandle {
    /// Fire-and-forget publish. Must not block or fail the caller: transport
    /// problems are isolated here, logged at warn, and the mutation that
    /// produced the event keeps its success result.
    pub fn publish(&self, channel: impl Into<String>, event: impl Into<String>, payload: serde_json::Value) {
        let envelope = Envelope {
            channel: channel.into(),
            event: event.into(),
            payload,
        };
        if let Err(e) = self.sender.try_send(TransportMsg::Publish(envelope)) {
            warn!(error = %e, "realtime publish dropped");
        }
    }

    /// Subscribe to a named channel. Events arrive at-most-once; after a
    /// `Lagged` error the subscriber should reconcile via the read surface.
    pub async fn subscribe(&self, channel: impl Into<String>) -> Result<broadcast::Receiver<Envelope>, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TransportMsg::Subscribe {
                channel: channel.into(),
                respond_to,
            })
            .await
            .map_err(|_| TransportError::Unavailable)?;
        response.await.map_err(|_| TransportError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn subscriber_receives_published_event() {
        let (broadcaster, handle) = RealtimeBroadcaster::new(16);
        tokio::spawn(broadcaster.run());

        let mut rx = handle.subscribe(GLOBAL_CHANNEL).await.unwrap();
        handle.publish(GLOBAL_CHANNEL, "track-updated", json!({"progress": 30}));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.channel, GLOBAL_CHANNEL);
        assert_eq!(envelope.event, "track-updated");
        assert_eq!(envelope.payload["progress"], 30);
    }

    #[tokio::test]
    async fn channels_are_isolated() {
        let (broadcaster, handle) = RealtimeBroadcaster::new(16);
        tokio::spawn(broadcaster.run());

        let mut po_rx = handle.subscribe(po_channel(PurchaseOrderId(7))).await.unwrap();
        handle.publish(GLOBAL_CHANNEL, "po-created", json!({}));
        handle.publish(po_channel(PurchaseOrderId(7)), "track-updated", json!({}));

        // Only the PO-scoped event lands here.
        let envelope = po_rx.recv().await.unwrap();
        assert_eq!(envelope.event, "track-updated");
        assert!(po_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let (broadcaster, handle) = RealtimeBroadcaster::new(16);
        tokio::spawn(broadcaster.run());

        // No panic, no error surface.
        handle.publish("po-42", "issue-created", json!({"id": 1}));

        // A later subscriber does not see the earlier event (no replay).
        let mut rx = handle.subscribe("po-42").await.unwrap();
        assert!(rx.try_recv().is_err());
    }
}
