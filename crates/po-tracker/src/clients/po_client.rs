//! # Purchase Order Client
//!
//! High-level API for the PO actor, plus the cross-actor orchestration the
//! actor itself cannot do: registering an item means creating it through the
//! item actor and then attaching its id to the PO.

use crate::clients::ItemClient;
use crate::model::{
    ClientId, ItemCreate, ItemId, PurchaseOrder, PurchaseOrderCreate, PurchaseOrderFilter,
    PurchaseOrderId, UserId,
};
use crate::po_actor::{PoAction, PoError};
use actor_core::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Payload for registering an item under a purchase order.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub specification: Option<String>,
    pub ship_to: Option<String>,
}

/// Client for the purchase order actor.
#[derive(Clone)]
pub struct PurchaseOrderClient {
    inner: ResourceClient<PurchaseOrder>,
    items: ItemClient,
}

impl PurchaseOrderClient {
    pub fn new(inner: ResourceClient<PurchaseOrder>, items: ItemClient) -> Self {
        Self { inner, items }
    }

    fn from_framework(e: FrameworkError) -> PoError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<PoError>() {
                Ok(err) => *err,
                Err(other) => PoError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => PoError::NotFound(id),
            other => PoError::ActorCommunication(other.to_string()),
        }
    }

    /// Raises a purchase order for a client. The PO number must be unused;
    /// the check is a list-then-create against the sequential PO actor.
    #[instrument(skip(self))]
    pub async fn create_purchase_order(
        &self,
        client_id: ClientId,
        po_number: &str,
        actor: UserId,
    ) -> Result<PurchaseOrderId, PoError> {
        let taken = !self
            .inner
            .list(PurchaseOrderFilter {
                po_number: Some(po_number.to_string()),
                ..PurchaseOrderFilter::default()
            })
            .await
            .map_err(Self::from_framework)?
            .is_empty();
        if taken {
            return Err(PoError::PoNumberTaken(po_number.to_string()));
        }

        self.inner
            .create(PurchaseOrderCreate {
                client_id,
                po_number: po_number.to_string(),
                actor,
            })
            .await
            .map_err(Self::from_framework)
    }

    /// Registers a new item under an existing PO.
    ///
    /// Two steps against two actors: create the item, then attach its id.
    /// A crash between them leaves an item the PO does not list; it is
    /// invisible to PO reads and harmless.
    #[instrument(skip(self, draft))]
    pub async fn add_item(
        &self,
        po_id: PurchaseOrderId,
        draft: ItemDraft,
        actor: UserId,
    ) -> Result<ItemId, PoError> {
        self.inner
            .get(po_id)
            .await
            .map_err(Self::from_framework)?
            .ok_or_else(|| PoError::NotFound(po_id.to_string()))?;

        let item_id = self
            .items
            .create_item(ItemCreate {
                po_id,
                name: draft.name,
                specification: draft.specification,
                ship_to: draft.ship_to,
                actor,
            })
            .await?;

        self.inner
            .perform_action(po_id, PoAction::RegisterItem { item_id })
            .await
            .map_err(Self::from_framework)?;

        debug!(%po_id, %item_id, "item registered");
        Ok(item_id)
    }

    /// Deletes a PO and everything it owns. The cascade runs inside the PO
    /// actor's delete hook.
    #[instrument(skip(self))]
    pub async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<(), PoError> {
        self.inner.delete(id).await.map_err(Self::from_framework)
    }

    #[instrument(skip(self))]
    pub async fn find_by_number(&self, po_number: &str) -> Result<Option<PurchaseOrder>, PoError> {
        let matches = self
            .inner
            .list(PurchaseOrderFilter {
                po_number: Some(po_number.to_string()),
                ..PurchaseOrderFilter::default()
            })
            .await
            .map_err(Self::from_framework)?;
        Ok(matches.into_iter().next())
    }
}

#[async_trait]
impl ActorClient<PurchaseOrder> for PurchaseOrderClient {
    type Error = PoError;

    fn inner(&self) -> &ResourceClient<PurchaseOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        Self::from_framework(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_core::mock::{create_mock_client, MockClient};
    use chrono::Utc;

    fn po(id: u32, po_number: &str) -> PurchaseOrder {
        let now = Utc::now();
        PurchaseOrder {
            id: PurchaseOrderId(id),
            client_id: ClientId(1),
            po_number: po_number.to_string(),
            item_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            registration_actor: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_taken_po_number() {
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_list().return_ok(vec![po(1, "PO-1001")]);
        let (item_client, _item_rx) = create_mock_client::<crate::model::Item>(10);

        let client = PurchaseOrderClient::new(mock.client(), ItemClient::new(item_client));
        let result = client
            .create_purchase_order(ClientId(1), "PO-1001", UserId(1))
            .await;

        match result {
            Err(PoError::PoNumberTaken(n)) => assert_eq!(n, "PO-1001"),
            other => panic!("expected PoNumberTaken, got {:?}", other),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn add_item_requires_an_existing_po() {
        let mut mock = MockClient::<PurchaseOrder>::new();
        mock.expect_get().return_ok(None);
        let (item_client, _item_rx) = create_mock_client::<crate::model::Item>(10);

        let client = PurchaseOrderClient::new(mock.client(), ItemClient::new(item_client));
        let result = client
            .add_item(
                PurchaseOrderId(9),
                ItemDraft {
                    name: "pressure vessel".to_string(),
                    specification: None,
                    ship_to: None,
                },
                UserId(1),
            )
            .await;

        match result {
            Err(PoError::NotFound(id)) => assert_eq!(id, "po_9"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        mock.verify();
    }
}
