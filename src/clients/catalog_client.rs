use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::catalog_actor::CatalogRequest;
use crate::collaborators::Catalog;
use crate::framework::StoreError;
use crate::model::{Item, ItemCreate, ItemId};

/// Client for interacting with the Catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn create_item(&self, params: ItemCreate) -> Result<ItemId, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Create { params, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Marks an item as lendable or not. Existing reservations are left alone.
    #[instrument(skip(self))]
    pub async fn set_available(&self, id: ItemId, available: bool) -> Result<Item, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::SetAvailable {
                id,
                available,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    #[instrument(skip(self))]
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Get {
                id: id.clone(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
