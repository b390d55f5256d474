use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::CatalogRequest;
use crate::clients::CatalogClient;
use crate::framework::{reply, StoreError};
use crate::model::{Item, ItemId};

/// Owns the in-memory item catalog.
///
/// Processes one request at a time, so reads always see a consistent catalog
/// without any locking.
pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogRequest>,
    store: HashMap<ItemId, Item>,
    next_id: u32,
}

impl CatalogActor {
    /// Creates a new `CatalogActor` and its associated `CatalogClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, CatalogClient::new(sender))
    }

    /// Runs the actor's event loop until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = "Item";
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = ItemId::from(self.next_id);
                    self.next_id += 1;
                    let item = Item::new(id.clone(), params.name, params.owner_id, params.available);
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    reply(respond_to, Ok(id));
                }
                CatalogRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    reply(respond_to, Ok(item));
                }
                CatalogRequest::SetAvailable {
                    id,
                    available,
                    respond_to,
                } => {
                    debug!(entity_type, %id, available, "SetAvailable");
                    let result = match self.store.get_mut(&id) {
                        Some(item) => {
                            item.available = available;
                            info!(entity_type, %id, available, "Updated");
                            Ok(item.clone())
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            Err(StoreError::UnknownItem(id))
                        }
                    };
                    reply(respond_to, result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
