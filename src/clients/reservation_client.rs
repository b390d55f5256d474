use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::collaborators::ReservationRepository;
use crate::framework::{Response, StoreError};
use crate::model::{ActorId, ItemId, Reservation, ReservationCreate, ReservationId};
use crate::reservation_actor::ReservationStoreRequest;
use crate::state_machine::ReservationState;

/// Client for interacting with the Reservation actor.
#[derive(Clone)]
pub struct ReservationClient {
    sender: mpsc::Sender<ReservationStoreRequest>,
}

impl ReservationClient {
    pub fn new(sender: mpsc::Sender<ReservationStoreRequest>) -> Self {
        Self { sender }
    }

    /// Stores a record without the overlap check.
    ///
    /// For loading existing data (migrations, fixtures). Records loaded this way may
    /// overlap each other; the first approval wins once they are acted on.
    #[instrument(skip(self))]
    pub async fn import(&self, record: ReservationCreate) -> Result<Reservation, StoreError> {
        debug!("Sending request");
        self.call(|respond_to| ReservationStoreRequest::Insert {
            record,
            exclusive: false,
            respond_to,
        })
        .await
    }

    async fn call<T>(
        &self,
        build: impl FnOnce(Response<T>) -> ReservationStoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}

#[async_trait]
impl ReservationRepository for ReservationClient {
    #[instrument(skip(self))]
    async fn list_active_for_item(
        &self,
        item_id: &ItemId,
    ) -> Result<Vec<Reservation>, StoreError> {
        debug!("Sending request");
        let item_id = item_id.clone();
        self.call(|respond_to| ReservationStoreRequest::ListActiveForItem {
            item_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn insert(&self, record: ReservationCreate) -> Result<Reservation, StoreError> {
        debug!("Sending request");
        self.call(|respond_to| ReservationStoreRequest::Insert {
            record,
            exclusive: true,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, StoreError> {
        debug!("Sending request");
        let id = id.clone();
        self.call(|respond_to| ReservationStoreRequest::Get { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    async fn update_state(
        &self,
        id: &ReservationId,
        new_state: ReservationState,
        expected: ReservationState,
        exclusive: bool,
        at: DateTime<Utc>,
    ) -> Result<Reservation, StoreError> {
        debug!("Sending request");
        let id = id.clone();
        self.call(|respond_to| ReservationStoreRequest::UpdateState {
            id,
            new_state,
            expected,
            exclusive,
            at,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_for_requester(
        &self,
        requester_id: &ActorId,
    ) -> Result<Vec<Reservation>, StoreError> {
        debug!("Sending request");
        let requester_id = requester_id.clone();
        self.call(|respond_to| ReservationStoreRequest::ListForRequester {
            requester_id,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn list_for_item(&self, item_id: &ItemId) -> Result<Vec<Reservation>, StoreError> {
        debug!("Sending request");
        let item_id = item_id.clone();
        self.call(|respond_to| ReservationStoreRequest::ListForItem {
            item_id,
            respond_to,
        })
        .await
    }
}
