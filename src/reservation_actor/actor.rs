use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::ReservationStoreRequest;
use crate::clients::ReservationClient;
use crate::framework::{reply, StoreError};
use crate::model::{Reservation, ReservationCreate, ReservationId};
use crate::state_machine::ReservationState;

/// Owns every stored reservation.
///
/// # Concurrency Model
/// Requests are handled strictly one after another. That makes each insert's
/// overlap check and the insert itself a single atomic step, and each state update
/// a compare-and-set, without any lock.
pub struct ReservationActor {
    receiver: mpsc::Receiver<ReservationStoreRequest>,
    store: HashMap<ReservationId, Reservation>,
    next_id: u32,
}

impl ReservationActor {
    /// Creates a new `ReservationActor` and its associated `ReservationClient`.
    pub fn new(buffer_size: usize) -> (Self, ReservationClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        (actor, ReservationClient::new(sender))
    }

    /// Runs the actor's event loop until every client is dropped.
    pub async fn run(mut self) {
        let entity_type = "Reservation";
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ReservationStoreRequest::Insert {
                    record,
                    exclusive,
                    respond_to,
                } => {
                    debug!(entity_type, ?record, exclusive, "Insert");
                    let result = self.insert(record, exclusive);
                    match &result {
                        Ok(r) => info!(entity_type, id = %r.id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Insert rejected"),
                    }
                    reply(respond_to, result);
                }
                ReservationStoreRequest::Get { id, respond_to } => {
                    let found = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = found.is_some(), "Get");
                    reply(respond_to, Ok(found));
                }
                ReservationStoreRequest::ListActiveForItem {
                    item_id,
                    respond_to,
                } => {
                    let list = self.matching(|r| r.item_id == item_id && r.is_active());
                    debug!(entity_type, %item_id, count = list.len(), "ListActiveForItem");
                    reply(respond_to, Ok(list));
                }
                ReservationStoreRequest::ListForItem {
                    item_id,
                    respond_to,
                } => {
                    let list = self.matching(|r| r.item_id == item_id);
                    debug!(entity_type, %item_id, count = list.len(), "ListForItem");
                    reply(respond_to, Ok(list));
                }
                ReservationStoreRequest::ListForRequester {
                    requester_id,
                    respond_to,
                } => {
                    let list = self.matching(|r| r.requester_id == requester_id);
                    debug!(entity_type, %requester_id, count = list.len(), "ListForRequester");
                    reply(respond_to, Ok(list));
                }
                ReservationStoreRequest::UpdateState {
                    id,
                    new_state,
                    expected,
                    exclusive,
                    at,
                    respond_to,
                } => {
                    debug!(entity_type, %id, %expected, %new_state, exclusive, "UpdateState");
                    let result = self.update_state(id, new_state, expected, exclusive, at);
                    match &result {
                        Ok(r) => info!(entity_type, id = %r.id, state = %r.state, "Updated"),
                        Err(e) => warn!(entity_type, error = %e, "Update rejected"),
                    }
                    reply(respond_to, result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn insert(
        &mut self,
        record: ReservationCreate,
        exclusive: bool,
    ) -> Result<Reservation, StoreError> {
        if exclusive {
            let clash = self.store.values().any(|r| {
                r.item_id == record.item_id && r.is_active() && r.interval.overlaps(&record.interval)
            });
            if clash {
                return Err(StoreError::Overlap {
                    item_id: record.item_id,
                });
            }
        }
        let id = ReservationId::from(self.next_id);
        self.next_id += 1;
        let reservation = Reservation::from_record(id.clone(), record);
        self.store.insert(id, reservation.clone());
        Ok(reservation)
    }

    fn update_state(
        &mut self,
        id: ReservationId,
        new_state: ReservationState,
        expected: ReservationState,
        exclusive: bool,
        at: DateTime<Utc>,
    ) -> Result<Reservation, StoreError> {
        let current = self
            .store
            .get(&id)
            .ok_or_else(|| StoreError::UnknownReservation(id.clone()))?;
        if current.state != expected {
            return Err(StoreError::StateMismatch {
                id,
                expected,
                actual: current.state,
            });
        }
        if exclusive {
            let clash = self.store.values().any(|r| {
                r.id != current.id
                    && r.item_id == current.item_id
                    && r.state == new_state
                    && r.interval.overlaps(&current.interval)
            });
            if clash {
                return Err(StoreError::Overlap {
                    item_id: current.item_id.clone(),
                });
            }
        }
        let reservation = self
            .store
            .get_mut(&id)
            .ok_or_else(|| StoreError::UnknownReservation(id.clone()))?;
        reservation.state = new_state;
        reservation.updated_at = at;
        Ok(reservation.clone())
    }

    /// Matching reservations in id order.
    fn matching(&self, pred: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        let mut list: Vec<Reservation> = self.store.values().filter(|r| pred(r)).cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}
