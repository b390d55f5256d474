//! Requests understood by the [`ReservationActor`](super::ReservationActor).

use chrono::{DateTime, Utc};

use crate::framework::Response;
use crate::model::{ActorId, ItemId, Reservation, ReservationCreate, ReservationId};
use crate::state_machine::ReservationState;

/// Internal message type sent to the reservation actor.
#[derive(Debug)]
pub enum ReservationStoreRequest {
    /// `exclusive` inserts fail with [`StoreError::Overlap`](crate::framework::StoreError::Overlap)
    /// when an active reservation of the item overlaps the record.
    Insert {
        record: ReservationCreate,
        exclusive: bool,
        respond_to: Response<Reservation>,
    },
    Get {
        id: ReservationId,
        respond_to: Response<Option<Reservation>>,
    },
    ListActiveForItem {
        item_id: ItemId,
        respond_to: Response<Vec<Reservation>>,
    },
    ListForItem {
        item_id: ItemId,
        respond_to: Response<Vec<Reservation>>,
    },
    ListForRequester {
        requester_id: ActorId,
        respond_to: Response<Vec<Reservation>>,
    },
    /// Compare-and-set on `expected`. `exclusive` updates fail with
    /// [`StoreError::Overlap`](crate::framework::StoreError::Overlap) when another
    /// reservation of the item already in `new_state` overlaps.
    UpdateState {
        id: ReservationId,
        new_state: ReservationState,
        expected: ReservationState,
        exclusive: bool,
        at: DateTime<Utc>,
        respond_to: Response<Reservation>,
    },
}
