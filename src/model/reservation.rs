use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ActorId, Interval, ItemId, ReservationId};
use crate::state_machine::ReservationState;

/// A request to borrow one item for one interval.
///
/// The booking core is the only writer of `state`. Reservations are never
/// deleted here; terminal ones stay around as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub item_id: ItemId,
    pub requester_id: ActorId,
    pub interval: Interval,
    pub note: Option<String>,
    pub state: ReservationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Materializes a stored reservation from its insert record.
    ///
    /// The reservation starts in [`ReservationState::INITIAL`] and its
    /// `updated_at` equals `created_at`.
    pub fn from_record(id: ReservationId, record: ReservationCreate) -> Self {
        Self {
            id,
            item_id: record.item_id,
            requester_id: record.requester_id,
            interval: record.interval,
            note: record.note,
            state: ReservationState::INITIAL,
            created_at: record.created_at,
            updated_at: record.created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Insert record handed to the persistence collaborator.
#[derive(Debug, Clone)]
pub struct ReservationCreate {
    pub item_id: ItemId,
    pub requester_id: ActorId,
    pub interval: Interval,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What a borrower submits when asking for an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub item_id: ItemId,
    pub interval: Interval,
    pub note: Option<String>,
}
