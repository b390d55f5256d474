//! # Store Errors
//!
//! Errors raised by the collaborator layer: the in-memory actors, their clients, and
//! anything else implementing the traits in [`crate::collaborators`].

use crate::model::{ItemId, ReservationId};
use crate::state_machine::ReservationState;

/// Errors that can occur inside a collaborator.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    UnknownItem(ItemId),
    #[error("Reservation not found: {0}")]
    UnknownReservation(ReservationId),
    /// Exclusion backstop: the insert would overlap an active reservation.
    #[error("Interval overlaps an active reservation of {item_id}")]
    Overlap { item_id: ItemId },
    /// Compare-and-set failure on a state update.
    #[error("Reservation {id} is {actual}, expected {expected}")]
    StateMismatch {
        id: ReservationId,
        expected: ReservationState,
        actual: ReservationState,
    },
}
