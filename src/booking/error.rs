//! Error types for the booking core.

use thiserror::Error;

use crate::framework::StoreError;
use crate::model::{ItemId, ReservationId};
use crate::state_machine::ReservationState;

/// Every outcome of a booking operation other than success.
///
/// All variants except [`BookingError::Infrastructure`] are ordinary business
/// rejections. `Infrastructure` means a collaborator could not be reached and the
/// caller should retry the whole operation later.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    /// The request carries no resolvable actor.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The interval is empty or reversed.
    #[error("End date must be after start date")]
    InvalidInterval,

    /// The borrower's note exceeds the configured limit.
    #[error("Message must be at most {max} characters")]
    NoteTooLong { max: usize },

    /// The interval starts before now.
    #[error("Start date must be in the future")]
    StartInPast,

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// The owner has switched the item off.
    #[error("Item is not available for booking: {0}")]
    ItemUnavailable(ItemId),

    #[error("You cannot book your own item")]
    SelfBookingForbidden,

    /// The interval overlaps an active reservation of the same item.
    #[error("Item is already booked for this period")]
    IntervalConflict,

    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    /// The caller's role does not permit the operation.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Cannot move a reservation from {from} to {to}")]
    IllegalTransition {
        from: ReservationState,
        to: ReservationState,
    },

    /// Someone else changed the reservation between our read and our write.
    #[error("Reservation {0} was modified concurrently")]
    ConflictFailure(ReservationId),

    #[error("Collaborator unavailable: {0}")]
    Infrastructure(StoreError),
}

impl BookingError {
    /// `true` for business rejections, `false` for infrastructure faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Infrastructure(_))
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Overlap { .. } => Self::IntervalConflict,
            StoreError::StateMismatch { id, .. } => Self::ConflictFailure(id),
            StoreError::UnknownReservation(id) => Self::ReservationNotFound(id),
            StoreError::UnknownItem(id) => Self::ItemNotFound(id),
            other => Self::Infrastructure(other),
        }
    }
}
