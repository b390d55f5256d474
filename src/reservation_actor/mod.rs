//! # Reservation Actor
//!
//! In-memory persistence collaborator for reservations.
//!
//! ## Structure
//!
//! - [`actor`] - [`ReservationActor`], the task owning the reservation store
//! - [`message`] - [`ReservationStoreRequest`], the messages it understands
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Guarantees
//!
//! - **Exclusion backstop**: an exclusive insert overlapping an active reservation of
//!   the same item fails with `StoreError::Overlap`, even if the caller's own overlap
//!   check passed a moment earlier.
//! - **Compare-and-set updates**: a state update names the state it expects to replace
//!   and fails with `StoreError::StateMismatch` if another update won the race. An
//!   exclusive update also fails with `StoreError::Overlap` when another reservation
//!   of the item already in the target state overlaps.
//! - **No deletes**: terminal reservations stay in the store as history.

pub mod actor;
pub mod message;

pub use actor::*;
pub use message::*;

use crate::clients::ReservationClient;

/// Creates a new Reservation actor and its client.
pub fn new() -> (ReservationActor, ReservationClient) {
    ReservationActor::new(32)
}
