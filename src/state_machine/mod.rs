//! # Reservation State Machine
//!
//! Lifecycle of a reservation and the rule of who may move it where.
//!
//! ## Structure
//!
//! - [`state`] - [`ReservationState`] and the active/terminal split
//! - [`role`] - [`ActorRole`], the caller's relation to a reservation
//! - [`table`] - the transition table with its authorization and legality lookups
//! - [`transition`] - [`Transitioner`], which runs a transition against the collaborators
//!
//! The table and role modules are pure and can be tested without any async machinery.
//! Nothing here depends on the admission controller except the approval re-check, which
//! reuses its overlap helper.

pub mod role;
pub mod state;
pub mod table;
pub mod transition;

pub use role::*;
pub use state::*;
pub use transition::*;
