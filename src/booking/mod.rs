//! # Booking Service
//!
//! The request-facing side of the core: authenticates the caller, then hands off to
//! the [`AdmissionController`](crate::admission::AdmissionController) or the
//! [`Transitioner`](crate::state_machine::Transitioner).
//!
//! ## Structure
//!
//! - [`error`] - [`BookingError`], every rejection and fault the core reports
//! - [`service`] - [`BookingService`], the per-request entry point
//!
//! ## Usage
//!
//! ```rust,ignore
//! let reservation = booking
//!     .request_reservation(&session, ReservationRequest { item_id, interval, note: None })
//!     .await?;
//! booking.transition(&owner_session, reservation.id, ReservationState::Approved).await?;
//! ```

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
