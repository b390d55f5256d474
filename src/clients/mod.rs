//! Typed clients for the in-memory actors.
//!
//! Each client wraps the sending half of its actor's channel, is cheap to clone, and
//! implements the matching collaborator trait so the booking core can use it directly.

pub mod catalog_client;
pub mod reservation_client;

pub use catalog_client::*;
pub use reservation_client::*;
