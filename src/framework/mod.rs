//! Actor plumbing shared by the in-memory collaborators.
//!
//! # Main Components
//!
//! - [`StoreError`] - Errors surfaced by actors and their clients
//! - [`Response`] - One-shot reply channel carried by every actor request
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test code that talks to the catalog or the
//! reservation store without spawning the real actors.

pub mod error;
pub mod message;
pub mod mock;

pub use error::*;
pub use message::*;
