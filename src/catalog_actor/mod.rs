//! # Catalog Actor
//!
//! In-memory stand-in for the external item catalog.
//!
//! The booking core only reads from it (owner and availability flag). Listing items
//! and flipping availability are catalog-management operations offered on
//! [`CatalogClient`] for demos and tests.
//!
//! ## Usage
//!
//! ```rust
//! use lending_booking::catalog_actor;
//! use lending_booking::model::{ActorId, ItemCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = catalog_actor::new();
//!     tokio::spawn(actor.run());
//!
//!     let id = client
//!         .create_item(ItemCreate {
//!             name: "Ladder".to_string(),
//!             owner_id: ActorId::from("owner"),
//!             available: true,
//!         })
//!         .await?;
//!     client.set_available(id, false).await?;
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod message;

pub use actor::*;
pub use message::*;

use crate::clients::CatalogClient;

/// Creates a new Catalog actor and its client.
pub fn new() -> (CatalogActor, CatalogClient) {
    CatalogActor::new(32)
}
