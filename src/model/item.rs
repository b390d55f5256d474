use serde::{Deserialize, Serialize};

use crate::model::{ActorId, ItemId};

/// A lendable item as the catalog reports it.
///
/// The booking core only ever reads items. `available` is the owner's coarse
/// on/off switch; an available item can still have individual intervals taken
/// by reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub owner_id: ActorId,
    pub available: bool,
}

impl Item {
    /// Creates a new Item instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the catalog actor)
    /// * `name` - Display name
    /// * `owner_id` - The actor lending the item out
    /// * `available` - Whether the owner currently accepts bookings
    pub fn new(id: ItemId, name: impl Into<String>, owner_id: ActorId, available: bool) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
            available,
        }
    }
}

/// Payload for listing a new item.
#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub name: String,
    pub owner_id: ActorId,
    pub available: bool,
}
