//! Requests understood by the [`CatalogActor`](super::CatalogActor).

use crate::framework::Response;
use crate::model::{Item, ItemCreate, ItemId};

/// Internal message type sent to the catalog actor.
#[derive(Debug)]
pub enum CatalogRequest {
    Create {
        params: ItemCreate,
        respond_to: Response<ItemId>,
    },
    Get {
        id: ItemId,
        respond_to: Response<Option<Item>>,
    },
    SetAvailable {
        id: ItemId,
        available: bool,
        respond_to: Response<Item>,
    },
}
