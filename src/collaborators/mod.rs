//! # Collaborator Seams
//!
//! The booking core owns no storage. Everything it reads or writes goes through the
//! traits in this module, so the same admission and transition logic runs against the
//! in-memory actors shipped with this crate or against a real database.
//!
//! | Trait | Used for |
//! |-------|----------|
//! | [`IdentityProvider`] | session token -> actor |
//! | [`Catalog`] | item owner and availability flag |
//! | [`ReservationRepository`] | reservation reads, inserts and state updates |
//! | [`ChangeNotifier`] | "reservations of item X changed" signal |
//! | [`Clock`] | current time |
//!
//! Every fallible method returns [`StoreError`]; the core turns that into the matching
//! [`BookingError`](crate::booking::BookingError).

pub mod clock;
pub mod identity;
pub mod notifier;

pub use clock::*;
pub use identity::*;
pub use notifier::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::framework::StoreError;
use crate::model::{
    ActorId, Item, ItemId, Reservation, ReservationCreate, ReservationId, SessionToken,
};
use crate::state_machine::ReservationState;

/// Resolves the caller of a request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Ok(None)` means the session does not map to a known actor.
    async fn resolve(&self, session: &SessionToken) -> Result<Option<ActorId>, StoreError>;
}

/// Read access to the item catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;
}

/// Persistence for reservations.
///
/// Implementations must make `insert` atomic with respect to other inserts for the
/// same item: an insert whose interval overlaps an active reservation fails with
/// [`StoreError::Overlap`]. `update_state` is a compare-and-set on `expected`; an
/// exclusive update is also atomic with respect to other exclusive updates of the item.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Pending and Approved reservations of one item.
    async fn list_active_for_item(&self, item_id: &ItemId)
        -> Result<Vec<Reservation>, StoreError>;

    async fn insert(&self, record: ReservationCreate) -> Result<Reservation, StoreError>;

    async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, StoreError>;

    /// Moves `id` to `new_state` only if it is still in `expected`.
    ///
    /// With `exclusive` set, the move also fails with [`StoreError::Overlap`] when
    /// another reservation of the item already in `new_state` overlaps this one.
    async fn update_state(
        &self,
        id: &ReservationId,
        new_state: ReservationState,
        expected: ReservationState,
        exclusive: bool,
        at: DateTime<Utc>,
    ) -> Result<Reservation, StoreError>;

    async fn list_for_requester(
        &self,
        requester_id: &ActorId,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Every reservation of one item, whatever its state.
    async fn list_for_item(&self, item_id: &ItemId) -> Result<Vec<Reservation>, StoreError>;
}

/// Fire-and-forget signal that an item's reservations changed.
///
/// Implementations must not block and cannot fail the calling operation.
pub trait ChangeNotifier: Send + Sync {
    fn reservation_changed(&self, item_id: &ItemId);
}

/// The set of collaborators one booking core instance talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityProvider>,
    pub catalog: Arc<dyn Catalog>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub notifier: Arc<dyn ChangeNotifier>,
    pub clock: Arc<dyn Clock>,
}
