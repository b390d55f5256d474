use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::BookingError;
use crate::admission::AdmissionController;
use crate::collaborators::{Catalog, Collaborators, IdentityProvider, ReservationRepository};
use crate::config::BookingConfig;
use crate::model::{ActorId, ItemId, Reservation, ReservationId, ReservationRequest, SessionToken};
use crate::state_machine::{ActorRole, ReservationState, Transitioner};

/// Request-facing entry point of the booking core.
///
/// Every method first resolves the caller through the identity collaborator and fails
/// with [`BookingError::Unauthenticated`] before any business check if that yields
/// nobody. Cheap to clone; clones share the same collaborators.
#[derive(Clone)]
pub struct BookingService {
    identity: Arc<dyn IdentityProvider>,
    catalog: Arc<dyn Catalog>,
    reservations: Arc<dyn ReservationRepository>,
    admission: AdmissionController,
    transitions: Transitioner,
}

impl BookingService {
    pub fn new(collaborators: Collaborators, config: BookingConfig) -> Self {
        Self {
            identity: collaborators.identity.clone(),
            catalog: collaborators.catalog.clone(),
            reservations: collaborators.reservations.clone(),
            transitions: Transitioner::new(&collaborators, &config),
            admission: AdmissionController::new(&collaborators, config),
        }
    }

    /// Resolves the caller of a request.
    ///
    /// # Errors
    /// `Unauthenticated` for unknown sessions, `Infrastructure` if the identity
    /// collaborator is down.
    pub async fn authenticate(&self, session: &SessionToken) -> Result<ActorId, BookingError> {
        match self.identity.resolve(session).await? {
            Some(actor) => Ok(actor),
            None => {
                warn!("Request without a resolvable actor");
                Err(BookingError::Unauthenticated)
            }
        }
    }

    /// Asks to borrow an item as the calling actor.
    ///
    /// # Errors
    /// `Unauthenticated`, or any admission rejection.
    #[instrument(skip(self, session))]
    pub async fn request_reservation(
        &self,
        session: &SessionToken,
        request: ReservationRequest,
    ) -> Result<Reservation, BookingError> {
        let requester = self.authenticate(session).await?;
        self.admission
            .request_reservation(request.item_id, requester, request.interval, request.note)
            .await
    }

    /// Moves a reservation to `target` as the calling actor.
    ///
    /// # Errors
    /// `Unauthenticated`, or any transition rejection.
    #[instrument(skip(self, session))]
    pub async fn transition(
        &self,
        session: &SessionToken,
        reservation_id: ReservationId,
        target: ReservationState,
    ) -> Result<Reservation, BookingError> {
        let actor = self.authenticate(session).await?;
        self.transitions.transition(reservation_id, actor, target).await
    }

    /// Cancels a reservation as the calling actor (borrowers only).
    ///
    /// # Errors
    /// Same as [`BookingService::transition`].
    pub async fn cancel_reservation(
        &self,
        session: &SessionToken,
        reservation_id: ReservationId,
    ) -> Result<Reservation, BookingError> {
        self.transition(session, reservation_id, ReservationState::Cancelled)
            .await
    }

    /// Reads one reservation. Visible to its requester and to the item's owner.
    ///
    /// # Errors
    /// `Unauthenticated`, `ReservationNotFound`, `Unauthorized` for anyone else.
    #[instrument(skip(self, session))]
    pub async fn reservation(
        &self,
        session: &SessionToken,
        reservation_id: ReservationId,
    ) -> Result<Reservation, BookingError> {
        let actor = self.authenticate(session).await?;
        let reservation = self
            .reservations
            .get(&reservation_id)
            .await?
            .ok_or(BookingError::ReservationNotFound(reservation_id))?;
        match self.transitions.role_of(&actor, &reservation).await? {
            ActorRole::Owner | ActorRole::Requester => Ok(reservation),
            ActorRole::Other => Err(BookingError::Unauthorized),
        }
    }

    /// The caller's own reservations as a borrower, newest first.
    ///
    /// # Errors
    /// `Unauthenticated` or `Infrastructure`.
    #[instrument(skip(self, session))]
    pub async fn my_reservations(
        &self,
        session: &SessionToken,
    ) -> Result<Vec<Reservation>, BookingError> {
        let actor = self.authenticate(session).await?;
        let mut list = self.reservations.list_for_requester(&actor).await?;
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        debug!(count = list.len(), "Listed borrower reservations");
        Ok(list)
    }

    /// Every reservation of an item, ordered by start. Owner only.
    ///
    /// # Errors
    /// `Unauthenticated`, `ItemNotFound`, `Unauthorized` for non-owners.
    #[instrument(skip(self, session))]
    pub async fn item_reservations(
        &self,
        session: &SessionToken,
        item_id: ItemId,
    ) -> Result<Vec<Reservation>, BookingError> {
        let actor = self.authenticate(session).await?;
        let item = self
            .catalog
            .get_item(&item_id)
            .await?
            .ok_or_else(|| BookingError::ItemNotFound(item_id.clone()))?;
        if item.owner_id != actor {
            return Err(BookingError::Unauthorized);
        }
        let mut list = self.reservations.list_for_item(&item_id).await?;
        list.sort_by(|a, b| a.interval.start.cmp(&b.interval.start).then(a.id.cmp(&b.id)));
        Ok(list)
    }
}
