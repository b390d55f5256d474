use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{table, ActorRole, ReservationState};
use crate::admission::first_overlap;
use crate::booking::BookingError;
use crate::collaborators::{Catalog, ChangeNotifier, Clock, Collaborators, ReservationRepository};
use crate::config::BookingConfig;
use crate::model::{ActorId, Reservation, ReservationId};

/// Applies lifecycle transitions to stored reservations.
#[derive(Clone)]
pub struct Transitioner {
    catalog: Arc<dyn Catalog>,
    reservations: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
    revalidate_on_approval: bool,
}

impl Transitioner {
    pub fn new(collaborators: &Collaborators, config: &BookingConfig) -> Self {
        Self {
            catalog: collaborators.catalog.clone(),
            reservations: collaborators.reservations.clone(),
            notifier: collaborators.notifier.clone(),
            clock: collaborators.clock.clone(),
            revalidate_on_approval: config.revalidate_on_approval,
        }
    }

    /// Moves `reservation_id` to `target` on behalf of `actor_id`.
    ///
    /// Resolution order: existence, role, authorization, legality, then the
    /// optional approval re-check, then a compare-and-set write against the state
    /// observed in the first step. With the re-check on, the write is exclusive, so
    /// two racing approvals of overlapping reservations cannot both land.
    ///
    /// # Errors
    /// `ReservationNotFound`, `Unauthorized`, `IllegalTransition`,
    /// `IntervalConflict` (approval re-check only), `ConflictFailure` when the
    /// reservation changed underneath us, or `Infrastructure`.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        reservation_id: ReservationId,
        actor_id: ActorId,
        target: ReservationState,
    ) -> Result<Reservation, BookingError> {
        let current = self
            .reservations
            .get(&reservation_id)
            .await?
            .ok_or_else(|| BookingError::ReservationNotFound(reservation_id.clone()))?;

        let role = self.role_of(&actor_id, &current).await?;
        debug!(?role, from = %current.state, "Checking transition");
        table::check(role, current.state, target)?;

        // The store repeats the overlap check atomically with the write; this read
        // only rejects the obvious case early.
        let exclusive = target == ReservationState::Approved && self.revalidate_on_approval;
        if exclusive {
            self.ensure_no_approved_overlap(&current).await?;
        }

        let updated = self
            .reservations
            .update_state(
                &reservation_id,
                target,
                current.state,
                exclusive,
                self.clock.now(),
            )
            .await?;

        info!(from = %current.state, to = %updated.state, "Reservation transitioned");
        self.notifier.reservation_changed(&updated.item_id);
        Ok(updated)
    }

    /// Shorthand for `transition(reservation_id, actor_id, Cancelled)`.
    ///
    /// # Errors
    /// Same as [`Transitioner::transition`].
    pub async fn cancel_reservation(
        &self,
        reservation_id: ReservationId,
        actor_id: ActorId,
    ) -> Result<Reservation, BookingError> {
        self.transition(reservation_id, actor_id, ReservationState::Cancelled)
            .await
    }

    /// Role of `actor_id` with respect to `reservation`.
    ///
    /// # Errors
    /// `Infrastructure` when the catalog cannot be reached.
    pub async fn role_of(
        &self,
        actor_id: &ActorId,
        reservation: &Reservation,
    ) -> Result<ActorRole, BookingError> {
        let item = self.catalog.get_item(&reservation.item_id).await?;
        let owner = item.as_ref().map(|item| &item.owner_id);
        Ok(ActorRole::of(actor_id, owner, &reservation.requester_id))
    }

    async fn ensure_no_approved_overlap(&self, candidate: &Reservation) -> Result<(), BookingError> {
        let approved: Vec<Reservation> = self
            .reservations
            .list_active_for_item(&candidate.item_id)
            .await?
            .into_iter()
            .filter(|r| r.id != candidate.id && r.state == ReservationState::Approved)
            .collect();
        match first_overlap(&approved, &candidate.interval) {
            Some(existing) => {
                debug!(existing = %existing.id, "Approval would double-book");
                Err(BookingError::IntervalConflict)
            }
            None => Ok(()),
        }
    }
}
