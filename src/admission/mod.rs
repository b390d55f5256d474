//! # Admission Controller
//!
//! Decides whether a borrowing request may become a reservation.
//!
//! Checks run in a fixed order and the first failure decides the rejection:
//!
//! 1. interval is non-empty (`InvalidInterval`)
//! 2. note fits the configured limit (`NoteTooLong`)
//! 3. interval does not start in the past, if enabled (`StartInPast`)
//! 4. item exists (`ItemNotFound`)
//! 5. item is switched on by its owner (`ItemUnavailable`)
//! 6. requester is not the owner (`SelfBookingForbidden`)
//! 7. no Pending or Approved reservation of the item overlaps (`IntervalConflict`)
//!
//! The controller holds no state between calls. Step 7 reads the active set from the
//! repository, and the repository's own exclusion check on insert catches requests that
//! raced past it; both surface as `IntervalConflict`.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::booking::BookingError;
use crate::collaborators::{Catalog, ChangeNotifier, Clock, Collaborators, ReservationRepository};
use crate::config::BookingConfig;
use crate::model::{ActorId, Interval, ItemId, Reservation, ReservationCreate};

/// Admits new reservations.
#[derive(Clone)]
pub struct AdmissionController {
    catalog: Arc<dyn Catalog>,
    reservations: Arc<dyn ReservationRepository>,
    notifier: Arc<dyn ChangeNotifier>,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
}

impl AdmissionController {
    pub fn new(collaborators: &Collaborators, config: BookingConfig) -> Self {
        Self {
            catalog: collaborators.catalog.clone(),
            reservations: collaborators.reservations.clone(),
            notifier: collaborators.notifier.clone(),
            clock: collaborators.clock.clone(),
            config,
        }
    }

    /// Admits `requester_id`'s request for `item_id` over `interval`.
    ///
    /// On success the new reservation is persisted in `Pending` and the change
    /// notifier is signalled for the item.
    ///
    /// # Errors
    /// The first failing admission check, or `Infrastructure` when the catalog or
    /// the repository cannot be reached.
    #[instrument(skip_all, fields(%item_id, %requester_id, %interval))]
    pub async fn request_reservation(
        &self,
        item_id: ItemId,
        requester_id: ActorId,
        interval: Interval,
        note: Option<String>,
    ) -> Result<Reservation, BookingError> {
        if !interval.is_valid() {
            return Err(BookingError::InvalidInterval);
        }
        if let Some(note) = &note {
            if note.chars().count() > self.config.max_note_len {
                return Err(BookingError::NoteTooLong {
                    max: self.config.max_note_len,
                });
            }
        }
        let now = self.clock.now();
        if self.config.reject_past_start && interval.start < now {
            return Err(BookingError::StartInPast);
        }

        let item = self
            .catalog
            .get_item(&item_id)
            .await?
            .ok_or_else(|| BookingError::ItemNotFound(item_id.clone()))?;
        if !item.available {
            return Err(BookingError::ItemUnavailable(item_id));
        }
        if item.owner_id == requester_id {
            return Err(BookingError::SelfBookingForbidden);
        }

        let active = self.reservations.list_active_for_item(&item_id).await?;
        if let Some(existing) = first_overlap(&active, &interval) {
            debug!(existing = %existing.id, state = %existing.state, "Interval taken");
            return Err(BookingError::IntervalConflict);
        }

        let reservation = self
            .reservations
            .insert(ReservationCreate {
                item_id,
                requester_id,
                interval,
                note,
                created_at: now,
            })
            .await?;

        info!(reservation_id = %reservation.id, "Reservation admitted");
        self.notifier.reservation_changed(&reservation.item_id);
        Ok(reservation)
    }
}

/// First active reservation in `existing` overlapping `candidate`.
pub fn first_overlap<'a>(existing: &'a [Reservation], candidate: &Interval) -> Option<&'a Reservation> {
    existing
        .iter()
        .find(|r| r.is_active() && r.interval.overlaps(candidate))
}
