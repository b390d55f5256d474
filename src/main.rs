//! # Lending Demo
//!
//! Walks one item through a typical booking round:
//! 1. An owner lists a drill.
//! 2. Two borrowers ask for overlapping weeks; the second is turned away.
//! 3. The owner approves, the loan ends, the owner marks it returned.
//! 4. The freed interval is booked again.

use chrono::{Duration, Utc};
use lending_booking::config::BookingConfig;
use lending_booking::lifecycle::{setup_tracing, LendingSystem};
use lending_booking::model::{ActorId, Interval, ItemCreate, ReservationRequest, SessionToken};
use lending_booking::state_machine::ReservationState;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = BookingConfig::from_env();
    info!("Starting lending demo");
    let system = LendingSystem::with_config(config);
    let mut changes = system.notifier.subscribe();

    let owner = SessionToken::from("session-olga");
    let alice = SessionToken::from("session-alice");
    let bruno = SessionToken::from("session-bruno");
    system.sessions.sign_in(owner.clone(), ActorId::from("olga")).await;
    system.sessions.sign_in(alice.clone(), ActorId::from("alice")).await;
    system.sessions.sign_in(bruno.clone(), ActorId::from("bruno")).await;

    let item_id = system
        .catalog_client
        .create_item(ItemCreate {
            name: "Cordless drill".to_string(),
            owner_id: ActorId::from("olga"),
            available: true,
        })
        .await
        .map_err(|e| e.to_string())?;

    let start = Utc::now() + Duration::days(7);
    let week = Interval::new(start, start + Duration::days(7));
    let overlapping = Interval::new(start + Duration::days(3), start + Duration::days(10));

    let span = tracing::info_span!("booking");
    let reservation = async {
        let first = system
            .booking
            .request_reservation(
                &alice,
                ReservationRequest {
                    item_id: item_id.clone(),
                    interval: week,
                    note: Some("Putting up shelves".to_string()),
                },
            )
            .await
            .map_err(|e| e.to_string())?;

        match system
            .booking
            .request_reservation(
                &bruno,
                ReservationRequest {
                    item_id: item_id.clone(),
                    interval: overlapping,
                    note: None,
                },
            )
            .await
        {
            Ok(r) => warn!(id = %r.id, "Overlapping request was admitted"),
            Err(e) => info!(error = %e, "Overlapping request rejected"),
        }
        Ok::<_, String>(first)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("approval");
    async {
        system
            .booking
            .transition(&owner, reservation.id.clone(), ReservationState::Approved)
            .await
            .map_err(|e| e.to_string())?;
        if let Err(e) = system.booking.cancel_reservation(&owner, reservation.id.clone()).await {
            info!(error = %e, "Owner cannot cancel on the borrower's behalf");
        }
        system
            .booking
            .transition(&owner, reservation.id.clone(), ReservationState::Returned)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    let rebooked = system
        .booking
        .request_reservation(
            &bruno,
            ReservationRequest {
                item_id: item_id.clone(),
                interval: overlapping,
                note: None,
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(id = %rebooked.id, interval = %rebooked.interval, "Freed interval booked again");

    let history = system
        .booking
        .item_reservations(&owner, item_id)
        .await
        .map_err(|e| e.to_string())?;
    for r in &history {
        info!(id = %r.id, requester = %r.requester_id, state = %r.state, "History");
    }

    let mut signals = 0;
    while changes.try_recv().is_ok() {
        signals += 1;
    }
    info!(signals, "Change notifications observed");

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
