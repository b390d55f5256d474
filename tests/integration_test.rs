use chrono::{DateTime, Duration, TimeZone, Utc};
use lending_booking::booking::BookingError;
use lending_booking::collaborators::FixedClock;
use lending_booking::config::BookingConfig;
use lending_booking::lifecycle::LendingSystem;
use lending_booking::model::{
    ActorId, Interval, ItemCreate, ItemId, Reservation, ReservationCreate, ReservationId,
    ReservationRequest, SessionToken,
};
use lending_booking::state_machine::ReservationState;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap()
}

/// `[Jan start, Jan end)` of 2030, after the fixture clock.
fn jan(start: u32, end: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2030, 1, start, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2030, 1, end, 0, 0, 0).unwrap(),
    )
}

fn request(item_id: &ItemId, interval: Interval) -> ReservationRequest {
    ReservationRequest {
        item_id: item_id.clone(),
        interval,
        note: None,
    }
}

/// A running system with one available item owned by `olga`, and three sessions:
/// the owner, a borrower (`bea`) and a bystander (`carl`).
struct Fixture {
    system: LendingSystem,
    owner: SessionToken,
    borrower: SessionToken,
    other: SessionToken,
    item_id: ItemId,
}

async fn fixture(config: BookingConfig) -> Fixture {
    let system = LendingSystem::with_clock(config, Arc::new(FixedClock::new(now())));

    let owner = SessionToken::from("s-olga");
    let borrower = SessionToken::from("s-bea");
    let other = SessionToken::from("s-carl");
    system.sessions.sign_in(owner.clone(), ActorId::from("olga")).await;
    system.sessions.sign_in(borrower.clone(), ActorId::from("bea")).await;
    system.sessions.sign_in(other.clone(), ActorId::from("carl")).await;

    let item_id = system
        .catalog_client
        .create_item(ItemCreate {
            name: "Tent".to_string(),
            owner_id: ActorId::from("olga"),
            available: true,
        })
        .await
        .expect("Failed to create item");

    Fixture {
        system,
        owner,
        borrower,
        other,
        item_id,
    }
}

/// Full end-to-end round trip: request, approve, return.
#[tokio::test]
async fn test_request_approve_return_round_trip() {
    let f = fixture(BookingConfig::default()).await;
    let booking = f.system.booking.clone();

    let created = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .expect("Failed to request");
    assert_eq!(created.state, ReservationState::Pending);
    assert_eq!(created.requester_id, ActorId::from("bea"));
    assert_eq!(created.created_at, now());
    assert_eq!(created.updated_at, now());

    let approved = booking
        .transition(&f.owner, created.id.clone(), ReservationState::Approved)
        .await
        .expect("Failed to approve");
    assert_eq!(approved.state, ReservationState::Approved);

    let returned = booking
        .transition(&f.owner, created.id.clone(), ReservationState::Returned)
        .await
        .expect("Failed to return");
    assert_eq!(returned.state, ReservationState::Returned);
    assert_eq!(returned.created_at, created.created_at);

    // Terminal: nothing leaves Returned.
    let again = booking
        .transition(&f.owner, created.id.clone(), ReservationState::Rejected)
        .await;
    assert_eq!(
        again,
        Err(BookingError::IllegalTransition {
            from: ReservationState::Returned,
            to: ReservationState::Rejected,
        })
    );

    // The returned loan no longer holds its interval.
    booking
        .request_reservation(&f.other, request(&f.item_id, jan(10, 12)))
        .await
        .expect("Interval should be free again");

    drop(booking);
    f.system.shutdown().await.expect("Shutdown failed");
}

/// Two overlapping Pending reservations loaded past the admission checks.
async fn seed_overlapping_pending(f: &Fixture) -> (Reservation, Reservation) {
    let seed = |requester: &str, interval: Interval| ReservationCreate {
        item_id: f.item_id.clone(),
        requester_id: ActorId::from(requester),
        interval,
        note: None,
        created_at: now(),
    };
    let r1 = f
        .system
        .reservation_client
        .import(seed("bea", jan(10, 12)))
        .await
        .expect("Failed to import");
    let r2 = f
        .system
        .reservation_client
        .import(seed("carl", jan(11, 13)))
        .await
        .expect("Failed to import");
    (r1, r2)
}

/// Approval does not re-check overlap by default.
#[tokio::test]
async fn test_overlapping_pending_both_approvable_by_default() {
    let f = fixture(BookingConfig::default()).await;
    let (r1, r2) = seed_overlapping_pending(&f).await;
    assert_eq!(r1.state, ReservationState::Pending);
    assert_eq!(r2.state, ReservationState::Pending);

    let booking = &f.system.booking;
    booking
        .transition(&f.owner, r1.id.clone(), ReservationState::Approved)
        .await
        .expect("Failed to approve R1");
    let second = booking
        .transition(&f.owner, r2.id.clone(), ReservationState::Approved)
        .await
        .expect("Default config approves without re-checking");
    assert_eq!(second.state, ReservationState::Approved);
}

#[tokio::test]
async fn test_approval_revalidation_rejects_double_booking() {
    let config = BookingConfig {
        revalidate_on_approval: true,
        ..BookingConfig::default()
    };
    let f = fixture(config).await;
    let (r1, r2) = seed_overlapping_pending(&f).await;
    let booking = &f.system.booking;

    booking
        .transition(&f.owner, r1.id.clone(), ReservationState::Approved)
        .await
        .expect("Failed to approve R1");
    let second = booking
        .transition(&f.owner, r2.id.clone(), ReservationState::Approved)
        .await;
    assert_eq!(second, Err(BookingError::IntervalConflict));

    // R2 is untouched and can still be rejected.
    let r2_now = booking
        .reservation(&f.owner, r2.id.clone())
        .await
        .expect("Failed to read R2");
    assert_eq!(r2_now.state, ReservationState::Pending);
    booking
        .transition(&f.owner, r2.id, ReservationState::Rejected)
        .await
        .expect("Failed to reject R2");
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let f = fixture(BookingConfig::default()).await;
    let result = f
        .system
        .booking
        .request_reservation(&f.owner, request(&f.item_id, jan(10, 12)))
        .await;
    assert_eq!(result, Err(BookingError::SelfBookingForbidden));
}

#[tokio::test]
async fn test_unavailable_item_rejects_everyone() {
    let f = fixture(BookingConfig::default()).await;
    f.system
        .catalog_client
        .set_available(f.item_id.clone(), false)
        .await
        .expect("Failed to switch item off");

    for session in [&f.borrower, &f.other, &f.owner] {
        let result = f
            .system
            .booking
            .request_reservation(session, request(&f.item_id, jan(10, 12)))
            .await;
        assert_eq!(result, Err(BookingError::ItemUnavailable(f.item_id.clone())));
    }
}

#[tokio::test]
async fn test_cancel_twice_is_illegal() {
    let f = fixture(BookingConfig::default()).await;
    let booking = &f.system.booking;
    let r1 = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();

    let cancelled = booking
        .cancel_reservation(&f.borrower, r1.id.clone())
        .await
        .expect("Failed to cancel");
    assert_eq!(cancelled.state, ReservationState::Cancelled);

    let again = booking.cancel_reservation(&f.borrower, r1.id).await;
    assert_eq!(
        again,
        Err(BookingError::IllegalTransition {
            from: ReservationState::Cancelled,
            to: ReservationState::Cancelled,
        })
    );
}

#[tokio::test]
async fn test_overlap_rules_for_new_requests() {
    let f = fixture(BookingConfig::default()).await;
    let booking = &f.system.booking;

    let held = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();

    // A Pending reservation blocks overlapping requests.
    let clash = booking
        .request_reservation(&f.other, request(&f.item_id, jan(11, 13)))
        .await;
    assert_eq!(clash, Err(BookingError::IntervalConflict));

    // Containment in either direction is an overlap.
    let inside = booking
        .request_reservation(&f.other, request(&f.item_id, jan(10, 11)))
        .await;
    assert_eq!(inside, Err(BookingError::IntervalConflict));
    let around = booking
        .request_reservation(&f.other, request(&f.item_id, jan(9, 14)))
        .await;
    assert_eq!(around, Err(BookingError::IntervalConflict));

    // Back-to-back is fine on both sides.
    booking
        .request_reservation(&f.other, request(&f.item_id, jan(12, 14)))
        .await
        .expect("Adjacent interval after should be admitted");
    booking
        .request_reservation(&f.other, request(&f.item_id, jan(8, 10)))
        .await
        .expect("Adjacent interval before should be admitted");

    // Approved blocks too; rejection frees the slot.
    booking
        .transition(&f.owner, held.id.clone(), ReservationState::Approved)
        .await
        .unwrap();
    assert_eq!(
        booking
            .request_reservation(&f.other, request(&f.item_id, jan(11, 12)))
            .await,
        Err(BookingError::IntervalConflict)
    );
    booking
        .cancel_reservation(&f.borrower, held.id)
        .await
        .expect("Borrower may cancel an approved loan");
    booking
        .request_reservation(&f.other, request(&f.item_id, jan(11, 12)))
        .await
        .expect("Cancelled reservation frees its interval");
}

#[tokio::test]
async fn test_admission_check_order() {
    let f = fixture(BookingConfig::default()).await;
    let booking = &f.system.booking;
    let missing = ItemId(99);

    // Unknown session beats everything.
    let stranger = SessionToken::from("nobody");
    assert_eq!(
        booking
            .request_reservation(&stranger, request(&missing, jan(12, 10)))
            .await,
        Err(BookingError::Unauthenticated)
    );

    // Empty interval before item lookup.
    assert_eq!(
        booking
            .request_reservation(&f.borrower, request(&missing, jan(10, 10)))
            .await,
        Err(BookingError::InvalidInterval)
    );

    // Note length, then start in the past, then item existence.
    let mut long_note = request(&missing, jan(10, 12));
    long_note.note = Some("x".repeat(501));
    assert_eq!(
        booking.request_reservation(&f.borrower, long_note).await,
        Err(BookingError::NoteTooLong { max: 500 })
    );

    let past = Interval::new(now() - Duration::days(2), now() + Duration::days(1));
    assert_eq!(
        booking
            .request_reservation(&f.borrower, request(&missing, past))
            .await,
        Err(BookingError::StartInPast)
    );

    assert_eq!(
        booking
            .request_reservation(&f.borrower, request(&missing, jan(10, 12)))
            .await,
        Err(BookingError::ItemNotFound(missing))
    );

    // A note of exactly the limit is accepted.
    let mut max_note = request(&f.item_id, jan(10, 12));
    max_note.note = Some("é".repeat(500));
    let admitted = booking
        .request_reservation(&f.borrower, max_note)
        .await
        .expect("Note at the limit should be accepted");
    assert_eq!(admitted.note.map(|n| n.chars().count()), Some(500));
}

#[tokio::test]
async fn test_transition_authorization() {
    let f = fixture(BookingConfig::default()).await;
    let booking = &f.system.booking;
    let r = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();

    // Borrowers cannot approve their own request.
    assert_eq!(
        booking
            .transition(&f.borrower, r.id.clone(), ReservationState::Approved)
            .await,
        Err(BookingError::Unauthorized)
    );
    // Owners cannot cancel for the borrower; bystanders cannot do anything.
    assert_eq!(
        booking.cancel_reservation(&f.owner, r.id.clone()).await,
        Err(BookingError::Unauthorized)
    );
    assert_eq!(
        booking
            .transition(&f.other, r.id.clone(), ReservationState::Rejected)
            .await,
        Err(BookingError::Unauthorized)
    );
    // Nobody may move a reservation back to Pending.
    assert_eq!(
        booking
            .transition(&f.owner, r.id.clone(), ReservationState::Pending)
            .await,
        Err(BookingError::IllegalTransition {
            from: ReservationState::Pending,
            to: ReservationState::Pending,
        })
    );
    // Returned only follows Approved.
    assert_eq!(
        booking
            .transition(&f.owner, r.id.clone(), ReservationState::Returned)
            .await,
        Err(BookingError::IllegalTransition {
            from: ReservationState::Pending,
            to: ReservationState::Returned,
        })
    );

    booking
        .transition(&f.owner, r.id.clone(), ReservationState::Approved)
        .await
        .unwrap();
    // No rejecting after approval.
    assert_eq!(
        booking
            .transition(&f.owner, r.id.clone(), ReservationState::Rejected)
            .await,
        Err(BookingError::IllegalTransition {
            from: ReservationState::Approved,
            to: ReservationState::Rejected,
        })
    );

    assert_eq!(
        booking
            .transition(&f.owner, ReservationId(404), ReservationState::Approved)
            .await,
        Err(BookingError::ReservationNotFound(ReservationId(404)))
    );
}

#[tokio::test]
async fn test_read_side_visibility_and_ordering() {
    let f = fixture(BookingConfig::default()).await;
    let booking = &f.system.booking;

    let late = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(20, 22)))
        .await
        .unwrap();
    let early = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(5, 7)))
        .await
        .unwrap();
    let carls = booking
        .request_reservation(&f.other, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();

    // Requester and owner see a reservation, bystanders do not.
    assert!(booking.reservation(&f.borrower, late.id.clone()).await.is_ok());
    assert!(booking.reservation(&f.owner, late.id.clone()).await.is_ok());
    assert_eq!(
        booking.reservation(&f.other, late.id.clone()).await,
        Err(BookingError::Unauthorized)
    );

    // Newest first; equal timestamps fall back to the higher id.
    let mine: Vec<_> = booking
        .my_reservations(&f.borrower)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(mine, vec![early.id.clone(), late.id.clone()]);

    // Owner view is ordered by start.
    let by_start: Vec<_> = booking
        .item_reservations(&f.owner, f.item_id.clone())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(by_start, vec![early.id, carls.id, late.id]);

    assert_eq!(
        booking
            .item_reservations(&f.borrower, f.item_id.clone())
            .await,
        Err(BookingError::Unauthorized)
    );
    assert_eq!(
        booking.item_reservations(&f.owner, ItemId(77)).await,
        Err(BookingError::ItemNotFound(ItemId(77)))
    );
}

/// Many borrowers race for the same week; exactly one gets it.
#[tokio::test]
async fn test_concurrent_requests_admit_exactly_one() {
    let f = fixture(BookingConfig::default()).await;

    let mut tasks = Vec::new();
    for n in 0..16 {
        let booking = f.system.booking.clone();
        let session = SessionToken::from(format!("s-racer-{n}").as_str());
        f.system
            .sessions
            .sign_in(session.clone(), ActorId::from(format!("racer-{n}")))
            .await;
        let req = request(&f.item_id, jan(10, 17));
        tasks.push(tokio::spawn(async move {
            booking.request_reservation(&session, req).await
        }));
    }

    let mut admitted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(e) => assert_eq!(e, BookingError::IntervalConflict),
        }
    }
    assert_eq!(admitted, 1);

    let active = f
        .system
        .booking
        .item_reservations(&f.owner, f.item_id.clone())
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

/// Approve and reject race on one Pending reservation; only one decision lands.
#[tokio::test]
async fn test_concurrent_decisions_on_one_reservation() {
    let f = fixture(BookingConfig::default()).await;
    let r = f
        .system
        .booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();

    let approve = {
        let booking = f.system.booking.clone();
        let (owner, id) = (f.owner.clone(), r.id.clone());
        tokio::spawn(async move {
            booking
                .transition(&owner, id, ReservationState::Approved)
                .await
        })
    };
    let reject = {
        let booking = f.system.booking.clone();
        let (owner, id) = (f.owner.clone(), r.id.clone());
        tokio::spawn(async move {
            booking
                .transition(&owner, id, ReservationState::Rejected)
                .await
        })
    };

    let outcomes = [approve.await.unwrap(), reject.await.unwrap()];
    let winners: Vec<_> = outcomes.iter().filter_map(|o| o.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    for outcome in &outcomes {
        if let Err(e) = outcome {
            assert!(
                matches!(
                    e,
                    BookingError::ConflictFailure(_) | BookingError::IllegalTransition { .. }
                ),
                "unexpected error: {e:?}"
            );
        }
    }

    let stored = f
        .system
        .booking
        .reservation(&f.owner, r.id)
        .await
        .unwrap();
    assert_eq!(stored.state, winners[0].state);
}

#[tokio::test]
async fn test_changes_are_broadcast() {
    let f = fixture(BookingConfig::default()).await;
    let mut changes = f.system.notifier.subscribe();
    let booking = &f.system.booking;

    let r = booking
        .request_reservation(&f.borrower, request(&f.item_id, jan(10, 12)))
        .await
        .unwrap();
    assert_eq!(changes.recv().await.unwrap(), f.item_id);

    // Rejected requests change nothing.
    let _ = booking
        .request_reservation(&f.other, request(&f.item_id, jan(10, 12)))
        .await;
    assert!(changes.try_recv().is_err());

    booking
        .transition(&f.owner, r.id, ReservationState::Rejected)
        .await
        .unwrap();
    assert_eq!(changes.recv().await.unwrap(), f.item_id);
}

/// Approvals of two overlapping Pending reservations race; with the re-check on,
/// exactly one of them lands every time.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_approvals_with_revalidation() {
    let config = BookingConfig {
        revalidate_on_approval: true,
        ..BookingConfig::default()
    };

    for _ in 0..50 {
        let f = fixture(config.clone()).await;
        let (r1, r2) = seed_overlapping_pending(&f).await;

        let approvals: Vec<_> = [r1.id, r2.id]
            .into_iter()
            .map(|id| {
                let booking = f.system.booking.clone();
                let owner = f.owner.clone();
                tokio::spawn(async move {
                    booking
                        .transition(&owner, id, ReservationState::Approved)
                        .await
                })
            })
            .collect();

        let mut approved = 0;
        for approval in approvals {
            match approval.await.unwrap() {
                Ok(r) => {
                    assert_eq!(r.state, ReservationState::Approved);
                    approved += 1;
                }
                Err(e) => assert_eq!(e, BookingError::IntervalConflict),
            }
        }
        assert_eq!(approved, 1);

        let states: Vec<_> = f
            .system
            .booking
            .item_reservations(&f.owner, f.item_id.clone())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.state)
            .collect();
        assert_eq!(
            states
                .iter()
                .filter(|s| **s == ReservationState::Approved)
                .count(),
            1
        );
        assert!(states.contains(&ReservationState::Pending));
    }
}
