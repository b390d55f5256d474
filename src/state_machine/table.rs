//! The transition table and the two lookups derived from it.
//!
//! | From              | To        | Who                 |
//! |-------------------|-----------|---------------------|
//! | Pending           | Approved  | Owner               |
//! | Pending           | Rejected  | Owner               |
//! | Pending, Approved | Cancelled | Requester           |
//! | Approved          | Returned  | Owner or Requester  |
//!
//! Any pair not listed is illegal for everyone.

use super::{ActorRole, ReservationState};
use crate::booking::BookingError;

use ActorRole::{Owner, Requester};
use ReservationState::{Approved, Cancelled, Pending, Rejected, Returned};

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    pub from: &'static [ReservationState],
    pub to: ReservationState,
    pub roles: &'static [ActorRole],
}

pub const TRANSITIONS: &[TransitionRule] = &[
    TransitionRule {
        from: &[Pending],
        to: Approved,
        roles: &[Owner],
    },
    TransitionRule {
        from: &[Pending],
        to: Rejected,
        roles: &[Owner],
    },
    TransitionRule {
        from: &[Pending, Approved],
        to: Cancelled,
        roles: &[Requester],
    },
    TransitionRule {
        from: &[Approved],
        to: Returned,
        roles: &[Owner, Requester],
    },
];

/// Whether any rule leads into `target` at all. `Pending` is never a target.
pub fn is_reachable(target: ReservationState) -> bool {
    TRANSITIONS.iter().any(|rule| rule.to == target)
}

/// Whether `role` may request a move into `target`, whatever the current state.
pub fn is_authorized(role: ActorRole, target: ReservationState) -> bool {
    TRANSITIONS
        .iter()
        .any(|rule| rule.to == target && rule.roles.contains(&role))
}

/// Whether `from -> to` is a legal edge, whoever asks.
pub fn is_legal(from: ReservationState, to: ReservationState) -> bool {
    TRANSITIONS
        .iter()
        .any(|rule| rule.to == to && rule.from.contains(&from))
}

/// Runs authorization, then legality.
///
/// A target no rule leads into is illegal for every actor, so it reports
/// `IllegalTransition` rather than `Unauthorized`.
///
/// # Errors
/// - [`BookingError::Unauthorized`] when `role` may not move reservations into `to`.
/// - [`BookingError::IllegalTransition`] when `from -> to` is not in the table.
pub fn check(
    role: ActorRole,
    from: ReservationState,
    to: ReservationState,
) -> Result<(), BookingError> {
    if is_reachable(to) && !is_authorized(role, to) {
        return Err(BookingError::Unauthorized);
    }
    if !is_legal(from, to) {
        return Err(BookingError::IllegalTransition { from, to });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActorRole::Other;

    #[test]
    fn test_authorization_matrix() {
        let expected = [
            (Approved, Owner, true),
            (Approved, Requester, false),
            (Approved, Other, false),
            (Rejected, Owner, true),
            (Rejected, Requester, false),
            (Rejected, Other, false),
            (Cancelled, Owner, false),
            (Cancelled, Requester, true),
            (Cancelled, Other, false),
            (Returned, Owner, true),
            (Returned, Requester, true),
            (Returned, Other, false),
            (Pending, Owner, false),
            (Pending, Requester, false),
            (Pending, Other, false),
        ];
        for (target, role, allowed) in expected {
            assert_eq!(is_authorized(role, target), allowed, "{role:?} -> {target}");
        }
    }

    #[test]
    fn test_legal_edges_are_exactly_the_table() {
        let legal = [
            (Pending, Approved),
            (Pending, Rejected),
            (Pending, Cancelled),
            (Approved, Cancelled),
            (Approved, Returned),
        ];
        for from in ReservationState::ALL {
            for to in ReservationState::ALL {
                assert_eq!(
                    is_legal(from, to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in ReservationState::ALL.into_iter().filter(|s| s.is_terminal()) {
            for to in ReservationState::ALL {
                assert!(!is_legal(from, to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_approved_cannot_be_rejected() {
        assert_eq!(
            check(Owner, Approved, Rejected),
            Err(BookingError::IllegalTransition {
                from: Approved,
                to: Rejected
            })
        );
    }

    #[test]
    fn test_authorization_checked_before_legality() {
        // Requester approving a cancelled reservation: both checks fail, auth wins.
        assert_eq!(
            check(Requester, Cancelled, Approved),
            Err(BookingError::Unauthorized)
        );
    }

    #[test]
    fn test_pending_target_is_illegal_for_everyone() {
        for role in ActorRole::ALL {
            for from in ReservationState::ALL {
                assert_eq!(
                    check(role, from, Pending),
                    Err(BookingError::IllegalTransition { from, to: Pending })
                );
            }
        }
    }
}
