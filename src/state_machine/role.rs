use serde::{Deserialize, Serialize};

use crate::model::ActorId;

/// How the calling actor relates to a reservation.
///
/// Computed once per transition and fed to the authorization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    /// Owns the reserved item.
    Owner,
    /// Asked to borrow the item.
    Requester,
    /// Neither of the above.
    Other,
}

impl ActorRole {
    pub const ALL: [Self; 3] = [Self::Owner, Self::Requester, Self::Other];

    /// Classifies `actor` against the item owner and the reservation's requester.
    ///
    /// `owner` is `None` when the catalog no longer knows the item; nobody can act
    /// as its owner then. Ownership wins if the two ever coincide.
    pub fn of(actor: &ActorId, owner: Option<&ActorId>, requester: &ActorId) -> Self {
        if owner == Some(actor) {
            Self::Owner
        } else if requester == actor {
            Self::Requester
        } else {
            Self::Other
        }
    }
}
