use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationState {
    /// Requested by a borrower, waiting on the owner.
    Pending,
    /// Granted by the owner.
    Approved,
    /// Declined by the owner. Terminal.
    Rejected,
    /// Item came back. Terminal.
    Returned,
    /// Withdrawn by the borrower. Terminal.
    Cancelled,
}

impl ReservationState {
    /// State every admitted reservation starts in.
    pub const INITIAL: Self = Self::Pending;

    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Returned,
        Self::Cancelled,
    ];

    /// Active reservations occupy calendar capacity and block overlapping requests.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Returned | Self::Cancelled)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Returned => "RETURNED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
