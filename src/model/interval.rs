use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::booking::BookingError;

/// A half-open borrowing window `[start, end)`.
///
/// The end is exclusive, so a reservation ending at noon and another starting at
/// noon do not overlap. Fields are public because intervals also arrive from
/// deserialized payloads; [`Interval::is_valid`] is what admission relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Builds an interval without validating it.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Builds an interval, rejecting empty or reversed ranges.
    ///
    /// # Errors
    /// [`BookingError::InvalidInterval`] when `start >= end`.
    pub fn checked(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingError> {
        let interval = Self::new(start, end);
        if interval.is_valid() {
            Ok(interval)
        } else {
            Err(BookingError::InvalidInterval)
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Standard half-open overlap test.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}
