//! Configuration for the booking core.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Booking core configuration.
///
/// Defaults keep the lending app's booking form rules: short notes, no starts in the past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Longest borrower note accepted, in characters (default: 500)
    pub max_note_len: usize,
    /// Reject intervals starting before now (default: true)
    pub reject_past_start: bool,
    /// Refuse to approve a reservation overlapping another approved one (default: false)
    pub revalidate_on_approval: bool,
    /// Capacity of each actor's request channel (default: 32)
    pub channel_buffer: usize,
    /// Capacity of the change-notification broadcast channel (default: 64)
    pub notify_capacity: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_note_len: 500,
            reject_past_start: true,
            revalidate_on_approval: false,
            channel_buffer: 32,
            notify_capacity: 64,
        }
    }
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `LENDING_MAX_NOTE_LEN` | `max_note_len` |
    /// | `LENDING_REJECT_PAST_START` | `reject_past_start` |
    /// | `LENDING_REVALIDATE_ON_APPROVAL` | `revalidate_on_approval` |
    /// | `LENDING_CHANNEL_BUFFER` | `channel_buffer` |
    /// | `LENDING_NOTIFY_CAPACITY` | `notify_capacity` |
    ///
    /// Unset variables keep their default. Unparseable ones are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`BookingConfig::from_env`], reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_note_len: parse_or(&lookup, "LENDING_MAX_NOTE_LEN", defaults.max_note_len),
            reject_past_start: parse_or(
                &lookup,
                "LENDING_REJECT_PAST_START",
                defaults.reject_past_start,
            ),
            revalidate_on_approval: parse_or(
                &lookup,
                "LENDING_REVALIDATE_ON_APPROVAL",
                defaults.revalidate_on_approval,
            ),
            channel_buffer: parse_or(&lookup, "LENDING_CHANNEL_BUFFER", defaults.channel_buffer)
                .max(1),
            notify_capacity: parse_or(
                &lookup,
                "LENDING_NOTIFY_CAPACITY",
                defaults.notify_capacity,
            )
            .max(1),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparseable config value");
            default
        }),
        None => default,
    }
}
