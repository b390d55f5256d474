//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); log lines carry an
//! `entity_type` field instead.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: `Actor started` and `Shutdown` with the final store size
//! - **Store Operations**: inserts, lookups, lists and state updates, at `debug`
//! - **Decisions**: admitted reservations and applied transitions at `info`, rejected
//!   requests at `debug` inside the request span
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every store round trip
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a request and its approval look like:
//!
//! ```text
//! INFO booking:request_reservation: Created entity_type="Reservation" id=reservation_1 size=1
//! INFO booking:request_reservation: Reservation admitted reservation_id=reservation_1
//! INFO approval:transition: Updated entity_type="Reservation" id=reservation_1 state=APPROVED
//! ```

/// Initializes the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
