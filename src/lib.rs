//! # Lending Booking
//!
//! Conflict resolution for a peer-to-peer lending platform: who may reserve which item
//! for which interval, and how a reservation moves through its lifecycle.
//!
//! ## Core Concepts
//!
//! ### Admission
//! A borrower asks for an item over a half-open interval `[start, end)`. The
//! [`AdmissionController`](admission::AdmissionController) runs a fixed sequence of
//! checks and either persists a `Pending` reservation or reports the first failed check.
//! Two active reservations of one item never overlap; back-to-back intervals are fine.
//!
//! ### Lifecycle
//! Owners approve or reject, borrowers cancel, owners mark approved loans returned.
//! The [`state_machine`] module holds the transition table and applies it with a
//! compare-and-set write, so two concurrent decisions on one reservation cannot
//! both succeed.
//!
//! ### Collaborators
//! The core owns no storage. Identity, catalog, persistence, change notification
//! and the clock are traits in [`collaborators`]. This crate ships in-memory versions
//! built as Tokio actors: each one owns its map and handles requests one at a time.
//!
//! ## Module Tour
//!
//! ### 1. The Decisions ([`admission`], [`state_machine`], [`booking`])
//! - **Role**: Pure booking rules, written against the collaborator traits.
//! - **Key items**: [`BookingService`](booking::BookingService),
//!   [`BookingError`](booking::BookingError),
//!   [`ReservationState`](state_machine::ReservationState).
//!
//! ### 2. The Stores ([`catalog_actor`], [`reservation_actor`], [`clients`])
//! - **Role**: In-memory collaborators. The reservation actor also enforces
//!   non-overlap on insert as a backstop.
//! - **Key items**: [`CatalogClient`](clients::CatalogClient),
//!   [`ReservationClient`](clients::ReservationClient).
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! - **Role**: Spawns the actors, wires the collaborators, shuts everything down.
//! - **Key items**: [`LendingSystem`](lifecycle::LendingSystem),
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 4. Plumbing ([`framework`], [`config`], [`model`])
//! Store errors and reply channels, env-driven [`BookingConfig`](config::BookingConfig),
//! and the plain data types.
//!
//! ## Testing
//!
//! See [`framework::mock`] for driving the core against scripted collaborators.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod admission;
pub mod booking;
pub mod catalog_actor;
pub mod clients;
pub mod collaborators;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod reservation_actor;
pub mod state_machine;
