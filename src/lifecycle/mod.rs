//! Starting, wiring and stopping the in-memory lending system.

pub mod lending_system;
pub mod tracing;

pub use lending_system::*;
pub use self::tracing::*;
