//! Plain data types shared by the booking core and its collaborators.

pub mod ids;
pub mod interval;
pub mod item;
pub mod reservation;

pub use ids::*;
pub use interval::*;
pub use item::*;
pub use reservation::*;
