//! Data types of the floor plan.
//!
//! Components are plain data structs with small helpers.
//! Mutating behavior lives in systems.

mod accessory;
mod selection;
mod table;

pub use accessory::*;
pub use selection::*;
pub use table::*;
