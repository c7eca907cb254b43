//! Systems - logic that operates on components

mod collection;
mod drag;
mod guests;

pub use collection::*;
pub use drag::*;
pub use guests::*;
