//! Seatplan Core - Floor plan editing engine
//!
//! Stateful side of the seat planner: the tables of one room, the DJ booth
//! and photo box markers, selection, drag gestures and persistence. The
//! pure layout rules (footprints, constraints, seat layout, capacity
//! planning) come from `seatplan-logic`.
//!
//! # Architecture
//!
//! - **Components**: plain data (`Table`, `Accessories`, `Selection`)
//! - **Systems**: logic that mutates components (`TableCollection`, guest
//!   edits, the drag state machine)
//! - **Engine**: `FloorPlan`, which owns everything, persists after each
//!   change and notifies listeners
//!
//! # Example
//!
//! ```rust
//! use seatplan_core::prelude::*;
//! use seatplan_core::persistence::MemoryStore;
//!
//! let mut plan = FloorPlan::open(RoomConfig::default(), MemoryStore::new());
//! plan.set_guest_count(38);
//!
//! let seats: u32 = plan
//!     .tables()
//!     .iter()
//!     .filter(|t| !t.is_gift())
//!     .map(|t| t.seat_count)
//!     .sum();
//! assert_eq!(seats, 38);
//! ```

pub mod components;
pub mod engine;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ChangeListener, FloorPlan, FloorPlanView};
    pub use crate::systems::{CoordinateSpace, DragOutcome, DragTarget, IdentitySpace, ZoomedSpace};
    pub use seatplan_logic::config::RoomConfig;
    pub use seatplan_logic::footprint::TableVariant;
    pub use seatplan_logic::geometry::{Point, Rect};
}
