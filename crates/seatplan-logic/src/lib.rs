//! Pure layout logic for seat plans.
//!
//! This crate contains the table layout rules that are independent of any
//! storage, renderer, or UI. Functions take plain data and return results,
//! making them unit-testable and usable from the stateful engine, a native
//! harness, or any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Room geometry, accessory sizes, capacity limits (JSON-loadable) |
//! | [`constants`] | Chair geometry, body classes, seat caps, rotation steps |
//! | [`constraints`] | Per-variant position clamping, accessory clamping |
//! | [`footprint`] | Table variants and body/container size from seat count |
//! | [`geometry`] | Points, rectangles, panic-free axis clamp |
//! | [`placement`] | Empty-space scan for a single new table |
//! | [`reconcile`] | Guest count → new table seat counts under a table cap |
//! | [`seating`] | Per-side chair distribution and chair positions |

pub mod config;
pub mod constants;
pub mod constraints;
pub mod footprint;
pub mod geometry;
pub mod placement;
pub mod reconcile;
pub mod seating;
