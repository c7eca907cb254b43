//! Table footprint - body and container size from seat count and variant.
//!
//! The *body* is the table surface; the *container* is the body plus the
//! clearance its chairs need, and is what every boundary and overlap check
//! works with.
//!
//! Standard tables come in two body classes: up to six seats use the short
//! 55×33 body, seven and eight seats the long 61×33 body (a 7-seat table is
//! an 8-seat table with one empty slot). Beyond eight seats the long body
//! grows by one chair pitch per extra chair on its top side.

use serde::{Deserialize, Serialize};

use crate::constants::{bodies, chairs, seats};

/// Behavioral category of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableVariant {
    /// Regular banquet table; moves freely.
    Standard,
    /// Head table; glued to the right wall, chairs on one long side.
    Royal,
    /// Gift table; no chairs, exactly one per floor plan.
    Gift,
}

impl TableVariant {
    /// Largest seat count this variant accepts (0 for the chairless gift table).
    pub fn max_seats(&self) -> u32 {
        match self {
            TableVariant::Standard => seats::MAX_STANDARD,
            TableVariant::Royal => seats::MAX_ROYAL,
            TableVariant::Gift => 0,
        }
    }

    /// Whether the rotate button applies.
    pub fn can_rotate(&self) -> bool {
        !matches!(self, TableVariant::Royal)
    }
}

/// Physical size of a table, with and without chair clearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub body_width: f32,
    pub body_height: f32,
    pub container_width: f32,
    pub container_height: f32,
}

impl Footprint {
    fn with_clearance(body_width: f32, body_height: f32, clearance: f32) -> Self {
        Self {
            body_width,
            body_height,
            container_width: body_width + clearance * 2.0,
            container_height: body_height + clearance * 2.0,
        }
    }
}

/// Footprint of a table with `seat_count` chairs of the given variant.
pub fn compute_footprint(seat_count: u32, variant: TableVariant) -> Footprint {
    match variant {
        TableVariant::Gift => {
            Footprint::with_clearance(bodies::GIFT_WIDTH, bodies::GIFT_DEPTH, 0.0)
        }
        TableVariant::Royal => {
            let length = royal_length(seat_count);
            Footprint::with_clearance(bodies::DEPTH, length, chairs::PITCH)
        }
        TableVariant::Standard => {
            Footprint::with_clearance(standard_body_width(seat_count), bodies::DEPTH, chairs::SIZE)
        }
    }
}

/// Long side of a royal table.
pub fn royal_length(seat_count: u32) -> f32 {
    (bodies::ROYAL_BASE_LENGTH + seat_count as f32 * bodies::ROYAL_LENGTH_PER_SEAT)
        .clamp(bodies::ROYAL_MIN_LENGTH, bodies::ROYAL_MAX_LENGTH)
}

fn standard_body_width(seat_count: u32) -> f32 {
    if seat_count <= seats::SIX_CLASS_MAX {
        return bodies::SIX_WIDTH;
    }
    // An 8-table seats three chairs per long side.
    let top = seat_count.div_ceil(4);
    bodies::EIGHT_WIDTH + top.saturating_sub(3) as f32 * chairs::PITCH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_and_eight_seat_classes() {
        let six = compute_footprint(6, TableVariant::Standard);
        assert_eq!(
            six,
            Footprint {
                body_width: 55.0,
                body_height: 33.0,
                container_width: 79.0,
                container_height: 57.0,
            }
        );
        let eight = compute_footprint(8, TableVariant::Standard);
        assert_eq!(
            eight,
            Footprint {
                body_width: 61.0,
                body_height: 33.0,
                container_width: 85.0,
                container_height: 57.0,
            }
        );
    }

    #[test]
    fn seven_uses_the_eight_seat_body() {
        assert_eq!(
            compute_footprint(7, TableVariant::Standard),
            compute_footprint(8, TableVariant::Standard)
        );
    }

    #[test]
    fn small_tables_use_the_six_seat_body() {
        for n in 0..=6 {
            assert_eq!(
                compute_footprint(n, TableVariant::Standard),
                compute_footprint(6, TableVariant::Standard),
                "n={n}"
            );
        }
    }

    #[test]
    fn oversized_standard_grows_per_chair() {
        // 9..=12 seats put 3 chairs on top, 13 seats put 4.
        assert_eq!(compute_footprint(12, TableVariant::Standard).body_width, 61.0);
        assert_eq!(compute_footprint(13, TableVariant::Standard).body_width, 77.0);
    }

    #[test]
    fn gift_has_no_clearance() {
        let f = compute_footprint(8, TableVariant::Gift);
        assert_eq!((f.body_width, f.body_height), (61.0, 33.0));
        assert_eq!((f.container_width, f.container_height), (61.0, 33.0));
        assert_eq!(compute_footprint(0, TableVariant::Gift), f);
    }

    #[test]
    fn royal_length_clamped() {
        assert_eq!(royal_length(0), 40.0);
        assert_eq!(royal_length(1), 50.0);
        assert_eq!(royal_length(4), 80.0);
        assert_eq!(royal_length(8), 120.0);
        assert_eq!(royal_length(30), 120.0);
    }

    #[test]
    fn royal_container_reserves_chairs_on_both_axes() {
        let f = compute_footprint(4, TableVariant::Royal);
        assert_eq!(f.body_width, 33.0);
        assert_eq!(f.body_height, 80.0);
        assert_eq!(f.container_width, 33.0 + 32.0);
        assert_eq!(f.container_height, 80.0 + 32.0);
    }

    #[test]
    fn variant_capabilities() {
        assert!(TableVariant::Standard.can_rotate());
        assert!(TableVariant::Gift.can_rotate());
        assert!(!TableVariant::Royal.can_rotate());
        assert_eq!(TableVariant::Gift.max_seats(), 0);
    }
}
