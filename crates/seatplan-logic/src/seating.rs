//! Seat layout - where each chair goes around a table body.
//!
//! Algorithm for standard tables:
//! 1. Pick per-side chair counts from the seat count (top/bottom first,
//!    short sides last).
//! 2. Force the four counts to sum to the seat count, adjusting only the
//!    top side.
//! 3. Spread each side's chairs evenly along that side, `GAP + SIZE/2`
//!    outside the body edge.
//!
//! Positions are chair centres relative to the container centre, in the
//! table's own (unrotated) frame; the renderer applies rotation.

use serde::{Deserialize, Serialize};

use crate::constants::chairs;
use crate::footprint::{Footprint, TableVariant};

/// Side of the table body a chair sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Chair count per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCounts {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl SideCounts {
    pub fn total(&self) -> u32 {
        self.top + self.right + self.bottom + self.left
    }
}

/// One chair centre, relative to the container centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatPosition {
    pub side: Side,
    pub dx: f32,
    pub dy: f32,
}

/// Per-side distribution for a standard table with `n` chairs.
pub fn side_counts(n: u32) -> SideCounts {
    let mut counts = match n {
        0..=2 => SideCounts {
            top: n,
            ..SideCounts::default()
        },
        3..=4 => {
            let top = n.div_ceil(2);
            SideCounts {
                top,
                bottom: n - top,
                ..SideCounts::default()
            }
        }
        5..=6 => {
            let rest = n - 4;
            let right = rest.div_ceil(2);
            SideCounts {
                top: 2,
                bottom: 2,
                right,
                left: rest - right,
            }
        }
        // Reads as a full 8-table with the left slot empty.
        7 => SideCounts {
            top: 3,
            bottom: 3,
            right: 1,
            left: 0,
        },
        8 => SideCounts {
            top: 3,
            bottom: 3,
            right: 1,
            left: 1,
        },
        _ => {
            let long = n.div_ceil(4);
            let rest = n.saturating_sub(long * 2);
            let right = rest.div_ceil(2);
            SideCounts {
                top: long,
                bottom: long,
                right,
                left: rest - right,
            }
        }
    };

    let total = counts.total();
    if total < n {
        counts.top += n - total;
    } else if total > n {
        counts.top = counts.top.saturating_sub(total - n);
    }
    counts
}

/// Offset of chair `i` of `k` along a side of length `len`, from its midpoint.
fn along_side(i: u32, k: u32, len: f32) -> f32 {
    if k <= 1 {
        0.0
    } else {
        (i + 1) as f32 * (len / (k + 1) as f32) - len / 2.0
    }
}

/// Chair positions for a table, clockwise from the top-left.
pub fn layout_seats(
    footprint: &Footprint,
    seat_count: u32,
    variant: TableVariant,
) -> Vec<SeatPosition> {
    let bw = footprint.body_width;
    let bh = footprint.body_height;

    match variant {
        TableVariant::Gift => Vec::new(),
        TableVariant::Royal => {
            // Evenly spaced on the long side facing the room (the left side);
            // uses the (n + 1) spacing even for a single chair.
            let dx = -(bw / 2.0 + chairs::CENTER_OFFSET);
            (0..seat_count)
                .map(|i| SeatPosition {
                    side: Side::Left,
                    dx,
                    dy: (i + 1) as f32 * (bh / (seat_count + 1) as f32) - bh / 2.0,
                })
                .collect()
        }
        TableVariant::Standard => {
            let counts = side_counts(seat_count);
            let edge_y = bh / 2.0 + chairs::CENTER_OFFSET;
            let edge_x = bw / 2.0 + chairs::CENTER_OFFSET;
            let mut seats = Vec::with_capacity(counts.total() as usize);

            for i in 0..counts.top {
                seats.push(SeatPosition {
                    side: Side::Top,
                    dx: along_side(i, counts.top, bw),
                    dy: -edge_y,
                });
            }
            for i in 0..counts.right {
                seats.push(SeatPosition {
                    side: Side::Right,
                    dx: edge_x,
                    dy: along_side(i, counts.right, bh),
                });
            }
            // Bottom and left run backwards to keep the clockwise order.
            for i in 0..counts.bottom {
                seats.push(SeatPosition {
                    side: Side::Bottom,
                    dx: -along_side(i, counts.bottom, bw),
                    dy: edge_y,
                });
            }
            for i in 0..counts.left {
                seats.push(SeatPosition {
                    side: Side::Left,
                    dx: -edge_x,
                    dy: -along_side(i, counts.left, bh),
                });
            }
            seats
        }
    }
}
