//! Placement constraints - where a table or marker is allowed to stand.
//!
//! Every function here is total: it maps any proposed point to a valid one
//! and never fails. Axes are clamped independently, the same "clamp each
//! axis" approach the movement code uses for room walls.
//!
//! | Variant | x | y |
//! |---------|---|---|
//! | Standard | free in `[margin, W − cw − margin]` | free in `[margin, H − ch − margin]` |
//! | Gift (free) | same as Standard | same as Standard |
//! | Gift (top wall) | same as Standard | pinned to `margin` |
//! | Royal | pinned to `W − cw − margin` | free in `[margin, H − ch − margin]` |

use crate::config::{ClampMode, GiftPlacement, RoomConfig};
use crate::footprint::{Footprint, TableVariant};
use crate::geometry::{clamp_axis, Point};

/// Clamp a proposed top-left position for a table.
pub fn clamp_position(
    variant: TableVariant,
    footprint: &Footprint,
    proposed: Point,
    room: &RoomConfig,
) -> Point {
    let (min_x, max_x) = x_range(footprint, room);
    let (min_y, max_y) = y_range(footprint, room);

    match variant {
        TableVariant::Standard => Point::new(
            clamp_axis(proposed.x, min_x, max_x),
            clamp_axis(proposed.y, min_y, max_y),
        ),
        TableVariant::Gift => {
            let y = match room.gift_placement {
                GiftPlacement::Free => clamp_axis(proposed.y, min_y, max_y),
                GiftPlacement::TopWall => min_y,
            };
            Point::new(clamp_axis(proposed.x, min_x, max_x), y)
        }
        TableVariant::Royal => Point::new(
            royal_wall_x(footprint, room),
            clamp_axis(proposed.y, min_y, max_y),
        ),
    }
}

/// The only x a royal table may take: flush with the right wall.
pub fn royal_wall_x(footprint: &Footprint, room: &RoomConfig) -> f32 {
    (room.width - footprint.container_width - room.margin).max(room.margin)
}

/// Whether `position` already satisfies the variant's constraint.
pub fn is_valid_position(
    variant: TableVariant,
    footprint: &Footprint,
    position: Point,
    room: &RoomConfig,
) -> bool {
    clamp_position(variant, footprint, position, room) == position
}

/// Clamp an accessory marker's top-left corner.
///
/// `Contained` keeps the whole marker inside the margins; `Soft` only
/// guarantees that a `margin`-wide strip of it remains inside the room.
pub fn clamp_accessory(
    proposed: Point,
    width: f32,
    height: f32,
    mode: ClampMode,
    room: &RoomConfig,
) -> Point {
    match mode {
        ClampMode::Contained => Point::new(
            clamp_axis(proposed.x, room.margin, room.width - width - room.margin),
            clamp_axis(proposed.y, room.margin, room.height - height - room.margin),
        ),
        ClampMode::Soft => Point::new(
            clamp_axis(proposed.x, room.margin - width, room.width - room.margin),
            clamp_axis(proposed.y, room.margin - height, room.height - room.margin),
        ),
    }
}

fn x_range(footprint: &Footprint, room: &RoomConfig) -> (f32, f32) {
    (
        room.margin,
        room.width - footprint.container_width - room.margin,
    )
}

fn y_range(footprint: &Footprint, room: &RoomConfig) -> (f32, f32) {
    (
        room.margin,
        room.height - footprint.container_height - room.margin,
    )
}
