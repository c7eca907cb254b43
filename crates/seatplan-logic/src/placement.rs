//! Empty-space scan for dropping a single new table into the room.
//!
//! Not a packer: walks a coarse grid row by row from the top-left margin and
//! takes the first cell where the new container, kept `spacing` away from
//! every occupied rectangle, overlaps nothing.

use crate::config::RoomConfig;
use crate::footprint::Footprint;
use crate::geometry::{Point, Rect};

/// First free top-left position for `footprint`, or `None` if the grid has
/// no free cell.
pub fn find_free_spot(
    room: &RoomConfig,
    footprint: &Footprint,
    occupied: &[Rect],
) -> Option<Point> {
    if room.scan_step <= 0.0 {
        return None;
    }

    let max_x = room.width - footprint.container_width - room.margin;
    let max_y = room.height - footprint.container_height - room.margin;

    let mut y = room.margin;
    while y <= max_y {
        let mut x = room.margin;
        while x <= max_x {
            let candidate = Rect::new(x, y, footprint.container_width, footprint.container_height)
                .inflate(room.scan_spacing);
            if !occupied.iter().any(|r| r.intersects(&candidate)) {
                return Some(Point::new(x, y));
            }
            x += room.scan_step;
        }
        y += room.scan_step;
    }
    None
}
