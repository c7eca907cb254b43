//! Table component: identity, placement, seats, label.

use serde::{Deserialize, Serialize};

use seatplan_logic::config::RoomConfig;
use seatplan_logic::constraints::{clamp_position, is_valid_position};
use seatplan_logic::footprint::{compute_footprint, Footprint, TableVariant};
use seatplan_logic::geometry::{Point, Rect};
use seatplan_logic::seating::{layout_seats, SeatPosition};

const NUMBERED_PREFIX: &str = "table-";
const GIFT_ID: &str = "geschenke-table";

/// Stable table identifier, never reused while the collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    /// Identifier of the `n`-th created table.
    pub fn numbered(n: u32) -> Self {
        Self(format!("{NUMBERED_PREFIX}{n}"))
    }

    /// Fixed identifier of the gift table.
    pub fn gift() -> Self {
        Self(GIFT_ID.to_string())
    }

    /// Creation counter encoded in a `table-N` id.
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix(NUMBERED_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TableId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-facing table label: a running number or a fixed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableLabel {
    Number(u32),
    Text(String),
}

impl TableLabel {
    pub fn royal() -> Self {
        TableLabel::Text("R".to_string())
    }

    pub fn gift() -> Self {
        TableLabel::Text("Geschenke".to_string())
    }

    pub fn number(&self) -> Option<u32> {
        match self {
            TableLabel::Number(n) => Some(*n),
            TableLabel::Text(_) => None,
        }
    }
}

impl Default for TableLabel {
    fn default() -> Self {
        TableLabel::Number(0)
    }
}

impl std::fmt::Display for TableLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableLabel::Number(n) => write!(f, "{n}"),
            TableLabel::Text(s) => f.write_str(s),
        }
    }
}

/// A table on the floor plan (or waiting in the staging area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    /// Top-left corner of the container, in room units.
    pub position: Point,
    /// Chairs currently drawn around the table.
    pub seat_count: u32,
    pub variant: TableVariant,
    pub label: TableLabel,
    /// Degrees, a multiple of 45 in `[0, 360)`.
    pub rotation: u16,
    /// Excluded from automatic reconciliation changes.
    pub locked: bool,
    /// Standing in the room (counts toward capacity) rather than staged.
    pub placed: bool,
}

impl Table {
    pub fn footprint(&self) -> Footprint {
        compute_footprint(self.seat_count, self.variant)
    }

    /// Container rectangle in room coordinates.
    pub fn container(&self) -> Rect {
        let f = self.footprint();
        Rect::new(
            self.position.x,
            self.position.y,
            f.container_width,
            f.container_height,
        )
    }

    pub fn seats(&self) -> Vec<SeatPosition> {
        layout_seats(&self.footprint(), self.seat_count, self.variant)
    }

    pub fn is_gift(&self) -> bool {
        self.variant == TableVariant::Gift
    }

    /// Where this table would end up if moved to `proposed`.
    pub fn clamped(&self, proposed: Point, room: &RoomConfig) -> Point {
        clamp_position(self.variant, &self.footprint(), proposed, room)
    }

    /// Staged tables are exempt; placed ones must satisfy their constraint.
    pub fn satisfies_constraint(&self, room: &RoomConfig) -> bool {
        !self.placed || is_valid_position(self.variant, &self.footprint(), self.position, room)
    }

    /// Counts toward capacity during reconciliation and is left untouched by it.
    pub fn is_kept(&self) -> bool {
        !self.is_gift() && (self.placed || self.locked)
    }
}
