//! Layout constants - chair geometry, table body classes, capacity limits.
//!
//! All lengths are in room units (centimetres), the same unit system the
//! room configuration and table positions use.

pub mod chairs {
    /// Edge length of a (square) chair.
    pub const SIZE: f32 = 12.0;
    /// Clearance between the table body edge and the chair.
    pub const GAP: f32 = 4.0;
    /// Distance from a body edge to a chair centre.
    pub const CENTER_OFFSET: f32 = GAP + SIZE / 2.0;
    /// Space one chair takes along a side, including its gap.
    pub const PITCH: f32 = SIZE + GAP;
}

pub mod bodies {
    /// Short side shared by every rectangular body.
    pub const DEPTH: f32 = 33.0;
    /// Long side of the 6-seat class.
    pub const SIX_WIDTH: f32 = 55.0;
    /// Long side of the 8-seat class (also the gift table).
    pub const EIGHT_WIDTH: f32 = 61.0;
    /// Gift table body, no chairs.
    pub const GIFT_WIDTH: f32 = 61.0;
    pub const GIFT_DEPTH: f32 = 33.0;
    /// Royal table long side: `BASE + seats × PER_SEAT`, clamped.
    pub const ROYAL_BASE_LENGTH: f32 = 40.0;
    pub const ROYAL_LENGTH_PER_SEAT: f32 = 10.0;
    pub const ROYAL_MIN_LENGTH: f32 = 40.0;
    pub const ROYAL_MAX_LENGTH: f32 = 120.0;
}

pub mod seats {
    /// Seats of a full table; reconciliation prefers these.
    pub const FULL_TABLE: u32 = 8;
    /// Largest seat count a standard table accepts.
    pub const MAX_STANDARD: u32 = 8;
    /// Largest seat count a royal table accepts (its length saturates here).
    pub const MAX_ROYAL: u32 = 8;
    /// Nominal seat count recorded on the gift table.
    pub const GIFT_NOMINAL: u32 = 8;
    /// Highest seat count still drawn on the 6-seat body.
    pub const SIX_CLASS_MAX: u32 = 6;
}

pub mod rotation {
    /// Rotation step of the rotate button.
    pub const STEP: u16 = 45;
    pub const FULL_TURN: u16 = 360;
    /// Royal tables run parallel to the right wall.
    pub const ROYAL: u16 = 90;
    /// Gift table stands with its long side against the wall.
    pub const GIFT: u16 = 90;
    /// DJ booth faces the room by default.
    pub const DJ_DEFAULT: u16 = 180;
}
