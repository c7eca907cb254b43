//! Accessory markers: DJ booth and photo box.
//!
//! Markers are not tables. Each has its own position, rotation, clamp mode
//! and storage keys, and is parked at a holding spot outside the room when
//! removed.

use serde::{Deserialize, Serialize};

use seatplan_logic::config::{ClampMode, RoomConfig};
use seatplan_logic::constants::rotation;
use seatplan_logic::constraints::clamp_accessory;
use seatplan_logic::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessoryKind {
    DjBooth,
    PhotoBox,
}

impl AccessoryKind {
    pub const ALL: [AccessoryKind; 2] = [AccessoryKind::DjBooth, AccessoryKind::PhotoBox];

    /// Marker size (width, height) in room units.
    pub fn size(&self, room: &RoomConfig) -> (f32, f32) {
        match self {
            AccessoryKind::DjBooth => (room.dj_width, room.dj_height),
            AccessoryKind::PhotoBox => (room.photo_box_size, room.photo_box_size),
        }
    }

    pub fn clamp_mode(&self, room: &RoomConfig) -> ClampMode {
        match self {
            AccessoryKind::DjBooth => room.dj_clamp,
            AccessoryKind::PhotoBox => room.photo_box_clamp,
        }
    }

    pub fn default_position(&self, room: &RoomConfig) -> Point {
        match self {
            AccessoryKind::DjBooth => room.dj_default,
            AccessoryKind::PhotoBox => room.photo_box_default,
        }
    }

    pub fn holding_position(&self, room: &RoomConfig) -> Point {
        match self {
            AccessoryKind::DjBooth => room.dj_holding,
            AccessoryKind::PhotoBox => room.photo_box_holding,
        }
    }

    pub fn default_rotation(&self) -> u16 {
        match self {
            AccessoryKind::DjBooth => rotation::DJ_DEFAULT,
            AccessoryKind::PhotoBox => 0,
        }
    }
}

/// A single marker's state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    pub kind: AccessoryKind,
    pub position: Point,
    pub rotation: u16,
    pub placed: bool,
}

impl Accessory {
    pub fn new(kind: AccessoryKind, room: &RoomConfig) -> Self {
        Self {
            kind,
            position: kind.default_position(room),
            rotation: kind.default_rotation(),
            placed: true,
        }
    }
}

/// Both markers of a floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accessories {
    pub dj_booth: Accessory,
    pub photo_box: Accessory,
}

impl Accessories {
    pub fn new(room: &RoomConfig) -> Self {
        Self {
            dj_booth: Accessory::new(AccessoryKind::DjBooth, room),
            photo_box: Accessory::new(AccessoryKind::PhotoBox, room),
        }
    }

    pub fn get(&self, kind: AccessoryKind) -> &Accessory {
        match kind {
            AccessoryKind::DjBooth => &self.dj_booth,
            AccessoryKind::PhotoBox => &self.photo_box,
        }
    }

    fn get_mut(&mut self, kind: AccessoryKind) -> &mut Accessory {
        match kind {
            AccessoryKind::DjBooth => &mut self.dj_booth,
            AccessoryKind::PhotoBox => &mut self.photo_box,
        }
    }

    /// Move a marker into the room, clamped by its mode. Returns whether it moved.
    pub fn move_to(&mut self, kind: AccessoryKind, proposed: Point, room: &RoomConfig) -> bool {
        let (w, h) = kind.size(room);
        let position = clamp_accessory(proposed, w, h, kind.clamp_mode(room), room);
        let marker = self.get_mut(kind);
        if marker.placed && marker.position == position {
            return false;
        }
        marker.position = position;
        marker.placed = true;
        true
    }

    pub fn rotate(&mut self, kind: AccessoryKind) -> bool {
        let marker = self.get_mut(kind);
        marker.rotation = (marker.rotation + rotation::STEP) % rotation::FULL_TURN;
        true
    }

    /// Park a marker outside the room and reset its rotation.
    pub fn stash(&mut self, kind: AccessoryKind, room: &RoomConfig) -> bool {
        let holding = kind.holding_position(room);
        let marker = self.get_mut(kind);
        if !marker.placed && marker.position == holding {
            return false;
        }
        marker.position = holding;
        marker.rotation = kind.default_rotation();
        marker.placed = false;
        true
    }
}
