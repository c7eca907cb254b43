//! Drag gesture state machine: `Idle -> Dragging -> Idle`.
//!
//! Pointer positions arrive in screen space and are mapped to room units by
//! a [`CoordinateSpace`] the renderer provides. The session only does the
//! arithmetic; clamping and committing happen in the engine.

use seatplan_logic::geometry::Point;

use crate::components::{AccessoryKind, TableId};

/// Pointer → room transform implemented by the renderer.
pub trait CoordinateSpace {
    fn to_room(&self, screen: Point) -> Point;
}

/// Screen and room coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySpace;

impl CoordinateSpace for IdentitySpace {
    fn to_room(&self, screen: Point) -> Point {
        screen
    }
}

/// Room drawn at `origin` on screen, scaled by `scale`.
#[derive(Debug, Clone, Copy)]
pub struct ZoomedSpace {
    pub origin: Point,
    pub scale: f32,
}

impl CoordinateSpace for ZoomedSpace {
    fn to_room(&self, screen: Point) -> Point {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let local = screen - self.origin;
        Point::new(local.x / scale, local.y / scale)
    }
}

/// Something that can be dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Table(TableId),
    Accessory(AccessoryKind),
}

/// How a finished gesture should be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Pointer stayed within the click threshold.
    Click(DragTarget),
    Moved(DragTarget),
}

/// An active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Pointer minus target position at press time, in room units.
    pub grab_offset: Point,
    /// Pointer position at press time, in room units.
    pub press: Point,
    /// Set once the pointer travels past the click threshold.
    pub moved: bool,
    /// Start positions of every table moving with the target (empty for a
    /// single-item drag).
    pub group: Vec<(TableId, Point)>,
}

impl DragSession {
    pub fn new(target: DragTarget, pointer: Point, target_position: Point) -> Self {
        Self {
            target,
            grab_offset: pointer - target_position,
            press: pointer,
            moved: false,
            group: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Vec<(TableId, Point)>) -> Self {
        self.group = group;
        self
    }

    pub fn is_group(&self) -> bool {
        !self.group.is_empty()
    }

    /// Unclamped position for the target under the pointer.
    pub fn proposed(&self, pointer: Point) -> Point {
        pointer - self.grab_offset
    }

    /// Unclamped positions for every group member.
    pub fn group_proposals(&self, pointer: Point) -> Vec<(TableId, Point)> {
        let delta = pointer - self.press;
        self.group
            .iter()
            .map(|(id, start)| (id.clone(), *start + delta))
            .collect()
    }

    pub fn track(&mut self, pointer: Point, click_threshold: f32) {
        if pointer.distance(&self.press) > click_threshold {
            self.moved = true;
        }
    }

    pub fn outcome(self) -> DragOutcome {
        if self.moved {
            DragOutcome::Moved(self.target)
        } else {
            DragOutcome::Click(self.target)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    /// End the gesture, returning the session if one was active.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoomed_space_divides_by_scale() {
        let space = ZoomedSpace {
            origin: Point::new(10.0, 20.0),
            scale: 1.5,
        };
        assert_eq!(space.to_room(Point::new(160.0, 170.0)), Point::new(100.0, 100.0));

        let broken = ZoomedSpace {
            origin: Point::ZERO,
            scale: 0.0,
        };
        assert_eq!(broken.to_room(Point::new(5.0, 5.0)), Point::new(5.0, 5.0));
    }

    #[test]
    fn grab_offset_is_preserved() {
        let s = DragSession::new(
            DragTarget::Table(TableId::numbered(1)),
            Point::new(110.0, 120.0),
            Point::new(100.0, 100.0),
        );
        assert_eq!(s.proposed(Point::new(210.0, 220.0)), Point::new(200.0, 200.0));
    }

    #[test]
    fn click_versus_move() {
        let target = DragTarget::Accessory(AccessoryKind::PhotoBox);
        let mut s = DragSession::new(target.clone(), Point::ZERO, Point::ZERO);
        s.track(Point::new(3.0, 4.0), 5.0);
        assert_eq!(s.clone().outcome(), DragOutcome::Click(target.clone()));
        s.track(Point::new(6.0, 0.0), 5.0);
        // Coming back does not turn a drag into a click.
        s.track(Point::ZERO, 5.0);
        assert_eq!(s.outcome(), DragOutcome::Moved(target));
    }

    #[test]
    fn group_moves_by_same_delta() {
        let s = DragSession::new(
            DragTarget::Table(TableId::numbered(1)),
            Point::new(50.0, 50.0),
            Point::new(40.0, 40.0),
        )
        .with_group(vec![
            (TableId::numbered(1), Point::new(40.0, 40.0)),
            (TableId::numbered(2), Point::new(200.0, 80.0)),
        ]);
        let moved = s.group_proposals(Point::new(60.0, 45.0));
        assert_eq!(moved[0].1, Point::new(50.0, 35.0));
        assert_eq!(moved[1].1, Point::new(210.0, 75.0));
    }

    #[test]
    fn finish_returns_to_idle() {
        let mut state = DragState::Dragging(DragSession::new(
            DragTarget::Accessory(AccessoryKind::DjBooth),
            Point::ZERO,
            Point::ZERO,
        ));
        assert!(state.is_dragging());
        assert!(state.finish().is_some());
        assert_eq!(state, DragState::Idle);
        assert!(state.finish().is_none());
    }
}
