//! Table collection - owns every table and enforces the id, seat and
//! placement invariants on each mutation.
//!
//! Mutators return whether anything changed so the caller can decide to
//! persist and notify. Missing ids are silent no-ops.

use std::collections::HashSet;

use seatplan_logic::config::RoomConfig;
use seatplan_logic::constants::{rotation, seats};
use seatplan_logic::footprint::{compute_footprint, TableVariant};
use seatplan_logic::geometry::{Point, Rect};
use seatplan_logic::reconcile::ReconcilePlan;

use crate::components::{Table, TableId, TableLabel};

/// All tables of a floor plan plus the id counter.
#[derive(Debug, Clone)]
pub struct TableCollection {
    tables: Vec<Table>,
    next_id: u32,
}

impl Default for TableCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCollection {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from stored records, repairing anything that breaks an invariant.
    ///
    /// Duplicate ids and extra gift tables are dropped, seat counts are
    /// brought into range, placed tables are re-clamped and the counter is
    /// raised above every numbered id. A non-gift record stored under the
    /// gift id gets a fresh number. Ids and counters at `u32::MAX` cannot be
    /// followed by another id and are treated as unreadable.
    pub fn from_parts(tables: Vec<Table>, next_id: u32, room: &RoomConfig) -> Self {
        let mut seen = HashSet::new();
        let mut has_gift = false;
        let mut kept = Vec::with_capacity(tables.len());
        let mut misfiled = Vec::new();

        for mut table in tables {
            if table.id.number() == Some(u32::MAX) {
                log::warn!("dropping table {} with an exhausted id", table.id);
                continue;
            }
            if table.is_gift() {
                if has_gift {
                    log::warn!("dropping duplicate gift table {}", table.id);
                    continue;
                }
                has_gift = true;
                table.id = TableId::gift();
                table.label = TableLabel::gift();
                table.seat_count = seats::GIFT_NOMINAL;
            } else {
                table.seat_count = table.seat_count.clamp(1, table.variant.max_seats());
            }
            let squatter = !table.is_gift() && table.id == TableId::gift();
            if !squatter && !seen.insert(table.id.clone()) {
                log::warn!("dropping table with duplicate id {}", table.id);
                continue;
            }
            if squatter {
                misfiled.push(kept.len());
            }
            if table.variant == TableVariant::Royal {
                table.rotation = rotation::ROYAL;
                table.label = TableLabel::royal();
            }
            table.rotation %= rotation::FULL_TURN;
            if table.placed {
                table.position = table.clamped(table.position, room);
            }
            kept.push(table);
        }

        let stored_next = if next_id == u32::MAX {
            log::warn!("ignoring exhausted id counter {next_id}");
            1
        } else {
            next_id
        };
        let max_number = kept.iter().filter_map(|t| t.id.number()).max().unwrap_or(0);
        let mut collection = Self {
            tables: kept,
            next_id: stored_next.max(max_number.saturating_add(1)).max(1),
        };
        for index in misfiled {
            let (id, _) = collection.allocate_id();
            log::warn!("table stored under the gift id renamed to {id}");
            collection.tables[index].id = id;
        }
        collection
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.id == id)
    }

    fn get_mut(&mut self, id: &TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.get(id).is_some()
    }

    pub fn gift(&self) -> Option<&Table> {
        self.tables.iter().find(|t| t.is_gift())
    }

    /// Hand out the next id. Once the counter is exhausted the lowest
    /// number not in use is taken instead.
    fn allocate_id(&mut self) -> (TableId, u32) {
        let number = match self.next_id.checked_add(1) {
            Some(next) => std::mem::replace(&mut self.next_id, next),
            None => {
                log::warn!("table id counter exhausted, reusing a free number");
                (1..=u32::MAX)
                    .find(|&n| !self.contains(&TableId::numbered(n)))
                    .unwrap_or(u32::MAX)
            }
        };
        (TableId::numbered(number), number)
    }

    /// Add a table of the given variant. Standard tables appear centred,
    /// Royal tables against the right wall. A Gift request only makes sure
    /// the gift table exists.
    pub fn add(
        &mut self,
        seat_count: u32,
        variant: TableVariant,
        room: &RoomConfig,
    ) -> Option<TableId> {
        if variant == TableVariant::Gift {
            return self.ensure_gift(room).then(TableId::gift);
        }
        if seat_count == 0 {
            return None;
        }

        let seat_count = seat_count.min(variant.max_seats());
        let (id, number) = self.allocate_id();
        let f = compute_footprint(seat_count, variant);
        let centred = Point::new(
            (room.width - f.container_width) / 2.0,
            (room.height - f.container_height) / 2.0,
        );
        let (label, rot) = match variant {
            TableVariant::Royal => (TableLabel::royal(), rotation::ROYAL),
            _ => (TableLabel::Number(number), 0),
        };

        let mut table = Table {
            id: id.clone(),
            position: centred,
            seat_count,
            variant,
            label,
            rotation: rot,
            locked: false,
            placed: true,
        };
        table.position = table.clamped(centred, room);
        log::debug!("added {variant:?} table {id} with {seat_count} seats");
        self.tables.push(table);
        Some(id)
    }

    /// Add a Standard table at `at` (clamped, placed) or, with `None`, in
    /// the staging area. Labelled one past the highest current number.
    pub fn add_standard_at(
        &mut self,
        seat_count: u32,
        at: Option<Point>,
        room: &RoomConfig,
    ) -> TableId {
        let seat_count = seat_count.clamp(1, seats::MAX_STANDARD);
        let label = TableLabel::Number(self.max_label_number() + 1);
        let (id, _) = self.allocate_id();
        let mut table = Table {
            id: id.clone(),
            position: room.staging,
            seat_count,
            variant: TableVariant::Standard,
            label,
            rotation: 0,
            locked: false,
            placed: false,
        };
        if let Some(p) = at {
            table.position = table.clamped(p, room);
            table.placed = true;
        }
        self.tables.push(table);
        id
    }

    fn max_label_number(&self) -> u32 {
        self.tables.iter().filter_map(|t| t.label.number()).max().unwrap_or(0)
    }

    /// Remove a table. The gift table is parked in its holding area instead.
    pub fn delete(&mut self, id: &TableId, room: &RoomConfig) -> bool {
        let Some(index) = self.tables.iter().position(|t| &t.id == id) else {
            return false;
        };
        if self.tables[index].is_gift() {
            return self.park_gift(room);
        }
        self.tables.remove(index);
        log::debug!("deleted table {id}");
        true
    }

    /// Bulk delete; returns how many tables were removed or parked.
    pub fn delete_many(&mut self, ids: &[TableId], room: &RoomConfig) -> usize {
        ids.iter().filter(|id| self.delete(id, room)).count()
    }

    fn park_gift(&mut self, room: &RoomConfig) -> bool {
        let Some(gift) = self.tables.iter_mut().find(|t| t.is_gift()) else {
            return false;
        };
        if !gift.placed && gift.position == room.gift_holding {
            return false;
        }
        gift.position = room.gift_holding;
        gift.placed = false;
        log::debug!("parked gift table");
        true
    }

    /// Copy a table next to the original: to the right by its container
    /// width plus the gap, or to the left when the right side is full.
    pub fn duplicate(&mut self, id: &TableId, room: &RoomConfig) -> Option<TableId> {
        let original = self.get(id)?.clone();
        if original.is_gift() {
            return None;
        }

        let mut position = original.position;
        if original.placed {
            let f = original.footprint();
            let max_x = room.width - f.container_width - room.margin;
            let mut x = original.position.x + f.container_width + room.duplicate_gap;
            if x > max_x {
                x = max_x.max(room.margin);
                if x >= original.position.x {
                    x = original.position.x - f.container_width - room.duplicate_gap;
                }
            }
            position = original.clamped(Point::new(x, original.position.y), room);
        }

        let copy = self.copy_of(&original, position);
        let new_id = copy.id.clone();
        log::debug!("duplicated table {id} as {new_id}");
        self.tables.push(copy);
        Some(new_id)
    }

    /// Copy a group of placed tables, shifted right by the group's width
    /// plus the gap. Nothing is copied when the shifted group would cross
    /// the right margin.
    pub fn duplicate_group(&mut self, ids: &[TableId], room: &RoomConfig) -> Vec<TableId> {
        let members: Vec<Table> = self
            .tables
            .iter()
            .filter(|t| ids.contains(&t.id) && t.placed && !t.is_gift())
            .cloned()
            .collect();
        if members.is_empty() {
            return Vec::new();
        }

        let min_left = members.iter().map(|t| t.position.x).fold(f32::INFINITY, f32::min);
        let max_right = members
            .iter()
            .map(|t| t.container().right())
            .fold(f32::NEG_INFINITY, f32::max);
        let group_width = max_right - min_left;
        if max_right + room.duplicate_gap + group_width > room.width - room.margin {
            log::debug!("group duplicate skipped, no room on the right");
            return Vec::new();
        }

        let offset = group_width + room.duplicate_gap;
        let mut created = Vec::with_capacity(members.len());
        for original in &members {
            let shifted = Point::new(original.position.x + offset, original.position.y);
            let position = original.clamped(shifted, room);
            let copy = self.copy_of(original, position);
            created.push(copy.id.clone());
            self.tables.push(copy);
        }
        created
    }

    fn copy_of(&mut self, original: &Table, position: Point) -> Table {
        let (id, number) = self.allocate_id();
        let label = match original.variant {
            TableVariant::Royal => TableLabel::royal(),
            _ => TableLabel::Number(number),
        };
        Table {
            id,
            position,
            seat_count: original.seat_count,
            variant: original.variant,
            label,
            rotation: original.rotation,
            locked: false,
            placed: original.placed,
        }
    }

    /// Move a table through its constraint and mark it placed.
    pub fn update_position(&mut self, id: &TableId, proposed: Point, room: &RoomConfig) -> bool {
        let Some(table) = self.get_mut(id) else {
            return false;
        };
        let position = table.clamped(proposed, room);
        if table.placed && table.position == position {
            return false;
        }
        table.position = position;
        table.placed = true;
        true
    }

    /// Rotate by one step. Royal tables keep their fixed rotation.
    pub fn rotate(&mut self, id: &TableId) -> bool {
        let Some(table) = self.get_mut(id) else {
            return false;
        };
        if !table.variant.can_rotate() {
            return false;
        }
        table.rotation = (table.rotation + rotation::STEP) % rotation::FULL_TURN;
        true
    }

    /// Change the chair count of a Standard or Royal table, re-clamping a
    /// placed table for its new footprint.
    pub fn update_seats(&mut self, id: &TableId, seat_count: u32, room: &RoomConfig) -> bool {
        let Some(table) = self.get_mut(id) else {
            return false;
        };
        if seat_count == 0 || table.is_gift() {
            return false;
        }
        let seat_count = seat_count.min(table.variant.max_seats());
        if table.seat_count == seat_count {
            return false;
        }
        table.seat_count = seat_count;
        if table.placed {
            table.position = table.clamped(table.position, room);
        }
        log::debug!("table {id} now has {seat_count} seats");
        true
    }

    /// Switch a Standard table between the 6- and 8-seat classes.
    /// Locked tables are left alone.
    pub fn toggle_seat_class(&mut self, id: &TableId, room: &RoomConfig) -> bool {
        let Some(table) = self.get(id) else {
            return false;
        };
        if table.locked || table.variant != TableVariant::Standard {
            return false;
        }
        let next = if table.seat_count == seats::SIX_CLASS_MAX {
            seats::FULL_TABLE
        } else {
            seats::SIX_CLASS_MAX
        };
        self.update_seats(id, next, room)
    }

    pub fn toggle_lock(&mut self, id: &TableId) -> bool {
        let Some(table) = self.get_mut(id) else {
            return false;
        };
        table.locked = !table.locked;
        true
    }

    /// Create the gift table if it is missing. Returns whether it was created.
    pub fn ensure_gift(&mut self, room: &RoomConfig) -> bool {
        if self.gift().is_some() || self.contains(&TableId::gift()) {
            return false;
        }
        let mut gift = Table {
            id: TableId::gift(),
            position: room.gift_default,
            seat_count: seats::GIFT_NOMINAL,
            variant: TableVariant::Gift,
            label: TableLabel::gift(),
            rotation: rotation::GIFT,
            locked: false,
            placed: true,
        };
        gift.position = gift.clamped(room.gift_default, room);
        log::debug!("created gift table at ({}, {})", gift.position.x, gift.position.y);
        self.tables.push(gift);
        true
    }

    /// Empty the collection and restart ids at 1.
    pub fn reset(&mut self) {
        self.tables.clear();
        self.next_id = 1;
    }

    /// Number Standard tables 1.. in collection order. Returns whether any
    /// label changed.
    pub fn renumber(&mut self) -> bool {
        let mut changed = false;
        let mut n = 0;
        for table in &mut self.tables {
            let label = match table.variant {
                TableVariant::Standard => {
                    n += 1;
                    TableLabel::Number(n)
                }
                TableVariant::Royal => TableLabel::royal(),
                TableVariant::Gift => TableLabel::gift(),
            };
            if table.label != label {
                table.label = label;
                changed = true;
            }
        }
        changed
    }

    /// Seat counts of tables reconciliation must leave untouched.
    pub fn kept_seat_counts(&self) -> Vec<u32> {
        self.tables
            .iter()
            .filter(|t| t.is_kept())
            .map(|t| t.seat_count)
            .collect()
    }

    /// Replace every non-kept, non-gift table with the planned tables,
    /// staged side by side in the waiting area, then renumber.
    pub fn apply_plan(&mut self, plan: &ReconcilePlan, room: &RoomConfig) -> bool {
        let before = self.tables.len();
        self.tables.retain(|t| t.is_gift() || t.is_kept());
        let removed = before - self.tables.len();

        let pitch = compute_footprint(seats::FULL_TABLE, TableVariant::Standard).container_width
            + room.scan_spacing;
        for (i, &seat_count) in plan.seats.iter().enumerate() {
            let id = self.add_standard_at(seat_count, None, room);
            if let Some(table) = self.get_mut(&id) {
                table.position = Point::new(room.staging.x + pitch * i as f32, room.staging.y);
            }
        }
        let renumbered = self.renumber();
        removed > 0 || !plan.seats.is_empty() || renumbered
    }

    /// Containers of everything standing in the room.
    pub fn occupied_rects(&self) -> Vec<Rect> {
        self.tables.iter().filter(|t| t.placed).map(Table::container).collect()
    }

    /// Placed tables whose container intersects `rect`.
    pub fn tables_in_rect(&self, rect: &Rect) -> Vec<TableId> {
        self.tables
            .iter()
            .filter(|t| t.placed && t.container().intersects(rect))
            .map(|t| t.id.clone())
            .collect()
    }

    /// Most recently created non-gift table (highest id number).
    pub fn most_recent(&self) -> Option<&Table> {
        self.tables
            .iter()
            .filter(|t| !t.is_gift())
            .max_by_key(|t| t.id.number().unwrap_or(0))
    }

    /// Find the target for a one-seat change: the fullest table below
    /// `limit` when growing, the emptiest above one seat when shrinking.
    /// Only unlocked Standard tables qualify; the last one wins ties.
    pub(crate) fn seat_candidate(&self, grow: bool) -> Option<TableId> {
        let eligible = self
            .tables
            .iter()
            .filter(|t| t.variant == TableVariant::Standard && !t.locked);
        let pick = if grow {
            eligible
                .filter(|t| t.seat_count < seats::MAX_STANDARD)
                .max_by_key(|t| t.seat_count)
        } else {
            eligible
                .filter(|t| t.seat_count > 1)
                .rev()
                .min_by_key(|t| t.seat_count)
        };
        pick.map(|t| t.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> RoomConfig {
        RoomConfig::default()
    }

    #[test]
    fn add_standard_is_centred_and_numbered() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        let t = c.get(&id).unwrap();
        assert_eq!(id.as_str(), "table-1");
        assert_eq!(t.label, TableLabel::Number(1));
        assert_eq!(t.position, Point::new((1000.0 - 79.0) / 2.0, (600.0 - 57.0) / 2.0));
        assert_eq!(c.next_id(), 2);
    }

    #[test]
    fn add_caps_and_ignores_zero() {
        let room = room();
        let mut c = TableCollection::new();
        assert!(c.add(0, TableVariant::Standard, &room).is_none());
        let id = c.add(12, TableVariant::Standard, &room).unwrap();
        assert_eq!(c.get(&id).unwrap().seat_count, 8);
    }

    #[test]
    fn add_royal_sits_on_right_wall() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(4, TableVariant::Royal, &room).unwrap();
        let t = c.get(&id).unwrap();
        let cw = t.footprint().container_width;
        assert_eq!(t.position.x, 1000.0 - cw - 20.0);
        assert_eq!(t.rotation, 90);
        assert_eq!(t.label, TableLabel::royal());
    }

    #[test]
    fn add_gift_delegates_to_ensure() {
        let room = room();
        let mut c = TableCollection::new();
        assert_eq!(c.add(8, TableVariant::Gift, &room), Some(TableId::gift()));
        assert_eq!(c.add(8, TableVariant::Gift, &room), None);
        assert_eq!(c.len(), 1);
        assert_eq!(c.gift().unwrap().position, Point::new(20.0, 400.0));
    }

    #[test]
    fn five_rotations_land_on_225() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        for _ in 0..5 {
            c.rotate(&id);
        }
        assert_eq!(c.get(&id).unwrap().rotation, 225);
    }

    #[test]
    fn royal_does_not_rotate() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(4, TableVariant::Royal, &room).unwrap();
        assert!(!c.rotate(&id));
        assert_eq!(c.get(&id).unwrap().rotation, 90);
    }

    #[test]
    fn duplicate_at_right_wall_goes_left() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(8, TableVariant::Standard, &room).unwrap();
        c.update_position(&id, Point::new(2000.0, 100.0), &room);
        let original_x = c.get(&id).unwrap().position.x;
        assert_eq!(original_x, 1000.0 - 85.0 - 20.0);

        let copy = c.duplicate(&id, &room).unwrap();
        let t = c.get(&copy).unwrap();
        assert_eq!(t.position.x, original_x - 85.0 - 50.0);
        assert_eq!(t.position.y, 100.0);
        assert_eq!(t.label, TableLabel::Number(2));
    }

    #[test]
    fn duplicate_goes_right_when_there_is_space() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        c.update_position(&id, Point::new(100.0, 100.0), &room);
        let copy = c.duplicate(&id, &room).unwrap();
        assert_eq!(c.get(&copy).unwrap().position, Point::new(100.0 + 79.0 + 50.0, 100.0));
    }

    #[test]
    fn gift_cannot_be_duplicated() {
        let room = room();
        let mut c = TableCollection::new();
        c.ensure_gift(&room);
        assert!(c.duplicate(&TableId::gift(), &room).is_none());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn staged_copy_stays_staged() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add_standard_at(5, None, &room);
        let copy = c.duplicate(&id, &room).unwrap();
        let t = c.get(&copy).unwrap();
        assert!(!t.placed);
        assert_eq!(t.position, room.staging);
    }

    #[test]
    fn group_duplicate_shifts_by_group_width() {
        let room = room();
        let mut c = TableCollection::new();
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        let b = c.add(6, TableVariant::Standard, &room).unwrap();
        c.update_position(&a, Point::new(20.0, 20.0), &room);
        c.update_position(&b, Point::new(120.0, 100.0), &room);

        let copies = c.duplicate_group(&[a, b], &room);
        assert_eq!(copies.len(), 2);
        // group spans 20..199, so the offset is 179 + 50
        assert_eq!(c.get(&copies[0]).unwrap().position, Point::new(249.0, 20.0));
        assert_eq!(c.get(&copies[1]).unwrap().position, Point::new(349.0, 100.0));
    }

    #[test]
    fn group_duplicate_aborts_without_space() {
        let room = room();
        let mut c = TableCollection::new();
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        c.update_position(&a, Point::new(850.0, 20.0), &room);
        assert!(c.duplicate_group(&[a], &room).is_empty());
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn deleting_gift_parks_it() {
        let room = room();
        let mut c = TableCollection::new();
        c.ensure_gift(&room);
        c.add(6, TableVariant::Standard, &room);
        assert!(c.delete(&TableId::gift(), &room));
        assert_eq!(c.len(), 2);
        let gift = c.gift().unwrap();
        assert!(!gift.placed);
        assert_eq!(gift.position, room.gift_holding);
        assert!(!c.delete(&TableId::gift(), &room));
    }

    #[test]
    fn delete_missing_is_noop() {
        let room = room();
        let mut c = TableCollection::new();
        assert!(!c.delete(&TableId::numbered(9), &room));
    }

    #[test]
    fn ids_are_never_reused() {
        let room = room();
        let mut c = TableCollection::new();
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        c.delete(&a, &room);
        let b = c.add(6, TableVariant::Standard, &room).unwrap();
        assert_ne!(a, b);
        c.reset();
        assert_eq!(c.add(6, TableVariant::Standard, &room).unwrap().as_str(), "table-1");
    }

    #[test]
    fn seat_change_reclamps_placed_table() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        c.update_position(&id, Point::new(2000.0, 2000.0), &room);
        assert!(c.update_seats(&id, 8, &room));
        let t = c.get(&id).unwrap();
        assert!(t.satisfies_constraint(&room));
        assert_eq!(t.position.x, 1000.0 - 85.0 - 20.0);
    }

    #[test]
    fn royal_seat_change_keeps_wall() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(2, TableVariant::Royal, &room).unwrap();
        assert!(c.update_seats(&id, 8, &room));
        assert!(c.get(&id).unwrap().satisfies_constraint(&room));
    }

    #[test]
    fn seat_class_toggle_respects_lock() {
        let room = room();
        let mut c = TableCollection::new();
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        assert!(c.toggle_seat_class(&id, &room));
        assert_eq!(c.get(&id).unwrap().seat_count, 8);
        assert!(c.toggle_seat_class(&id, &room));
        assert_eq!(c.get(&id).unwrap().seat_count, 6);

        c.toggle_lock(&id);
        assert!(!c.toggle_seat_class(&id, &room));
        assert_eq!(c.get(&id).unwrap().seat_count, 6);
    }

    #[test]
    fn renumber_skips_royal_and_gift() {
        let room = room();
        let mut c = TableCollection::new();
        c.ensure_gift(&room);
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        let r = c.add(4, TableVariant::Royal, &room).unwrap();
        let b = c.add(6, TableVariant::Standard, &room).unwrap();
        c.delete(&a, &room);
        assert!(c.renumber());
        assert_eq!(c.get(&b).unwrap().label, TableLabel::Number(1));
        assert_eq!(c.get(&r).unwrap().label, TableLabel::royal());
        assert!(!c.renumber());
    }

    #[test]
    fn apply_plan_keeps_locked_and_placed() {
        let room = room();
        let mut c = TableCollection::new();
        c.ensure_gift(&room);
        let placed = c.add(8, TableVariant::Standard, &room).unwrap();
        let staged = c.add_standard_at(4, None, &room);
        let locked = c.add_standard_at(6, None, &room);
        c.toggle_lock(&locked);

        let plan = seatplan_logic::reconcile::plan_tables(30, &c.kept_seat_counts(), 13);
        assert_eq!(plan.seats, vec![8, 8]);
        assert!(c.apply_plan(&plan, &room));

        assert!(c.contains(&placed));
        assert!(c.contains(&locked));
        assert!(!c.contains(&staged));
        assert!(c.gift().is_some());
        let total: u32 = c.tables().iter().filter(|t| !t.is_gift()).map(|t| t.seat_count).sum();
        assert_eq!(total, 30);
    }

    #[test]
    fn from_parts_repairs_invariants() {
        let room = room();
        let table = |id: &str, variant, seats, y| Table {
            id: TableId::from(id),
            position: Point::new(-10.0, y),
            seat_count: seats,
            variant,
            label: TableLabel::Number(1),
            rotation: 0,
            locked: false,
            placed: true,
        };
        let c = TableCollection::from_parts(
            vec![
                table("table-4", TableVariant::Standard, 0, 100.0),
                table("table-4", TableVariant::Standard, 6, 100.0),
                table("geschenke-table", TableVariant::Gift, 8, 100.0),
                table("other-gift", TableVariant::Gift, 8, 100.0),
                table("table-7", TableVariant::Royal, 20, 100.0),
            ],
            2,
            &room,
        );
        assert_eq!(c.len(), 3);
        assert_eq!(c.next_id(), 8);
        let t4 = c.get(&TableId::numbered(4)).unwrap();
        assert_eq!(t4.seat_count, 1);
        assert_eq!(t4.position.x, 20.0);
        let royal = c.get(&TableId::numbered(7)).unwrap();
        assert_eq!(royal.seat_count, 8);
        assert_eq!(royal.rotation, 90);
        assert!(c.tables().iter().all(|t| t.satisfies_constraint(&room)));
    }

    fn stored(id: TableId, variant: TableVariant, seat_count: u32) -> Table {
        Table {
            id,
            position: Point::new(100.0, 100.0),
            seat_count,
            variant,
            label: TableLabel::Number(1),
            rotation: 0,
            locked: false,
            placed: true,
        }
    }

    #[test]
    fn from_parts_drops_exhausted_ids_and_counter() {
        let room = room();
        let mut c = TableCollection::from_parts(
            vec![
                stored(TableId::numbered(u32::MAX), TableVariant::Standard, 6),
                stored(TableId::numbered(3), TableVariant::Standard, 6),
            ],
            u32::MAX,
            &room,
        );
        assert_eq!(c.len(), 1);
        assert_eq!(c.next_id(), 4);
        let id = c.add(6, TableVariant::Standard, &room).unwrap();
        assert_eq!(id, TableId::numbered(4));
    }

    #[test]
    fn exhausted_counter_reuses_a_free_number() {
        let room = room();
        let mut c = TableCollection::from_parts(
            vec![stored(TableId::numbered(u32::MAX - 1), TableVariant::Standard, 6)],
            1,
            &room,
        );
        assert_eq!(c.next_id(), u32::MAX);
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        let b = c.add(6, TableVariant::Standard, &room).unwrap();
        assert_eq!(a, TableId::numbered(1));
        assert_eq!(b, TableId::numbered(2));
    }

    #[test]
    fn gift_id_squatter_is_renumbered() {
        let room = room();
        let mut c = TableCollection::from_parts(
            vec![
                stored(TableId::gift(), TableVariant::Standard, 6),
                stored(TableId::gift(), TableVariant::Gift, 8),
            ],
            5,
            &room,
        );
        assert_eq!(c.len(), 2);
        assert!(c.gift().is_some_and(|t| t.id == TableId::gift()));
        assert_eq!(c.get(&TableId::numbered(5)).unwrap().seat_count, 6);
        assert_eq!(c.next_id(), 6);
        assert!(!c.ensure_gift(&room));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn seat_candidate_prefers_last_on_ties() {
        let room = room();
        let mut c = TableCollection::new();
        let a = c.add(6, TableVariant::Standard, &room).unwrap();
        let b = c.add(6, TableVariant::Standard, &room).unwrap();
        assert_eq!(c.seat_candidate(true), Some(b.clone()));
        assert_eq!(c.seat_candidate(false), Some(b));
        c.update_seats(&a, 3, &room);
        assert_eq!(c.seat_candidate(false), Some(a));
    }
}
