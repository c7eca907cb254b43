//! Floor plan engine - main entry point for editing a seat plan
//!
//! [`FloorPlan`] owns every piece of editor state and is the only place
//! mutations happen. Each successful mutation is persisted to the store
//! (best-effort) and then announced to the registered listeners.

use seatplan_logic::config::RoomConfig;
use seatplan_logic::footprint::TableVariant;
use seatplan_logic::geometry::{Point, Rect};
use seatplan_logic::reconcile::{plan_tables, ReconcilePlan};

use crate::components::*;
use crate::persistence::{
    load_accessories, load_tables, load_zoom, save_accessories, save_tables, save_zoom,
    KeyValueStore,
};
use crate::systems::*;

/// Zoom levels the editor toggles between.
pub const ZOOM_LEVELS: (f32, f32) = (1.0, 1.5);

/// Read-only snapshot handed to listeners after each change.
#[derive(Debug, Clone, Copy)]
pub struct FloorPlanView<'a> {
    pub tables: &'a [Table],
    pub accessories: &'a Accessories,
    pub selection: &'a Selection,
    pub zoom: f32,
    pub guest_count: u32,
}

/// Render collaborator notified after every mutation.
pub trait ChangeListener {
    fn floor_plan_changed(&mut self, view: &FloorPlanView<'_>);
}

impl<F> ChangeListener for F
where
    F: FnMut(&FloorPlanView<'_>),
{
    fn floor_plan_changed(&mut self, view: &FloorPlanView<'_>) {
        self(view)
    }
}

/// The seat plan editor state.
pub struct FloorPlan<S: KeyValueStore> {
    room: RoomConfig,
    tables: TableCollection,
    accessories: Accessories,
    selection: Selection,
    drag: DragState,
    zoom: f32,
    guest_count: u32,
    store: S,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl<S: KeyValueStore> FloorPlan<S> {
    /// Load whatever the store holds and repair it; the gift table is
    /// created if missing.
    pub fn open(room: RoomConfig, store: S) -> Self {
        let (stored, next_id) = load_tables(&store, &room);
        let stored_count = stored.len();
        let tables = TableCollection::from_parts(stored, next_id, &room);
        let accessories = load_accessories(&store, &room);
        let zoom = load_zoom(&store);

        let mut plan = Self {
            guest_count: room.clamp_guests(room.default_guests),
            room,
            tables,
            accessories,
            selection: Selection::new(),
            drag: DragState::Idle,
            zoom,
            store,
            listeners: Vec::new(),
        };

        let created_gift = plan.tables.ensure_gift(&plan.room);
        if created_gift || plan.tables.len() != stored_count {
            plan.persist_tables();
        }
        log::info!(
            "Opened floor plan: {} tables, next id {}",
            plan.tables.len(),
            plan.tables.next_id()
        );
        plan
    }

    pub fn room(&self) -> &RoomConfig {
        &self.room
    }

    pub fn tables(&self) -> &[Table] {
        self.tables.tables()
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn collection(&self) -> &TableCollection {
        &self.tables
    }

    pub fn accessories(&self) -> &Accessories {
        &self.accessories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn guest_count(&self) -> u32 {
        self.guest_count
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn add_listener(&mut self, listener: impl ChangeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn view(&self) -> FloorPlanView<'_> {
        FloorPlanView {
            tables: self.tables.tables(),
            accessories: &self.accessories,
            selection: &self.selection,
            zoom: self.zoom,
            guest_count: self.guest_count,
        }
    }

    // --- tables ---

    pub fn add_table(&mut self, seat_count: u32, variant: TableVariant) -> Option<TableId> {
        let id = self.tables.add(seat_count, variant, &self.room)?;
        self.commit_tables();
        Some(id)
    }

    pub fn delete_table(&mut self, id: &TableId) -> bool {
        let changed = self.tables.delete(id, &self.room);
        self.commit_tables_if(changed)
    }

    pub fn delete_tables(&mut self, ids: &[TableId]) -> usize {
        let removed = self.tables.delete_many(ids, &self.room);
        self.commit_tables_if(removed > 0);
        removed
    }

    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.ids().to_vec();
        self.delete_tables(&ids)
    }

    pub fn duplicate_table(&mut self, id: &TableId) -> Option<TableId> {
        let copy = self.tables.duplicate(id, &self.room)?;
        self.commit_tables();
        Some(copy)
    }

    pub fn duplicate_tables(&mut self, ids: &[TableId]) -> Vec<TableId> {
        let copies = self.tables.duplicate_group(ids, &self.room);
        self.commit_tables_if(!copies.is_empty());
        copies
    }

    /// Duplicate what is selected: one table alone, or the whole group.
    pub fn duplicate_selected(&mut self) -> Vec<TableId> {
        let ids = self.selection.ids().to_vec();
        match ids.as_slice() {
            [] => Vec::new(),
            [single] => self.duplicate_table(single).into_iter().collect(),
            _ => self.duplicate_tables(&ids),
        }
    }

    pub fn update_table_position(&mut self, id: &TableId, proposed: Point) -> bool {
        let changed = self.tables.update_position(id, proposed, &self.room);
        self.commit_tables_if(changed)
    }

    pub fn rotate_table(&mut self, id: &TableId) -> bool {
        let changed = self.tables.rotate(id);
        self.commit_tables_if(changed)
    }

    pub fn update_table_seats(&mut self, id: &TableId, seat_count: u32) -> bool {
        let changed = self.tables.update_seats(id, seat_count, &self.room);
        self.commit_tables_if(changed)
    }

    pub fn toggle_seat_class(&mut self, id: &TableId) -> bool {
        let changed = self.tables.toggle_seat_class(id, &self.room);
        self.commit_tables_if(changed)
    }

    pub fn toggle_lock(&mut self, id: &TableId) -> bool {
        let changed = self.tables.toggle_lock(id);
        self.commit_tables_if(changed)
    }

    pub fn ensure_gift_table(&mut self) -> bool {
        let changed = self.tables.ensure_gift(&self.room);
        self.commit_tables_if(changed)
    }

    /// Remove every table and restart numbering; the gift table comes back
    /// at its default spot.
    pub fn reset_all(&mut self) {
        self.tables.reset();
        self.tables.ensure_gift(&self.room);
        self.selection.clear();
        self.drag = DragState::Idle;
        log::info!("Floor plan reset");
        self.commit_tables();
    }

    pub fn renumber_tables(&mut self) -> bool {
        let changed = self.tables.renumber();
        self.commit_tables_if(changed)
    }

    // --- guests ---

    /// Rebuild the automatic tables for `guests` (clamped to the allowed
    /// range), leaving placed and locked tables alone.
    pub fn set_guest_count(&mut self, guests: u32) -> ReconcilePlan {
        let target = self.room.clamp_guests(guests);
        let plan = plan_tables(target, &self.tables.kept_seat_counts(), self.room.max_tables);
        let changed = self.tables.apply_plan(&plan, &self.room);
        self.guest_count = target;

        log::info!(
            "Reconciled {} guests: {} new tables {:?}",
            target,
            plan.table_count(),
            plan.seats
        );
        if plan.uncovered > 0 {
            log::warn!(
                "Table limit of {} reached, {} guests have no seat",
                self.room.max_tables,
                plan.uncovered
            );
        }
        if changed {
            self.commit_tables();
        } else {
            self.notify();
        }
        plan
    }

    /// One more guest. No-op at the maximum.
    pub fn add_guest(&mut self) -> bool {
        if self.guest_count >= self.room.max_guests {
            return false;
        }
        let change = add_guest_seat(&mut self.tables, &self.room);
        log::debug!("add guest: {change:?}");
        self.guest_count += 1;
        self.commit_tables();
        true
    }

    /// One guest fewer. No-op at the minimum; deleting a whole table takes
    /// all of its seats off the count.
    pub fn remove_guest(&mut self) -> bool {
        if self.guest_count <= self.room.min_guests {
            return false;
        }
        let change = remove_guest_seat(&mut self.tables, &self.room);
        log::debug!("remove guest: {change:?}");
        let removed = change.as_ref().map_or(1, GuestChange::guests_removed);
        self.guest_count = self
            .room
            .clamp_guests(self.guest_count.saturating_sub(removed));
        self.commit_tables();
        true
    }

    // --- selection ---

    pub fn select(&mut self, id: &TableId) -> bool {
        if !self.tables.contains(id) {
            return false;
        }
        self.selection.select_only(id.clone());
        self.notify();
        true
    }

    pub fn add_to_selection(&mut self, id: &TableId) -> bool {
        if !self.tables.contains(id) || self.selection.contains(id) {
            return false;
        }
        self.selection.add(id.clone());
        self.notify();
        true
    }

    /// Select every placed table touching `rect`; returns how many.
    pub fn select_in_rect(&mut self, rect: Rect) -> usize {
        let ids = self.tables.tables_in_rect(&rect);
        let count = ids.len();
        self.selection.replace(ids);
        self.notify();
        count
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.notify();
        }
    }

    // --- accessories ---

    pub fn move_accessory(&mut self, kind: AccessoryKind, proposed: Point) -> bool {
        let changed = self.accessories.move_to(kind, proposed, &self.room);
        self.commit_accessories_if(changed)
    }

    pub fn rotate_accessory(&mut self, kind: AccessoryKind) -> bool {
        let changed = self.accessories.rotate(kind);
        self.commit_accessories_if(changed)
    }

    /// Take a marker out of the room.
    pub fn stash_accessory(&mut self, kind: AccessoryKind) -> bool {
        let changed = self.accessories.stash(kind, &self.room);
        self.commit_accessories_if(changed)
    }

    // --- view ---

    /// Flip between the two zoom levels; returns the new level.
    pub fn toggle_zoom(&mut self) -> f32 {
        let (normal, zoomed) = ZOOM_LEVELS;
        self.zoom = if (self.zoom - normal).abs() < f32::EPSILON {
            zoomed
        } else {
            normal
        };
        if let Err(e) = save_zoom(&mut self.store, self.zoom) {
            log::warn!("Could not save zoom: {e}");
        }
        self.notify();
        self.zoom
    }

    // --- pointer gestures ---

    /// Start dragging `target`. Pressing an unselected table selects it;
    /// pressing a table inside a multi-selection drags the whole group.
    pub fn pointer_down(
        &mut self,
        target: DragTarget,
        screen: Point,
        space: &dyn CoordinateSpace,
    ) -> bool {
        let pointer = space.to_room(screen);
        let session = match &target {
            DragTarget::Table(id) => {
                let Some(position) = self.tables.get(id).map(|t| t.position) else {
                    return false;
                };
                let session = DragSession::new(target.clone(), pointer, position);
                if self.selection.is_group() && self.selection.contains(id) {
                    let group = self
                        .selection
                        .ids()
                        .iter()
                        .filter_map(|sid| self.tables.get(sid).map(|t| (sid.clone(), t.position)))
                        .collect();
                    session.with_group(group)
                } else {
                    self.selection.select_only(id.clone());
                    self.notify();
                    session
                }
            }
            DragTarget::Accessory(kind) => {
                let position = self.accessories.get(*kind).position;
                DragSession::new(target.clone(), pointer, position)
            }
        };
        self.drag = DragState::Dragging(session);
        true
    }

    /// Follow the pointer, clamping and persisting every step.
    pub fn pointer_move(&mut self, screen: Point, space: &dyn CoordinateSpace) -> bool {
        let pointer = space.to_room(screen);
        let threshold = self.room.click_threshold;
        let Some(session) = self.drag.session_mut() else {
            return false;
        };
        session.track(pointer, threshold);
        let target = session.target.clone();
        let proposed = session.proposed(pointer);
        let group = session.is_group().then(|| session.group_proposals(pointer));

        match (target, group) {
            (DragTarget::Table(_), Some(moves)) => {
                let mut changed = false;
                for (id, p) in moves {
                    changed |= self.tables.update_position(&id, p, &self.room);
                }
                self.commit_tables_if(changed)
            }
            (DragTarget::Table(id), None) => self.update_table_position(&id, proposed),
            (DragTarget::Accessory(kind), _) => self.move_accessory(kind, proposed),
        }
    }

    /// Release the pointer: take the final position and end the gesture.
    pub fn pointer_up(
        &mut self,
        screen: Point,
        space: &dyn CoordinateSpace,
    ) -> Option<DragOutcome> {
        self.pointer_move(screen, space);
        let outcome = self.drag.finish()?.outcome();
        log::debug!("drag finished: {outcome:?}");
        Some(outcome)
    }

    /// Pointer left the canvas: keep the last clamped position.
    pub fn pointer_leave(&mut self) -> Option<DragOutcome> {
        self.drag.finish().map(DragSession::outcome)
    }

    // --- commit ---

    fn commit_tables_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit_tables();
        }
        changed
    }

    fn commit_tables(&mut self) {
        let tables = &self.tables;
        self.selection.retain(|id| tables.contains(id));
        self.persist_tables();
        self.notify();
    }

    fn persist_tables(&mut self) {
        if let Err(e) = save_tables(&mut self.store, self.tables.tables(), self.tables.next_id()) {
            log::warn!("Could not save tables: {e}");
        }
    }

    fn commit_accessories_if(&mut self, changed: bool) -> bool {
        if changed {
            if let Err(e) = save_accessories(&mut self.store, &self.accessories) {
                log::warn!("Could not save accessory positions: {e}");
            }
            self.notify();
        }
        changed
    }

    fn notify(&mut self) {
        let view = FloorPlanView {
            tables: self.tables.tables(),
            accessories: &self.accessories,
            selection: &self.selection,
            zoom: self.zoom,
            guest_count: self.guest_count,
        };
        for listener in &mut self.listeners {
            listener.floor_plan_changed(&view);
        }
    }
}
