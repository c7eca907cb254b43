//! Single-guest edits: grow or shrink the table set by one seat without a
//! full reconciliation.

use seatplan_logic::config::RoomConfig;
use seatplan_logic::footprint::{compute_footprint, TableVariant};
use seatplan_logic::placement::find_free_spot;

use crate::components::TableId;
use crate::systems::TableCollection;

/// What a single-guest edit did to the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestChange {
    SeatAdded(TableId),
    /// New one-seat table; `placed` is false when no free spot was found.
    TableCreated { id: TableId, placed: bool },
    SeatRemoved(TableId),
    TableRemoved { id: TableId, seats: u32 },
}

impl GuestChange {
    /// Guests the edit took away (zero for additions).
    pub fn guests_removed(&self) -> u32 {
        match self {
            GuestChange::SeatAdded(_) | GuestChange::TableCreated { .. } => 0,
            GuestChange::SeatRemoved(_) => 1,
            GuestChange::TableRemoved { seats, .. } => *seats,
        }
    }
}

/// Seat one more guest: top up the fullest open table, or drop a new
/// one-seat table into the first free spot (staged if the room is full).
pub fn add_guest_seat(tables: &mut TableCollection, room: &RoomConfig) -> GuestChange {
    if let Some(id) = tables.seat_candidate(true) {
        let next = tables.get(&id).map_or(1, |t| t.seat_count + 1);
        tables.update_seats(&id, next, room);
        return GuestChange::SeatAdded(id);
    }

    let footprint = compute_footprint(1, TableVariant::Standard);
    let spot = find_free_spot(room, &footprint, &tables.occupied_rects());
    let id = tables.add_standard_at(1, spot, room);
    log::debug!("guest added at new table {id}");
    GuestChange::TableCreated {
        id,
        placed: spot.is_some(),
    }
}

/// Remove one guest: take a chair from the emptiest open table, or delete
/// the most recent table outright. `None` when there is nothing to remove.
pub fn remove_guest_seat(tables: &mut TableCollection, room: &RoomConfig) -> Option<GuestChange> {
    if let Some(id) = tables.seat_candidate(false) {
        let next = tables.get(&id).map_or(1, |t| t.seat_count.saturating_sub(1));
        tables.update_seats(&id, next, room);
        return Some(GuestChange::SeatRemoved(id));
    }

    let last = tables.most_recent()?;
    let (id, seats) = (last.id.clone(), last.seat_count);
    tables.delete(&id, room);
    log::debug!("guest removal deleted table {id} ({seats} seats)");
    Some(GuestChange::TableRemoved { id, seats })
}
