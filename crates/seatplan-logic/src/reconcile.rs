//! Capacity reconciliation - how many tables a guest count needs.
//!
//! Given a target guest count and the seat counts of the tables that must
//! stay (placed or locked by the user), plan the new tables that cover the
//! rest:
//! - as many full 8-seat tables as possible,
//! - then at most one partial table with the exact remainder (a remainder of
//!   7 is an 8-class table showing 7 chairs, never a 6-class table),
//! - never more than `max_tables` tables in total, kept ones included.
//!
//! Pure planning only; creating and deleting the tables is the collection's
//! job.

use serde::{Deserialize, Serialize};

use crate::constants::seats;

/// New tables to create, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// Seat count of each new table.
    pub seats: Vec<u32>,
    /// Guests left without a seat because the table cap was reached.
    pub uncovered: u32,
}

impl ReconcilePlan {
    pub fn new_seat_total(&self) -> u32 {
        self.seats.iter().sum()
    }

    pub fn table_count(&self) -> usize {
        self.seats.len()
    }
}

/// Fewest tables that seat `guests` under the "full tables first" rule.
pub fn min_tables_for(guests: u32) -> usize {
    guests.div_ceil(seats::FULL_TABLE) as usize
}

/// Plan the new tables for `target` guests around the kept tables.
pub fn plan_tables(target: u32, kept_seats: &[u32], max_tables: usize) -> ReconcilePlan {
    let kept_total: u32 = kept_seats.iter().sum();
    let remaining = target.saturating_sub(kept_total);

    let mut plan = vec![seats::FULL_TABLE; (remaining / seats::FULL_TABLE) as usize];
    let partial = remaining % seats::FULL_TABLE;
    if partial > 0 {
        plan.push(partial);
    }

    let slots = max_tables.saturating_sub(kept_seats.len());
    // Over the cap the partial table is dropped before any full one.
    plan.truncate(slots);

    let covered: u32 = plan.iter().sum();
    ReconcilePlan {
        seats: plan,
        uncovered: remaining.saturating_sub(covered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_eight_guests() {
        let plan = plan_tables(38, &[], 13);
        assert_eq!(plan.seats, vec![8, 8, 8, 8, 6]);
        assert_eq!(plan.uncovered, 0);
    }

    #[test]
    fn thirty_nine_guests_keeps_seven() {
        let plan = plan_tables(39, &[], 13);
        assert_eq!(plan.seats, vec![8, 8, 8, 8, 7]);
        assert_eq!(plan.new_seat_total(), 39);
    }

    #[test]
    fn exact_multiple_has_no_partial() {
        assert_eq!(plan_tables(40, &[], 13).seats, vec![8; 5]);
    }

    #[test]
    fn kept_tables_count_toward_capacity() {
        let plan = plan_tables(38, &[8, 6], 13);
        assert_eq!(plan.seats, vec![8, 8, 8]);
        assert_eq!(plan.new_seat_total() + 14, 38);
    }

    #[test]
    fn kept_capacity_already_enough() {
        let plan = plan_tables(10, &[8, 8], 13);
        assert!(plan.seats.is_empty());
        assert_eq!(plan.uncovered, 0);
    }

    #[test]
    fn zero_guests_is_empty() {
        assert_eq!(plan_tables(0, &[], 13), ReconcilePlan::default());
    }

    #[test]
    fn hundred_guests_fit_the_cap() {
        let plan = plan_tables(100, &[], 13);
        assert_eq!(plan.table_count(), 13);
        assert_eq!(plan.new_seat_total(), 100);
    }

    #[test]
    fn cap_drops_tail_and_reports_shortfall() {
        // 12 kept single-seat tables leave one slot for 88 guests.
        let kept = vec![1; 12];
        let plan = plan_tables(100, &kept, 13);
        assert_eq!(plan.seats, vec![8]);
        assert_eq!(plan.uncovered, 80);
    }

    #[test]
    fn partial_goes_before_full_tables() {
        let plan = plan_tables(30, &[1; 12], 13);
        assert_eq!(plan.seats, vec![8]);
        assert_eq!(plan.uncovered, 10);
    }

    #[test]
    fn no_slots_left() {
        let kept = vec![2; 13];
        let plan = plan_tables(50, &kept, 13);
        assert!(plan.seats.is_empty());
        assert_eq!(plan.uncovered, 24);
    }

    #[test]
    fn min_tables() {
        assert_eq!(min_tables_for(0), 0);
        assert_eq!(min_tables_for(38), 5);
        assert_eq!(min_tables_for(40), 5);
        assert_eq!(min_tables_for(41), 6);
    }
}
