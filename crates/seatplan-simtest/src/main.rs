//! Seatplan Headless Harness
//!
//! Drives the layout rules and the floor plan engine end to end.
//! Runs entirely in-process: in-memory store, no rendering.
//!
//! Usage:
//!   cargo run -p seatplan-simtest
//!   cargo run -p seatplan-simtest -- --verbose

use seatplan_core::components::{AccessoryKind, TableId};
use seatplan_core::engine::FloorPlan;
use seatplan_core::persistence::MemoryStore;
use seatplan_core::systems::{DragOutcome, DragTarget, IdentitySpace};
use seatplan_logic::config::RoomConfig;
use seatplan_logic::constraints::{clamp_position, is_valid_position};
use seatplan_logic::footprint::{compute_footprint, Footprint, TableVariant};
use seatplan_logic::geometry::Point;
use seatplan_logic::reconcile::{min_tables_for, plan_tables};
use seatplan_logic::seating::{layout_seats, side_counts};

// ── Room configuration (shipped default hall) ───────────────────────────
const ROOM_JSON: &str = include_str!("../../../data/room.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Seatplan Harness ===\n");

    let room = match RoomConfig::from_json(ROOM_JSON) {
        Ok(room) => room,
        Err(e) => {
            println!("  ✗ room_config: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();

    // 1. Room configuration
    results.extend(validate_room_config(&room, verbose));

    // 2. Footprints and seat layout
    results.extend(validate_footprints(verbose));

    // 3. Capacity reconciliation sweep
    results.extend(validate_reconciliation(&room, verbose));

    // 4. Placement constraints
    results.extend(validate_constraints(&room, verbose));

    // 5. Floor plan scenarios
    results.extend(validate_floor_plan(&room, verbose));

    // 6. Persistence round trip
    results.extend(validate_persistence(&room, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Room Configuration ───────────────────────────────────────────────

fn validate_room_config(room: &RoomConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Room Configuration ---");
    let mut results = Vec::new();

    let errors = room.validate();
    results.push(TestResult {
        name: "room_config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            format!("{}×{} margin {}", room.width, room.height, room.margin)
        } else {
            errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
        },
    });

    results.push(TestResult {
        name: "room_config_matches_default".into(),
        passed: *room == RoomConfig::default(),
        detail: "data/room.json equals built-in defaults".into(),
    });

    let broken = RoomConfig::from_json(r#"{ "width": 100.0, "height": 50.0 }"#);
    results.push(TestResult {
        name: "room_config_rejects_tiny_room".into(),
        passed: broken.is_err(),
        detail: match broken {
            Ok(_) => "100×50 room accepted".into(),
            Err(e) => format!("rejected: {}", e),
        },
    });

    results
}

// ── 2. Footprints & Seats ───────────────────────────────────────────────

fn validate_footprints(verbose: bool) -> Vec<TestResult> {
    println!("--- Footprints & Seats ---");
    let mut results = Vec::new();

    let six = compute_footprint(6, TableVariant::Standard);
    let seven = compute_footprint(7, TableVariant::Standard);
    let eight = compute_footprint(8, TableVariant::Standard);
    results.push(TestResult {
        name: "standard_classes".into(),
        passed: (six.container_width, eight.container_width) == (79.0, 85.0) && seven == eight,
        detail: format!(
            "6→{}×{}, 7→{}×{}, 8→{}×{}",
            six.container_width,
            six.container_height,
            seven.container_width,
            seven.container_height,
            eight.container_width,
            eight.container_height
        ),
    });

    let gift = compute_footprint(8, TableVariant::Gift);
    results.push(TestResult {
        name: "gift_container_is_body".into(),
        passed: gift.container_width == gift.body_width
            && gift.container_height == gift.body_height,
        detail: format!("{}×{}", gift.body_width, gift.body_height),
    });

    let mut bad_sums = Vec::new();
    for n in 1..=8 {
        let f = compute_footprint(n, TableVariant::Standard);
        let placed = layout_seats(&f, n, TableVariant::Standard).len() as u32;
        if side_counts(n).total() != n || placed != n {
            bad_sums.push(n);
        }
        if verbose {
            let c = side_counts(n);
            println!(
                "  {} seats: top {} right {} bottom {} left {}",
                n, c.top, c.right, c.bottom, c.left
            );
        }
    }
    results.push(TestResult {
        name: "seat_sum_invariant".into(),
        passed: bad_sums.is_empty(),
        detail: if bad_sums.is_empty() {
            "1..=8 seats all distributed".into()
        } else {
            format!("wrong totals for {:?}", bad_sums)
        },
    });

    let royal_footprint = compute_footprint(4, TableVariant::Royal);
    let royal_seats = layout_seats(&royal_footprint, 4, TableVariant::Royal);
    results.push(TestResult {
        name: "royal_single_side".into(),
        passed: royal_seats.len() == 4 && royal_seats.windows(2).all(|w| w[0].side == w[1].side),
        detail: format!("{} chairs on one side", royal_seats.len()),
    });

    results
}

// ── 3. Reconciliation ───────────────────────────────────────────────────

fn validate_reconciliation(room: &RoomConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Capacity Reconciliation ---");
    let mut results = Vec::new();

    let mut failures = Vec::new();
    for guests in room.min_guests..=room.max_guests {
        let plan = plan_tables(guests, &[], room.max_tables);
        let ok = plan.new_seat_total() == guests
            && plan.table_count() == min_tables_for(guests)
            && plan.table_count() <= room.max_tables
            && plan.uncovered == 0;
        if !ok {
            failures.push(guests);
        }
    }
    results.push(TestResult {
        name: "reconcile_sweep".into(),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{}..={} guests covered exactly", room.min_guests, room.max_guests)
        } else {
            format!("failed for {:?}", failures)
        },
    });

    let p38 = plan_tables(38, &[], room.max_tables);
    results.push(TestResult {
        name: "reconcile_38".into(),
        passed: p38.seats == vec![8, 8, 8, 8, 6],
        detail: format!("{:?}", p38.seats),
    });

    let p39 = plan_tables(39, &[], room.max_tables);
    results.push(TestResult {
        name: "reconcile_39".into(),
        passed: p39.seats == vec![8, 8, 8, 8, 7],
        detail: format!("{:?}", p39.seats),
    });

    let kept = vec![1; 12];
    let capped = plan_tables(100, &kept, room.max_tables);
    results.push(TestResult {
        name: "reconcile_cap".into(),
        passed: capped.table_count() == 1 && capped.uncovered == 80,
        detail: format!("{:?}, {} uncovered", capped.seats, capped.uncovered),
    });

    if verbose {
        println!("  Tables per guest count:");
        for guests in (room.min_guests..=room.max_guests).step_by(10) {
            let plan = plan_tables(guests, &[], room.max_tables);
            println!("    {:3} guests: {:?}", guests, plan.seats);
        }
    }

    results
}

// ── 4. Constraints ──────────────────────────────────────────────────────

fn validate_constraints(room: &RoomConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Placement Constraints ---");
    let mut results = Vec::new();

    let narrow_royal = Footprint {
        body_width: 18.0,
        body_height: 40.0,
        container_width: 50.0,
        container_height: 72.0,
    };
    let p = clamp_position(TableVariant::Royal, &narrow_royal, Point::ZERO, room);
    results.push(TestResult {
        name: "royal_to_corner".into(),
        passed: p == Point::new(930.0, 20.0),
        detail: format!("({}, {})", p.x, p.y),
    });

    let mut violations = 0;
    let mut checked = 0;
    for variant in [TableVariant::Standard, TableVariant::Royal, TableVariant::Gift] {
        for seats in 1..=8 {
            let f = compute_footprint(seats, variant);
            for x in (-200..=1200).step_by(100) {
                for y in (-200..=800).step_by(100) {
                    let once = clamp_position(variant, &f, Point::new(x as f32, y as f32), room);
                    let twice = clamp_position(variant, &f, once, room);
                    checked += 1;
                    if once != twice || !is_valid_position(variant, &f, once, room) {
                        violations += 1;
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "clamp_idempotent".into(),
        passed: violations == 0,
        detail: format!("{} positions, {} violations", checked, violations),
    });

    results
}

// ── 5. Floor Plan ───────────────────────────────────────────────────────

fn validate_floor_plan(room: &RoomConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Floor Plan ---");
    let mut results = Vec::new();
    let mut plan = FloorPlan::open(room.clone(), MemoryStore::new());

    results.push(TestResult {
        name: "gift_created_on_open".into(),
        passed: plan.table(&TableId::gift()).is_some(),
        detail: format!("{} tables after open", plan.tables().len()),
    });

    let rotated = plan.add_table(6, TableVariant::Standard);
    if let Some(id) = &rotated {
        for _ in 0..5 {
            plan.rotate_table(id);
        }
    }
    let rotation = rotated.as_ref().and_then(|id| plan.table(id)).map(|t| t.rotation);
    results.push(TestResult {
        name: "five_rotations".into(),
        passed: rotation == Some(225),
        detail: format!("{:?}", rotation),
    });

    let wall = plan.add_table(8, TableVariant::Standard);
    let mut duplicate_detail = "no table".to_string();
    let mut duplicate_ok = false;
    if let Some(id) = &wall {
        plan.update_table_position(id, Point::new(room.width, 200.0));
        if let Some(copy) = plan.duplicate_table(id) {
            let original = plan.table(id).map(|t| t.position.x).unwrap_or_default();
            let copied = plan.table(&copy).map(|t| t.position.x).unwrap_or_default();
            duplicate_ok = copied < original;
            duplicate_detail = format!("original x {} → copy x {}", original, copied);
        }
    }
    results.push(TestResult {
        name: "duplicate_at_wall".into(),
        passed: duplicate_ok,
        detail: duplicate_detail,
    });

    let before = plan.tables().len();
    plan.delete_table(&TableId::gift());
    let gift_parked = plan
        .table(&TableId::gift())
        .map(|g| !g.placed && g.position == room.gift_holding)
        .unwrap_or(false);
    results.push(TestResult {
        name: "gift_delete_parks".into(),
        passed: gift_parked && plan.tables().len() == before,
        detail: format!("{} tables before, {} after", before, plan.tables().len()),
    });

    let result = plan.set_guest_count(38);
    let kept_seats: u32 = plan
        .tables()
        .iter()
        .filter(|t| !t.is_gift())
        .map(|t| t.seat_count)
        .sum();
    results.push(TestResult {
        name: "guest_count_38".into(),
        passed: kept_seats == 38 && result.uncovered == 0,
        detail: format!("new tables {:?}, {} seats total", result.seats, kept_seats),
    });

    let start = plan.accessories().dj_booth.position;
    plan.pointer_down(DragTarget::Accessory(AccessoryKind::DjBooth), start, &IdentitySpace);
    let outcome = plan.pointer_up(Point::new(-5000.0, start.y), &IdentitySpace);
    let dj = plan.accessories().dj_booth.position;
    results.push(TestResult {
        name: "dj_soft_clamp".into(),
        passed: matches!(outcome, Some(DragOutcome::Moved(_)))
            && dj.x == room.margin - room.dj_width,
        detail: format!("dj at ({}, {})", dj.x, dj.y),
    });

    let all_valid = plan.tables().iter().all(|t| t.satisfies_constraint(room));
    results.push(TestResult {
        name: "tables_within_constraints".into(),
        passed: all_valid,
        detail: format!("{} tables checked", plan.tables().len()),
    });

    if verbose {
        println!("  Final layout:");
        for t in plan.tables() {
            println!(
                "    {:16} {:8} {:>9} seats={} at ({:.0}, {:.0}) placed={}",
                t.id.as_str(),
                format!("{:?}", t.variant),
                t.label.to_string(),
                t.seat_count,
                t.position.x,
                t.position.y,
                t.placed
            );
        }
    }

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(room: &RoomConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let mut plan = FloorPlan::open(room.clone(), MemoryStore::new());
    plan.set_guest_count(45);
    if let Some(id) = plan.add_table(5, TableVariant::Royal) {
        plan.toggle_lock(&id);
    }
    plan.stash_accessory(AccessoryKind::PhotoBox);
    plan.toggle_zoom();

    let tables = plan.tables().to_vec();
    let accessories = *plan.accessories();
    let reopened = FloorPlan::open(room.clone(), plan.into_store());

    results.push(TestResult {
        name: "tables_round_trip".into(),
        passed: reopened.tables() == tables.as_slice(),
        detail: format!("{} tables", tables.len()),
    });
    results.push(TestResult {
        name: "accessories_round_trip".into(),
        passed: *reopened.accessories() == accessories,
        detail: format!("photo box placed={}", reopened.accessories().photo_box.placed),
    });
    results.push(TestResult {
        name: "zoom_round_trip".into(),
        passed: reopened.zoom() == 1.5,
        detail: format!("zoom {}", reopened.zoom()),
    });

    results
}
