//! Integration tests for the hospital build-out and patient flow
//!
//! These tests verify the complete care pipeline:
//! - Build workflow (place rooms -> hire staff -> assign -> staff walks in)
//! - Patient workflow (arrive -> reception -> diagnosis chain -> treatment)
//! - The leaderboard boundary fed by the run summary

use bedlam::core::types::GridPosition;
use bedlam::hospital::patients::{spawn_patient, PatientState};
use bedlam::hospital::rooms::{place_room, RoomState, RoomType};
use bedlam::hospital::staff::{assign_staff_to_room, hire_staff, StaffState, StaffType};
use bedlam::leaderboard::{calculate_score, Leaderboard, LeaderboardEntry};
use bedlam::simulation::state::GameState;
use bedlam::simulation::tick::run_simulation_tick;

/// Place one room of each type, hire matching staff, and walk everyone in.
fn staffed_hospital(seed: u64) -> GameState {
    let mut state = GameState::new(seed);

    let layout = [
        (RoomType::Reception, GridPosition::new(2, 2)),
        (RoomType::GpOffice, GridPosition::new(6, 2)),
        (RoomType::Pharmacy, GridPosition::new(10, 2)),
        (RoomType::Deflation, GridPosition::new(14, 2)),
    ];

    for (room_type, position) in layout {
        let room_id = place_room(&mut state, room_type, position)
            .unwrap_or_else(|| panic!("placing {:?} should succeed", room_type));
        let staff_id = hire_staff(&mut state, room_type.required_staff())
            .unwrap_or_else(|| panic!("hiring for {:?} should succeed", room_type));
        assert!(
            assign_staff_to_room(&mut state, staff_id, room_id),
            "assignment to {:?} should succeed",
            room_type
        );
    }

    // Let everyone walk to their room
    for _ in 0..80 {
        bedlam::hospital::staff::update_staff_movement(&mut state);
    }

    assert!(
        state.staff.iter().all(|s| s.state == StaffState::Working),
        "all staff should have reached their rooms"
    );
    state
}

#[test]
fn test_build_workflow_links_staff_and_rooms() {
    let state = staffed_hospital(100);

    assert_eq!(state.rooms.len(), 4);
    assert_eq!(state.staff.len(), 4);
    for room in &state.rooms {
        let staff_id = room.staff_id.expect("every room should be staffed");
        let member = state.staff(staff_id).expect("staff id should resolve");
        assert_eq!(member.assigned_room_id, Some(room.id));
        assert_eq!(member.staff_type, room.room_type.required_staff());
        assert_eq!(member.position, room.entrance());
        assert_eq!(room.state, RoomState::Working);
    }

    // Build-out costs: four rooms plus four hires
    let rooms_cost: i64 = state.rooms.iter().map(|r| r.room_type.cost()).sum();
    let hires_cost: i64 = state
        .staff
        .iter()
        .map(|s| s.staff_type.hire_cost())
        .sum();
    assert_eq!(state.cash, 10_000 - rooms_cost - hires_cost);
}

#[test]
fn test_patient_walks_the_full_care_pipeline() {
    let mut state = staffed_hospital(200);
    // Pin skill so diagnosis takes a few observable ticks per room
    for member in &mut state.staff {
        member.skill = 60.0;
    }

    let patient_id = spawn_patient(&mut state);
    {
        let p = state.patient_mut(patient_id).unwrap();
        p.position = GridPosition::new(0, 10);
    }
    // Suppress further spawns so the scenario stays single-patient
    state.last_patient_spawn_ms = u64::MAX - 100_000_000;

    let mut saw_gp = false;
    let mut saw_diagnosed = false;
    let mut now_ms = 0;
    for _ in 0..600 {
        now_ms += 100;
        run_simulation_tick(&mut state, now_ms);

        match state.patient(patient_id) {
            Some(p) => {
                saw_gp |= p.state == PatientState::InGp;
                saw_diagnosed |= p.diagnosed;
            }
            None => break, // exited or died
        }
    }

    assert!(saw_gp, "patient should pass through the GP office");
    assert!(saw_diagnosed, "patient should complete the diagnosis chain");
    assert!(
        state.patient(patient_id).is_none(),
        "patient should have left the hospital"
    );
    assert_eq!(
        state.patients_cured + state.patients_died,
        1,
        "exactly one treatment outcome"
    );
    // Whatever the roll, every room is free again
    for room in &state.rooms {
        assert_eq!(room.patient_id, None);
    }
}

#[test]
fn test_demolition_frees_footprint_for_rebuilding() {
    let mut state = GameState::new(300);
    let first = place_room(&mut state, RoomType::GpOffice, GridPosition::new(5, 5)).unwrap();

    // Same footprint is refused while the room stands
    assert!(place_room(&mut state, RoomType::Reception, GridPosition::new(5, 5)).is_none());

    assert!(bedlam::hospital::rooms::demolish_room(&mut state, first));
    assert!(place_room(&mut state, RoomType::Reception, GridPosition::new(5, 5)).is_some());
}

#[test]
fn test_summary_feeds_the_leaderboard() {
    let mut state = staffed_hospital(400);
    state.patients_cured = 12;
    state.patients_died = 3;

    let summary = state.summary();
    let mut board = Leaderboard::new();
    board.add_entry(LeaderboardEntry::from_summary("integration", &summary, "Day 1"));

    assert_eq!(board.entries().len(), 1);
    assert_eq!(
        board.entries()[0].score,
        calculate_score(12, 3, summary.cash, summary.reputation)
    );
    assert_eq!(board.would_rank(i64::MAX), Some(1));
}

#[test]
fn test_hiring_spree_runs_out_of_money() {
    let mut state = GameState::new(500);

    let mut hired = 0;
    while hire_staff(&mut state, StaffType::Doctor).is_some() {
        hired += 1;
        assert!(hired < 100, "hiring must eventually fail");
    }

    assert!(state.cash < StaffType::Doctor.hire_cost());
    assert_eq!(state.staff.len(), hired);
    // Rejected hire never dips the balance negative
    assert!(state.cash >= 0);
}
