//! Staff hiring, room assignment and movement
//!
//! Staff walk to their assigned room's entrance along an A* path, one
//! step per tick, then settle into working there.

use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::core::config::STAFF_SPAWN_TILE;
use crate::core::types::{GridPosition, RoomId, StaffId};
use crate::hospital::rooms::RoomState;
use crate::simulation::state::GameState;
use crate::spatial::pathfinding::find_path_to_room;

/// The fixed staff catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffType {
    Doctor,
    Nurse,
    Receptionist,
}

impl StaffType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StaffType::Doctor => "Doctor",
            StaffType::Nurse => "Nurse",
            StaffType::Receptionist => "Receptionist",
        }
    }

    /// One-off cost to hire
    pub fn hire_cost(&self) -> i64 {
        match self {
            StaffType::Doctor => 500,
            StaffType::Nurse => 300,
            StaffType::Receptionist => 200,
        }
    }

    /// Salary deducted every salary interval
    pub fn salary(&self) -> i64 {
        match self {
            StaffType::Doctor => 200,
            StaffType::Nurse => 150,
            StaffType::Receptionist => 100,
        }
    }
}

/// Movement state of a staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffState {
    Idle,
    Walking,
    Working,
    Resting,
}

/// A hired staff member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub staff_type: StaffType,
    pub name: String,
    /// 0-100; scales diagnosis speed and treatment success
    pub skill: f32,
    /// 0-100; tracked but not yet consumed by any rule
    pub stamina: f32,
    pub salary: i64,
    pub assigned_room_id: Option<RoomId>,
    pub state: StaffState,
    pub position: GridPosition,
    pub target_position: Option<GridPosition>,
    /// Queued grid steps toward the target, current tile excluded
    pub path: Vec<GridPosition>,
}

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Alex", "Sam", "Chris", "Pat", "Morgan", "Taylor", "Jordan", "Casey",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Jones", "Williams", "Brown", "Davis", "Miller", "Wilson", "Moore", "Taylor",
    "Anderson",
];

/// Hire a new staff member of the given type. Returns `None` (state
/// untouched) when the hire cost exceeds available cash.
pub fn hire_staff(state: &mut GameState, staff_type: StaffType) -> Option<StaffId> {
    if state.cash < staff_type.hire_cost() {
        return None;
    }

    let first = FIRST_NAMES[state.rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[state.rng.gen_range(0..LAST_NAMES.len())];
    let name = format!("{} {} {}", staff_type.name(), first, last);
    let skill = state.rng.gen_range(50.0..80.0);

    let id = state.ids.staff_id();
    state.cash -= staff_type.hire_cost();
    state.staff.push(Staff {
        id,
        staff_type,
        name,
        skill,
        stamina: 100.0,
        salary: staff_type.salary(),
        assigned_room_id: None,
        state: StaffState::Idle,
        position: STAFF_SPAWN_TILE,
        target_position: None,
        path: Vec::new(),
    });

    tracing::debug!(?id, ?staff_type, skill, "staff hired");
    Some(id)
}

/// Assign a staff member to a room and start them walking there.
///
/// Fails (state untouched) when either id is unknown, the room requires a
/// different staff type, the room already has staff, or no path exists
/// from the staff member's position to the room entrance.
pub fn assign_staff_to_room(state: &mut GameState, staff_id: StaffId, room_id: RoomId) -> bool {
    let Some(staff_index) = state.staff.iter().position(|s| s.id == staff_id) else {
        return false;
    };
    let Some(room_index) = state.rooms.iter().position(|r| r.id == room_id) else {
        return false;
    };

    let staff_type = state.staff[staff_index].staff_type;
    let room = &state.rooms[room_index];

    if room.room_type.required_staff() != staff_type {
        tracing::debug!(?staff_id, ?room_id, "staff type mismatch");
        return false;
    }
    if room.staff_id.is_some() {
        tracing::debug!(?room_id, "room already staffed");
        return false;
    }

    let path = find_path_to_room(state.staff[staff_index].position, room, &state.rooms);
    let Some(&entrance) = path.last() else {
        tracing::debug!(?staff_id, ?room_id, "no path to room entrance");
        return false;
    };

    // Release any previous room link before taking the new one
    if let Some(old_room_id) = state.staff[staff_index].assigned_room_id {
        if let Some(old_room) = state.room_mut(old_room_id) {
            old_room.staff_id = None;
            if old_room.patient_id.is_none() {
                old_room.state = RoomState::Empty;
            }
        }
    }

    state.rooms[room_index].staff_id = Some(staff_id);

    let member = &mut state.staff[staff_index];
    member.assigned_room_id = Some(room_id);
    member.path = path[1..].to_vec(); // Current tile excluded
    if member.path.is_empty() {
        // Already standing at the entrance
        member.state = StaffState::Working;
        member.target_position = None;
    } else {
        member.state = StaffState::Walking;
        member.target_position = Some(entrance);
    }

    if member.state == StaffState::Working {
        settle_into_room(state, room_index);
    }
    true
}

/// Clear both sides of a staff/room link and return the member to idle.
pub fn unassign_staff(state: &mut GameState, staff_id: StaffId) -> bool {
    let Some(staff_index) = state.staff.iter().position(|s| s.id == staff_id) else {
        return false;
    };
    let Some(room_id) = state.staff[staff_index].assigned_room_id else {
        return false;
    };

    if let Some(room) = state.room_mut(room_id) {
        room.staff_id = None;
        if room.patient_id.is_none() {
            room.state = RoomState::Empty;
        }
    }

    let member = &mut state.staff[staff_index];
    member.assigned_room_id = None;
    member.state = StaffState::Idle;
    member.target_position = None;
    member.path.clear();
    true
}

/// Advance every walking staff member one path step. On the final step
/// the member transitions to working (or idle if unassigned) and the room
/// registers them as present. A no-op for non-walking staff.
pub fn update_staff_movement(state: &mut GameState) {
    for i in 0..state.staff.len() {
        if state.staff[i].state != StaffState::Walking || state.staff[i].path.is_empty() {
            continue;
        }

        let next = state.staff[i].path.remove(0);
        state.staff[i].position = next;

        if state.staff[i].path.is_empty() {
            let member = &mut state.staff[i];
            member.target_position = None;
            member.state = if member.assigned_room_id.is_some() {
                StaffState::Working
            } else {
                StaffState::Idle
            };

            if let Some(room_id) = member.assigned_room_id {
                if let Some(room_index) = state.rooms.iter().position(|r| r.id == room_id) {
                    settle_into_room(state, room_index);
                }
            }
        }
    }
}

/// Staff behavior between assignments. Deliberately empty: staff hold
/// position until told otherwise, and stamina is not yet consumed.
pub fn update_staff_ai(_state: &mut GameState) {}

fn settle_into_room(state: &mut GameState, room_index: usize) {
    let room = &mut state.rooms[room_index];
    if room.patient_id.is_none() {
        room.state = RoomState::Working;
    }
}
