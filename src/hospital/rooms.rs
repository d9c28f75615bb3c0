//! Room catalog, placement and occupancy
//!
//! Rooms occupy rectangular tile footprints on the grid. Placement is
//! atomic: it either deducts the cost and appends the room, or leaves the
//! state untouched. A room's footprint never overlaps another room's.

use serde::{Deserialize, Serialize};

use crate::core::config::DEMOLISH_REFUND_DIVISOR;
use crate::core::types::{GridPosition, PatientId, RoomId, StaffId};
use crate::hospital::staff::{StaffState, StaffType};
use crate::simulation::state::GameState;

/// The fixed room catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Reception,
    GpOffice,
    Pharmacy,
    Deflation,
}

impl RoomType {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            RoomType::Reception => "Reception",
            RoomType::GpOffice => "GP's Office",
            RoomType::Pharmacy => "Pharmacy",
            RoomType::Deflation => "Deflation Room",
        }
    }

    /// Placement cost
    pub fn cost(&self) -> i64 {
        match self {
            RoomType::Reception => 500,
            RoomType::GpOffice => 1_000,
            RoomType::Pharmacy => 1_500,
            RoomType::Deflation => 2_000,
        }
    }

    /// Footprint size (width, height) in tiles, fixed per type
    pub fn size(&self) -> (i32, i32) {
        match self {
            RoomType::Reception => (2, 2),
            RoomType::GpOffice => (3, 3),
            RoomType::Pharmacy => (3, 3),
            RoomType::Deflation => (4, 3),
        }
    }

    /// Staff type that may be assigned to this room
    pub fn required_staff(&self) -> StaffType {
        match self {
            RoomType::Reception => StaffType::Receptionist,
            RoomType::GpOffice => StaffType::Doctor,
            RoomType::Pharmacy => StaffType::Nurse,
            RoomType::Deflation => StaffType::Doctor,
        }
    }
}

/// Occupancy state of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomState {
    /// No staff working inside
    Empty,
    /// Assigned staff present, no patient
    Working,
    /// A patient is inside
    Occupied,
}

/// A placed room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_type: RoomType,
    /// Top-left corner of the footprint
    pub position: GridPosition,
    pub width: i32,
    pub height: i32,
    pub staff_id: Option<StaffId>,
    pub patient_id: Option<PatientId>,
    pub state: RoomState,
}

impl Room {
    pub fn new(id: RoomId, room_type: RoomType, position: GridPosition) -> Self {
        let (width, height) = room_type.size();
        Self {
            id,
            room_type,
            position,
            width,
            height,
            staff_id: None,
            patient_id: None,
            state: RoomState::Empty,
        }
    }

    /// Whether the footprint covers the given tile
    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= self.position.x
            && pos.x < self.position.x + self.width
            && pos.y >= self.position.y
            && pos.y < self.position.y + self.height
    }

    /// The single walkable tile used to enter this room: directly below
    /// the footprint's bottom-left corner. A room flush with the bottom
    /// map edge has an out-of-bounds entrance and is unroutable until
    /// demolished.
    pub fn entrance(&self) -> GridPosition {
        GridPosition::new(self.position.x, self.position.y + self.height)
    }

    /// Remove the occupying patient; staffed rooms return to working
    pub fn clear_patient(&mut self) {
        self.patient_id = None;
        self.state = if self.staff_id.is_some() {
            RoomState::Working
        } else {
            RoomState::Empty
        };
    }

    /// All tiles of the footprint
    pub fn tiles(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.width).flat_map(move |dx| {
            (0..self.height)
                .map(move |dy| GridPosition::new(self.position.x + dx, self.position.y + dy))
        })
    }
}

/// Whether any room footprint covers the tile
pub fn is_tile_occupied(rooms: &[Room], pos: GridPosition) -> bool {
    rooms.iter().any(|room| room.contains(pos))
}

/// First room (by insertion order) whose footprint contains the tile
pub fn room_at(rooms: &[Room], pos: GridPosition) -> Option<&Room> {
    rooms.iter().find(|room| room.contains(pos))
}

/// First room of the given type with staff assigned and no patient.
/// Used by patient routing.
pub fn find_available_room(rooms: &[Room], room_type: RoomType) -> Option<&Room> {
    rooms
        .iter()
        .find(|r| r.room_type == room_type && r.staff_id.is_some() && r.patient_id.is_none())
}

/// Placement legality: affordable, fully in bounds, no footprint overlap
pub fn can_place_room(state: &GameState, room_type: RoomType, position: GridPosition) -> bool {
    if state.cash < room_type.cost() {
        return false;
    }

    let (width, height) = room_type.size();
    for dx in 0..width {
        for dy in 0..height {
            let tile = GridPosition::new(position.x + dx, position.y + dy);
            if !tile.in_bounds() || is_tile_occupied(&state.rooms, tile) {
                return false;
            }
        }
    }

    true
}

/// Place a room, deducting its cost. Returns `None` (state untouched) if
/// placement is illegal.
pub fn place_room(
    state: &mut GameState,
    room_type: RoomType,
    position: GridPosition,
) -> Option<RoomId> {
    if !can_place_room(state, room_type, position) {
        return None;
    }

    let id = state.ids.room_id();
    state.cash -= room_type.cost();
    state.rooms.push(Room::new(id, room_type, position));
    tracing::debug!(?id, ?room_type, ?position, "room placed");
    Some(id)
}

/// Demolish a room, refunding half its cost. Refused while a patient
/// occupies the room. Any assigned staff is released back to idle.
pub fn demolish_room(state: &mut GameState, room_id: RoomId) -> bool {
    let Some(index) = state.rooms.iter().position(|r| r.id == room_id) else {
        return false;
    };

    if state.rooms[index].patient_id.is_some() {
        return false;
    }

    let room = state.rooms.remove(index);
    state.cash += room.room_type.cost() / DEMOLISH_REFUND_DIVISOR;

    if let Some(staff_id) = room.staff_id {
        if let Some(staff) = state.staff_mut(staff_id) {
            staff.assigned_room_id = None;
            staff.state = StaffState::Idle;
            staff.path.clear();
            staff.target_position = None;
        }
    }

    tracing::debug!(?room_id, "room demolished");
    true
}
