//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::config::GRID_SIZE;

/// Game tick counter (simulation time unit, 1 tick = 1 simulated minute)
pub type Tick = u64;

/// Unique identifier for rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u64);

/// Unique identifier for staff members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub u64);

/// Unique identifier for patients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub u64);

/// Unique identifier for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// Allocates entity ids for a single simulation.
///
/// Owned by `GameState` so that concurrent simulations (e.g. in tests)
/// never share id sequences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub fn room_id(&mut self) -> RoomId {
        RoomId(self.alloc())
    }

    pub fn staff_id(&mut self) -> StaffId {
        StaffId(self.alloc())
    }

    pub fn patient_id(&mut self) -> PatientId {
        PatientId(self.alloc())
    }

    pub fn notification_id(&mut self) -> NotificationId {
        NotificationId(self.alloc())
    }
}

/// Integer tile coordinate on the hospital grid. Identity by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this tile lies on the playable grid
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }

    /// Manhattan distance to another tile
    pub fn manhattan_distance(&self, other: &Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}
