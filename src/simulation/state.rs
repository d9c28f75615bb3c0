//! The aggregate game state
//!
//! `GameState` is the single mutable world owned by the tick orchestrator
//! for the duration of a tick. External mutations (placing rooms, hiring)
//! apply between ticks. It owns its own id generator and seeded RNG so
//! that concurrent simulations never share hidden state and runs are
//! reproducible from a seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{
    NOTIFICATION_TTL_MS, SIMULATION_TICK_MS, STARTING_CASH, STARTING_REPUTATION,
};
use crate::core::types::{IdGenerator, NotificationId, PatientId, RoomId, StaffId, Tick};
use crate::hospital::patients::Patient;
use crate::hospital::rooms::{Room, RoomType};
use crate::hospital::staff::Staff;

/// Simulation speed multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSpeed {
    Normal,
    Fast,
    Fastest,
}

impl GameSpeed {
    pub fn multiplier(&self) -> u64 {
        match self {
            GameSpeed::Normal => 1,
            GameSpeed::Fast => 2,
            GameSpeed::Fastest => 3,
        }
    }

    /// Real milliseconds between simulation ticks at this speed
    pub fn tick_interval_ms(&self) -> u64 {
        SIMULATION_TICK_MS / self.multiplier()
    }

    pub fn from_multiplier(multiplier: u64) -> Option<Self> {
        match multiplier {
            1 => Some(GameSpeed::Normal),
            2 => Some(GameSpeed::Fast),
            3 => Some(GameSpeed::Fastest),
            _ => None,
        }
    }
}

/// Severity/flavor of a notification toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub timestamp_ms: u64,
}

/// What the player currently has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Room(RoomId),
    Staff(StaffId),
    Patient(PatientId),
}

/// The active player tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Select,
    Build(RoomType),
    Demolish,
}

/// End-of-run summary handed to the leaderboard collaborator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunSummary {
    pub patients_cured: u32,
    pub patients_died: u32,
    pub cash: i64,
    pub reputation: i32,
}

/// Aggregate root of the simulation
#[derive(Debug, Clone)]
pub struct GameState {
    pub tick: Tick,
    pub cash: i64,
    /// 0-100; scales treatment income, lowered by departures and deaths
    pub reputation: i32,
    pub rooms: Vec<Room>,
    pub staff: Vec<Staff>,
    pub patients: Vec<Patient>,
    pub notifications: Vec<Notification>,
    pub tool: Tool,
    pub selection: Selection,
    pub paused: bool,
    pub speed: GameSpeed,
    pub patients_cured: u32,
    pub patients_died: u32,
    pub game_over: bool,
    pub won: bool,
    /// Wall-clock ms of the last patient spawn
    pub last_patient_spawn_ms: u64,
    pub last_salary_tick: Tick,
    /// Wall-clock ms supplied by the driver at the current tick
    pub now_ms: u64,
    pub ids: IdGenerator,
    pub rng: ChaCha8Rng,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            tick: 0,
            cash: STARTING_CASH,
            reputation: STARTING_REPUTATION,
            rooms: Vec::new(),
            staff: Vec::new(),
            patients: Vec::new(),
            notifications: Vec::new(),
            tool: Tool::Select,
            selection: Selection::None,
            paused: false,
            speed: GameSpeed::Normal,
            patients_cured: 0,
            patients_died: 0,
            game_over: false,
            won: false,
            last_patient_spawn_ms: 0,
            last_salary_tick: 0,
            now_ms: 0,
            ids: IdGenerator::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }

    pub fn staff(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn staff_mut(&mut self, id: StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| s.id == id)
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn patient_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.id == id)
    }

    /// Append a notification stamped with the current tick's wall clock
    pub fn push_notification(&mut self, message: impl Into<String>, kind: NotificationKind) {
        let id = self.ids.notification_id();
        self.notifications.push(Notification {
            id,
            message: message.into(),
            kind,
            timestamp_ms: self.now_ms,
        });
    }

    /// Drop notifications older than their display lifetime
    pub fn prune_notifications(&mut self, now_ms: u64) {
        self.notifications
            .retain(|n| now_ms.saturating_sub(n.timestamp_ms) < NOTIFICATION_TTL_MS);
    }

    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn set_speed(&mut self, speed: GameSpeed) {
        self.speed = speed;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Clamped reputation adjustment
    pub fn adjust_reputation(&mut self, delta: i32) {
        self.reputation = (self.reputation + delta).clamp(0, 100);
    }

    /// Final values for the leaderboard collaborator
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            patients_cured: self.patients_cured,
            patients_died: self.patients_died,
            cash: self.cash,
            reputation: self.reputation,
        }
    }
}
