//! Simulation configuration with documented constants
//!
//! All gameplay magic numbers are collected here with explanations of
//! their purpose and how they interact with each other. The grid size and
//! the room/staff/disease catalogs are fixed; there is no difficulty
//! scaling beyond these values.

use crate::core::types::GridPosition;

/// Side length of the square hospital grid, in tiles.
pub const GRID_SIZE: i32 = 20;

/// Cash at the start of a new game.
///
/// Enough for a reception + GP office + one treatment room plus the staff
/// to run them, with a small buffer before the first salary payment.
pub const STARTING_CASH: i64 = 10_000;

/// Reputation at the start of a new game (scale 0-100).
pub const STARTING_REPUTATION: i32 = 50;

/// Patients cured to win the game.
pub const WIN_CONDITION: u32 = 20;

/// Upper bound on simultaneously active patients.
///
/// New arrivals are suppressed at this count; keeps the hospital legible
/// and bounds per-tick work.
pub const MAX_PATIENTS: usize = 10;

/// Real-time interval between patient spawns, in milliseconds.
pub const PATIENT_SPAWN_INTERVAL_MS: u64 = 5_000;

/// Base duration of one simulation tick in real milliseconds.
///
/// The effective cadence is this divided by the game speed (1, 2 or 3).
pub const SIMULATION_TICK_MS: u64 = 100;

/// Ticks between salary deductions (~30 real seconds at speed 1).
pub const SALARY_INTERVAL_TICKS: u64 = 300;

/// Real-time lifetime of a notification before it is pruned, in ms.
pub const NOTIFICATION_TTL_MS: u64 = 3_000;

/// Patience lost per tick while a patient is active (not leaving/cured).
///
/// At 0.1/tick a fresh patient tolerates 1000 ticks of queueing before
/// storming out, which spans several salary intervals.
pub const PATIENCE_DECAY_PER_TICK: f32 = 0.1;

/// Health lost per tick while a patient is active.
///
/// Half the patience rate: an untreated patient usually leaves angry
/// before the illness kills them, but a patient stuck in a queue long
/// enough will die.
pub const HEALTH_DECAY_PER_TICK: f32 = 0.05;

/// Reputation lost when a patient leaves angrily.
pub const ANGRY_DEPARTURE_REPUTATION_LOSS: i32 = 2;

/// Reputation lost when a patient dies (illness or failed treatment).
pub const DEATH_REPUTATION_LOSS: i32 = 5;

/// Fee credited when a patient completes a GP office visit.
pub const GP_VISIT_FEE: i64 = 50;

/// Fraction of the placement cost refunded on demolition.
pub const DEMOLISH_REFUND_DIVISOR: i64 = 2;

/// Hard cap on A* node expansions per pathfinding call.
///
/// Bounds worst-case latency; an exhausted search reports "no path" and
/// callers retry on a later tick.
pub const PATHFIND_MAX_EXPANSIONS: u32 = 1_000;

/// Simulated minutes per day (ticks per day).
pub const TICKS_PER_DAY: u64 = 1_440;

/// Hour of day at tick 0: the hospital opens at 08:00 on day 1.
pub const DAY_START_HOUR: u64 = 8;

/// Tile where newly hired staff appear.
pub const STAFF_SPAWN_TILE: GridPosition = GridPosition { x: 0, y: 0 };
