//! Tick orchestrator
//!
//! Runs the per-tick pipeline in a fixed order. The order is load-bearing:
//! diagnosis and treatment must observe room occupancy established by
//! patient movement in the same tick, and salary deduction must see the
//! already-incremented tick counter.

use crate::hospital::patients::{check_patient_spawn, update_patients};
use crate::hospital::staff::{update_staff_ai, update_staff_movement};
use crate::simulation::diagnosis::process_diagnosis;
use crate::simulation::economy::process_salaries;
use crate::simulation::state::GameState;
use crate::simulation::treatment::process_treatments;

/// Run a single simulation tick.
///
/// `now_ms` is the driver's wall clock; it gates patient spawning and
/// stamps/prunes notifications. A no-op while paused or after game over.
pub fn run_simulation_tick(state: &mut GameState, now_ms: u64) {
    if state.paused || state.game_over {
        return;
    }

    state.now_ms = now_ms;
    state.tick += 1;

    check_patient_spawn(state, now_ms);
    update_patients(state);
    update_staff_movement(state);
    update_staff_ai(state);
    process_diagnosis(state);
    process_treatments(state);
    process_salaries(state);
    state.prune_notifications(now_ms);
}

/// Fixed-cadence driver: decouples rendering/polling frequency from the
/// simulation rate. A step runs only when the speed-scaled tick interval
/// has elapsed since the previous step.
#[derive(Debug, Clone, Copy)]
pub struct TickDriver {
    last_tick_ms: u64,
}

impl TickDriver {
    pub fn new(now_ms: u64) -> Self {
        Self {
            last_tick_ms: now_ms,
        }
    }

    /// Step the simulation if due. Returns whether a tick ran.
    pub fn advance(&mut self, state: &mut GameState, now_ms: u64) -> bool {
        if state.paused || state.game_over {
            return false;
        }
        if now_ms.saturating_sub(self.last_tick_ms) < state.speed.tick_interval_ms() {
            return false;
        }
        self.last_tick_ms = now_ms;
        run_simulation_tick(state, now_ms);
        true
    }
}
