//! Cash flow, salaries and simulated time
//!
//! All money moves through `add_income`/`deduct_expense`; the latter is
//! the single place bankruptcy is detected. Salaries fall due on a fixed
//! tick interval.

use serde::{Deserialize, Serialize};

use crate::core::config::{DAY_START_HOUR, SALARY_INTERVAL_TICKS, TICKS_PER_DAY};
use crate::core::types::Tick;
use crate::simulation::state::{GameState, NotificationKind};

/// Derived simulated clock: 1 tick = 1 minute, day 1 starts at 08:00
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickTime {
    pub day: u64,
    pub hour: u64,
}

/// Day/hour of the given tick
pub fn tick_time(tick: Tick) -> TickTime {
    let day = tick / TICKS_PER_DAY + 1;
    let hour = ((tick % TICKS_PER_DAY) / 60 + DAY_START_HOUR) % 24;
    TickTime { day, hour }
}

/// Credit cash
pub fn add_income(state: &mut GameState, amount: i64) {
    state.cash += amount;
}

/// Deduct cash. Driving the balance negative is terminal: the game ends
/// immediately and is not retried.
pub fn deduct_expense(state: &mut GameState, amount: i64) {
    state.cash -= amount;

    if state.cash < 0 && !state.game_over {
        state.game_over = true;
        state.won = false;
        state.push_notification("BANKRUPT! Game Over.", NotificationKind::Error);
        tracing::warn!(cash = state.cash, "hospital went bankrupt");
    }
}

pub fn is_bankrupt(state: &GameState) -> bool {
    state.cash < 0
}

/// Deduct the sum of all staff salaries once per salary interval.
/// A no-op at tick 0 and between intervals.
pub fn process_salaries(state: &mut GameState) {
    if state.tick == 0 || state.tick % SALARY_INTERVAL_TICKS != 0 {
        return;
    }

    let total: i64 = state.staff.iter().map(|s| s.salary).sum();
    if total == 0 {
        return;
    }

    state.push_notification(format!("Salaries paid: -${}", total), NotificationKind::Info);
    deduct_expense(state, total);
    state.last_salary_tick = state.tick;
    tracing::debug!(tick = state.tick, total, "salaries deducted");
}
