//! Bedlam - Headless Simulation Runner
//!
//! Bootstraps a small staffed hospital, runs the simulation at a fixed
//! cadence on a virtual clock, and prints the run summary. Optionally
//! records the run on a JSON leaderboard.

use clap::Parser;

use bedlam::core::error::Result;
use bedlam::core::types::GridPosition;
use bedlam::hospital::rooms::{place_room, RoomType};
use bedlam::hospital::staff::{assign_staff_to_room, hire_staff};
use bedlam::leaderboard::{Leaderboard, LeaderboardEntry};
use bedlam::simulation::economy::tick_time;
use bedlam::simulation::state::{GameSpeed, GameState};
use bedlam::simulation::tick::run_simulation_tick;

/// Headless hospital simulation runner
#[derive(Parser, Debug)]
#[command(name = "bedlam")]
#[command(about = "Run the hospital simulation without a renderer")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 5_000)]
    ticks: u64,

    /// Game speed multiplier (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    speed: u64,

    /// Record the run under this name on the leaderboard
    #[arg(long, default_value = "headless run")]
    name: String,

    /// Leaderboard JSON file to update (skipped when absent)
    #[arg(long)]
    leaderboard: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bedlam=info")),
        )
        .init();

    let args = Args::parse();

    let mut state = GameState::new(args.seed);
    if let Some(speed) = GameSpeed::from_multiplier(args.speed) {
        state.set_speed(speed);
    } else {
        tracing::warn!(speed = args.speed, "unknown speed multiplier, using 1x");
    }

    bootstrap_hospital(&mut state);

    println!("=== BEDLAM ===");
    println!(
        "Seed {} | {} rooms | {} staff | ${} cash",
        args.seed,
        state.rooms.len(),
        state.staff.len(),
        state.cash
    );

    let interval = state.speed.tick_interval_ms();
    let mut now_ms = 0;
    for _ in 0..args.ticks {
        now_ms += interval;
        run_simulation_tick(&mut state, now_ms);
        if state.game_over {
            break;
        }
    }

    let summary = state.summary();
    let time = tick_time(state.tick);
    let score = bedlam::leaderboard::calculate_score(
        summary.patients_cured,
        summary.patients_died,
        summary.cash,
        summary.reputation,
    );

    println!();
    println!("Stopped at tick {} (day {}, {:02}:00)", state.tick, time.day, time.hour);
    if state.game_over {
        println!("Outcome: {}", if state.won { "WON" } else { "GAME OVER" });
    } else {
        println!("Outcome: still running");
    }
    println!(
        "Cured: {} | Died: {} | Cash: ${} | Reputation: {}",
        summary.patients_cured, summary.patients_died, summary.cash, summary.reputation
    );
    println!("Score: {}", score);

    if let Some(path) = args.leaderboard {
        let mut board = Leaderboard::load(&path)?;
        board.add_entry(LeaderboardEntry::from_summary(
            args.name,
            &summary,
            format!("Day {}", time.day),
        ));
        board.save(&path)?;
        println!("Leaderboard updated: {}", path.display());
        for (i, entry) in board.entries().iter().enumerate() {
            println!(
                "  {:>2}. {:<20} {:>6}  ({} cured)",
                i + 1,
                entry.name,
                entry.score,
                entry.patients_cured
            );
        }
    }

    Ok(())
}

/// Place one room of each type and staff them all.
fn bootstrap_hospital(state: &mut GameState) {
    let layout = [
        (RoomType::Reception, GridPosition::new(2, 2)),
        (RoomType::GpOffice, GridPosition::new(6, 2)),
        (RoomType::Pharmacy, GridPosition::new(10, 2)),
        (RoomType::Deflation, GridPosition::new(14, 2)),
    ];

    for (room_type, position) in layout {
        let Some(room_id) = place_room(state, room_type, position) else {
            tracing::warn!(?room_type, "could not place room");
            continue;
        };
        let Some(staff_id) = hire_staff(state, room_type.required_staff()) else {
            tracing::warn!(?room_type, "could not afford staff");
            continue;
        };
        if !assign_staff_to_room(state, staff_id, room_id) {
            tracing::warn!(?room_type, "could not assign staff");
        }
    }
}
