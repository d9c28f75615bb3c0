//! Ranked leaderboard of past runs
//!
//! Consumes the end-of-run summary the simulation produces; the core
//! itself never reads or writes this. Entries are ranked by score, then
//! by patients cured, and capped at ten.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::simulation::state::RunSummary;

/// Entries retained after ranking
pub const MAX_ENTRIES: usize = 10;

/// A single past-run record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: i64,
    pub patients_cured: u32,
    pub cash: i64,
    pub reputation: i32,
    pub date: String,
}

impl LeaderboardEntry {
    /// Build an entry from a run summary; the caller supplies the label
    /// and date stamp.
    pub fn from_summary(name: impl Into<String>, summary: &RunSummary, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: calculate_score(
                summary.patients_cured,
                summary.patients_died,
                summary.cash,
                summary.reputation,
            ),
            patients_cured: summary.patients_cured,
            cash: summary.cash,
            reputation: summary.reputation,
            date: date.into(),
        }
    }
}

/// Score formula: cures are the primary metric, deaths cost half a cure,
/// cash and reputation round it out. Never negative.
pub fn calculate_score(patients_cured: u32, patients_died: u32, cash: i64, reputation: i32) -> i64 {
    let score = patients_cured as i64 * 100 - patients_died as i64 * 50
        + cash.div_euclid(100)
        + reputation as i64 * 10;
    score.max(0)
}

/// The capped, ranked list of past runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Insert an entry, re-rank by (score desc, cured desc), keep top ten
    pub fn add_entry(&mut self, entry: LeaderboardEntry) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.patients_cured.cmp(&a.patients_cured))
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-based rank a score would take, or `None` when it misses the board
    pub fn would_rank(&self, score: i64) -> Option<usize> {
        match self.entries.iter().position(|e| score > e.score) {
            Some(position) => Some(position + 1),
            None if self.entries.len() < MAX_ENTRIES => Some(self.entries.len() + 1),
            None => None,
        }
    }

    /// Load from a JSON file; a missing file is an empty board
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Persist to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}
