//! Leaderboard
//!
//! A flat list of the best runs, highest score first, capped at ten entries.
//! Where the list is stored (and how it is signed) is up to the host; this
//! module only keeps it ordered and round-trips it through JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::RunSummary;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("leaderboard JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Blocks passed during the run
    pub blocks: u64,
}

/// Best runs, sorted descending by score
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot a score would take; equal scores stay behind earlier runs
    fn slot_for(&self, score: u64) -> Option<usize> {
        let slot = self.entries.partition_point(|e| e.score >= score);
        (score > 0 && slot < MAX_ENTRIES).then_some(slot)
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, score: u64) -> bool {
        self.slot_for(score).is_some()
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.slot_for(score).map(|slot| slot + 1)
    }

    /// Insert a finished run; returns the rank achieved (1-indexed)
    pub fn add_score(&mut self, name: impl Into<String>, summary: &RunSummary) -> Option<usize> {
        let score = summary.final_score;
        let slot = self.slot_for(score)?;
        self.entries.insert(
            slot,
            LeaderboardEntry {
                name: name.into(),
                score,
                blocks: summary.final_blocks_passed,
            },
        );
        self.entries.truncate(MAX_ENTRIES);

        log::info!("Leaderboard: score {score} placed #{}", slot + 1);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse a stored list, re-sorting and trimming whatever was saved
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let mut board: Self = serde_json::from_str(json)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_ENTRIES);
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string(self)?)
    }
}
