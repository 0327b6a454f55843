//! Cross-run high scores
//!
//! A flat record of personal bests. Every field only ever grows. Stored as
//! camelCase JSON through a `HighScoreStore`.

use serde::{Deserialize, Serialize};

use crate::sim::events::RunSummary;

/// A category a finished run can set a new record in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    BestScore,
    LongestSurvival,
    MostShipsSaved,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::BestScore => "New best score!",
            RecordKind::LongestSurvival => "New survival record!",
            RecordKind::MostShipsSaved => "Most ships saved!",
        }
    }
}

/// Personal bests across every run on this machine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighScores {
    pub best_score: u64,
    /// Whole seconds
    pub longest_survival: u64,
    pub most_ships_saved: u64,
    pub highest_combo: u32,
    pub total_games_played: u64,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the combo record if `combo` beats it
    pub fn record_combo(&mut self, combo: u32) -> bool {
        if combo > self.highest_combo {
            self.highest_combo = combo;
            true
        } else {
            false
        }
    }

    pub fn record_game_started(&mut self) {
        self.total_games_played += 1;
    }

    /// Fold a finished run into the records.
    /// Returns the categories that improved, in display order.
    pub fn record_run(&mut self, summary: &RunSummary) -> Vec<RecordKind> {
        let mut records = Vec::new();

        if summary.score > self.best_score {
            self.best_score = summary.score;
            records.push(RecordKind::BestScore);
        }
        if summary.survival_secs > self.longest_survival {
            self.longest_survival = summary.survival_secs;
            records.push(RecordKind::LongestSurvival);
        }
        if summary.ships_saved > self.most_ships_saved {
            self.most_ships_saved = summary.ships_saved;
            records.push(RecordKind::MostShipsSaved);
        }
        self.record_combo(summary.peak_combo);

        if !records.is_empty() {
            log::info!(
                "New records: {}",
                records.iter().map(|r| r.label()).collect::<Vec<_>>().join(" ")
            );
        }
        records
    }
}
