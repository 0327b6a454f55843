//! Events emitted by the simulation for audio, UI and persistence collaborators.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::ShipKind;
use crate::highscores::RecordKind;

/// Side effects raised during a tick, drained by the driver once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Player switched the beam on.
    LightOn,
    /// A ship entered the beam and was guided home.
    ShipSaved {
        ship_id: u32,
        kind: ShipKind,
        points: u64,
        combo: u32,
        at: Vec2,
    },
    /// A ship left the screen unsaved.
    ShipCrashed { ship_id: u32, kind: ShipKind, at: Vec2 },
    /// Consecutive saves built a combo of two or more.
    ComboChanged { combo: u32 },
    /// One-time milestone reached this run.
    MilestoneReached { key: String, message: String },
    StormStarted { duration_ms: f32 },
    StormEnded,
    /// Score crossed the shop threshold; the shop is open.
    ShopEntered { visit: u32, next_threshold: u64 },
    /// Fuel is nearly exhausted.
    FuelLow { fuel: f32 },
    GameOver(RunSummary),
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub ships_saved: u64,
    pub survival_secs: u64,
    pub difficulty_level: u32,
    pub peak_combo: u32,
    /// High-score categories this run improved, filled in when records are compared
    pub new_records: Vec<RecordKind>,
}

impl RunSummary {
    /// Closing line for the game-over screen
    pub fn epitaph(&self) -> &'static str {
        if self.survival_secs >= 600 {
            "Legendary performance! You survived the endless storm and saved countless souls."
        } else if self.survival_secs >= 300 {
            "Incredible endurance! Your beacon shone bright through the darkest hours."
        } else if self.survival_secs >= 120 {
            "Admirable dedication! Many ships found safety thanks to your sacrifice."
        } else if self.ships_saved >= 50 {
            "Your quick thinking saved many lives in your short time as keeper."
        } else if self.ships_saved >= 10 {
            "Every ship saved matters. Your sacrifice was not in vain."
        } else {
            "The storm was fierce, but even the briefest light can guide lost souls to safety."
        }
    }
}
