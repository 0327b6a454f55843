//! Frame driver
//!
//! Owns the current run, the settings and the high-score record, and turns
//! variable frame deltas into fixed simulation ticks. This is the surface a
//! renderer, audio layer or UI talks to.

use crate::highscores::HighScores;
use crate::persistence::{self, HighScoreStore};
use crate::settings::Settings;
use crate::sim::events::GameEvent;
use crate::sim::shop::{self, ShopListing};
use crate::sim::state::{GameState, RunPhase};
use crate::sim::tick::{self, TickInput};

/// Longest frame the driver will simulate; anything beyond is dropped
const MAX_FRAME_MS: f32 = 100.0;

/// Logical input for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Light button held (mouse or space)
    pub light_on: bool,
    /// Pause key pressed this frame
    pub pause_requested: bool,
}

/// Game instance holding all state
pub struct Game<S: HighScoreStore> {
    settings: Settings,
    store: S,
    high_scores: HighScores,
    state: GameState,
    accumulator_ms: f32,
    /// Events drained from the sim, waiting for collaborators
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore> Game<S> {
    /// Load the high-score record and sit on the title screen
    pub fn new(settings: Settings, mut store: S) -> Self {
        let high_scores = persistence::load_or_default(&mut store);
        let seed = Self::pick_seed(&settings);
        let state = GameState::new(seed, &settings);
        Self {
            settings,
            store,
            high_scores,
            state,
            accumulator_ms: 0.0,
            events: Vec::new(),
        }
    }

    fn pick_seed(settings: &Settings) -> u64 {
        settings.seed.unwrap_or_else(rand::random)
    }

    /// Begin a fresh run from the title, a paused run or a finished one
    pub fn start_run(&mut self) -> bool {
        if !matches!(
            self.state.phase,
            RunPhase::Title | RunPhase::Paused | RunPhase::GameOver
        ) {
            return false;
        }
        let seed = Self::pick_seed(&self.settings);
        self.state = GameState::new(seed, &self.settings);
        self.state.phase = RunPhase::Playing;
        self.accumulator_ms = 0.0;
        self.high_scores.record_game_started();
        log::info!(
            "Run {} started with seed {}",
            self.high_scores.total_games_played,
            seed
        );
        true
    }

    /// Advance by one rendered frame of `delta_ms` wall time
    pub fn advance(&mut self, delta_ms: f32, input: FrameInput) {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };

        if matches!(
            self.state.phase,
            RunPhase::Playing | RunPhase::Paused | RunPhase::Shop
        ) {
            self.state.survival_time_ms += delta_ms as f64;
        }

        if input.pause_requested {
            tick::toggle_pause(&mut self.state);
        }

        if self.state.phase == RunPhase::Playing {
            self.run_ticks(delta_ms, input.light_on);
        } else {
            self.accumulator_ms = 0.0;
        }

        self.collect_events();
    }

    fn run_ticks(&mut self, delta_ms: f32, light_on: bool) {
        let step = self.settings.step_ms();
        self.accumulator_ms += delta_ms.min(MAX_FRAME_MS);

        let input = TickInput {
            light: light_on,
            pause: false,
        };
        let mut substeps = 0;
        while self.accumulator_ms >= step && substeps < self.settings.max_substeps {
            tick::tick(&mut self.state, &input, step);
            self.accumulator_ms -= step;
            substeps += 1;

            if self.state.phase != RunPhase::Playing {
                self.accumulator_ms = 0.0;
                break;
            }
        }

        // Drop whatever backlog the substep cap left behind
        if self.accumulator_ms >= step {
            self.accumulator_ms = 0.0;
        }
    }

    /// Move sim events out, finishing the run when one of them is GameOver
    fn collect_events(&mut self) {
        if self.high_scores.record_combo(self.state.peak_combo) {
            log::debug!("Combo record now {}", self.high_scores.highest_combo);
        }

        let drained: Vec<GameEvent> = self.state.events.drain(..).collect();
        for mut event in drained {
            if let GameEvent::GameOver(summary) = &mut event {
                summary.new_records = self.high_scores.record_run(summary);
                self.persist();
            }
            self.events.push(event);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.high_scores) {
            log::warn!("High scores not saved: {e}");
        }
    }

    /// Buy a shop item by id; false when refused
    pub fn purchase(&mut self, item_id: &str) -> bool {
        shop::purchase(&mut self.state, item_id)
    }

    /// Close the shop and resume the run
    pub fn exit_shop(&mut self) -> bool {
        tick::exit_shop(&mut self.state)
    }

    /// Back to the title screen. A paused run is abandoned without records.
    pub fn go_to_title(&mut self) -> bool {
        match self.state.phase {
            RunPhase::Paused => {
                log::info!("Run abandoned at score {}", self.state.score);
            }
            RunPhase::GameOver => {}
            _ => return false,
        }
        self.state.phase = RunPhase::Title;
        self.accumulator_ms = 0.0;
        true
    }

    /// Read-only view of the current run
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Hand over every event raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rows for the shop screen; empty unless the shop is open
    pub fn shop_listing(&self) -> Vec<ShopListing> {
        if self.state.phase == RunPhase::Shop {
            shop::listing(&self.state)
        } else {
            Vec::new()
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
