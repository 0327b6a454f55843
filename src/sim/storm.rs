//! Storm events
//!
//! Storms roll a small hazard each tick once the cooldown has elapsed. While a
//! storm is active, newly spawned ships are faster and worth double.

use rand::Rng;

use super::difficulty;
use super::events::GameEvent;
use super::schedule::Effect;
use super::state::GameState;
use crate::frame_scale;

/// Cooldown before the first storm of a run may roll
pub const INITIAL_COOLDOWN_MS: f32 = 30_000.0;
/// Storm chance per reference frame at score 0
pub const BASE_CHANCE: f64 = 0.0001;
pub const MIN_DURATION_MS: f32 = 12_000.0;
pub const MAX_DURATION_MS: f32 = 20_000.0;
/// Speed multiplier baked into ships spawned during a storm
pub const STORM_SPEED_BOOST: f32 = 1.3;
/// How long the storm warning overlay stays up
pub const OVERLAY_MS: f64 = 4000.0;

/// Probability that a storm starts during a `dt_ms` step
pub fn storm_chance(score: u64, dt_ms: f32) -> f64 {
    let per_frame = BASE_CHANCE * (1.0 + score as f64 / 1000.0);
    (per_frame * frame_scale(dt_ms) as f64).clamp(0.0, 1.0)
}

/// Begin a storm now
pub fn start(state: &mut GameState) {
    let duration = state.rng.random_range(MIN_DURATION_MS..MAX_DURATION_MS);
    state.storm.active = true;
    state.storm.timer_ms = duration;
    state.storm.cooldown_ms = (difficulty::storm_frequency_secs(state.score) * 1000.0) as f32;

    state.storm_overlay = true;
    state.schedule.cancel(Effect::StormOverlayEnd);
    state
        .schedule
        .schedule(state.game_time_ms + OVERLAY_MS, Effect::StormOverlayEnd);

    log::info!(
        "Storm rolling in for {:.1}s (score {})",
        duration / 1000.0,
        state.score
    );
    state.emit(GameEvent::StormStarted {
        duration_ms: duration,
    });
}

/// Roll for a new storm, then run down the storm and cooldown timers
pub fn update(state: &mut GameState, dt_ms: f32) {
    if !state.storm.active && state.storm.cooldown_ms <= 0.0 {
        let roll = state.rng.random::<f64>();
        if roll < storm_chance(state.score, dt_ms) {
            start(state);
        }
    }

    if state.storm.active {
        state.storm.timer_ms -= dt_ms;
        if state.storm.timer_ms <= 0.0 {
            state.storm.active = false;
            state.storm.timer_ms = 0.0;
            log::info!("Storm passed");
            state.emit(GameEvent::StormEnded);
        }
    }

    if state.storm.cooldown_ms > 0.0 {
        state.storm.cooldown_ms -= dt_ms;
    }
}
