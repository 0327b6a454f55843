//! Fuel economy and the auto-beacon
//!
//! Fuel burns only while the beam is on. Running dry ends the run.

use super::difficulty;
use super::events::GameEvent;
use super::schedule::Effect;
use super::state::GameState;
use crate::consts::{BASE_FUEL_DRAIN, FUEL_WARNING_FRACTION, FUEL_WARNING_INTERVAL_MS};
use crate::frame_scale;

/// Auto-beacon pulse period
pub const BEACON_INTERVAL_MS: f32 = 10_000.0;
/// Auto-beacon pulse length
pub const BEACON_PULSE_MS: f64 = 800.0;

/// Fuel burned per reference frame at the current score and upgrades
pub fn drain_per_frame(state: &GameState) -> f32 {
    BASE_FUEL_DRAIN
        * state.upgrades.fuel_efficiency_multiplier
        * difficulty::fuel_consumption_multiplier(state.score) as f32
}

/// Burn fuel for a `dt_ms` step. Returns true if the tank ran dry, in which
/// case the beam is already forced off.
pub fn burn(state: &mut GameState, dt_ms: f32) -> bool {
    if !state.is_light_on || state.fuel <= 0.0 {
        return false;
    }
    state.fuel -= drain_per_frame(state) * frame_scale(dt_ms);
    if state.fuel <= 0.0 {
        state.fuel = 0.0;
        state.is_light_on = false;
        state.player_light = false;
        state.beacon_active = false;
        return true;
    }
    false
}

/// Add fuel, never past capacity
pub fn refill(state: &mut GameState, amount: f32) {
    state.fuel = (state.fuel + amount).clamp(0.0, state.max_fuel);
}

/// Resolve the beam from player input and any beacon pulse.
///
/// The player's light only lights with fuel in the tank. Returns true when
/// the player has just switched it on.
pub fn resolve_light(state: &mut GameState, light_input: bool) -> bool {
    let was_on = state.player_light;
    state.player_light = light_input && state.fuel > 0.0;
    state.is_light_on = (state.player_light || state.beacon_active) && state.fuel > 0.0;
    let switched_on = state.player_light && !was_on;
    if switched_on {
        state.emit(GameEvent::LightOn);
    }
    switched_on
}

/// Count toward the next auto-beacon pulse and start it when due.
///
/// The pulse ends through the schedule, after which `resolve_light` falls back
/// to whatever the player is holding at that moment.
pub fn tick_auto_beacon(state: &mut GameState, dt_ms: f32) {
    if !state.upgrades.has_auto_beacon {
        return;
    }
    state.beacon_timer_ms += dt_ms;
    if state.beacon_timer_ms >= BEACON_INTERVAL_MS {
        state.beacon_timer_ms = 0.0;
        state.beacon_active = true;
        state.schedule.cancel(Effect::BeaconRestore);
        state
            .schedule
            .schedule(state.game_time_ms + BEACON_PULSE_MS, Effect::BeaconRestore);
        log::debug!("Auto-beacon pulse at {:.0}ms", state.game_time_ms);
    }
}

/// Count down the warning cooldown and warn when the tank is nearly empty
pub fn tick_fuel_warning(state: &mut GameState, dt_ms: f32) {
    if state.fuel_warning_timer_ms > 0.0 {
        state.fuel_warning_timer_ms -= dt_ms;
    }
    let low = state.fuel <= state.max_fuel * FUEL_WARNING_FRACTION;
    if low && state.fuel_warning_timer_ms <= 0.0 {
        state.fuel_warning_timer_ms = FUEL_WARNING_INTERVAL_MS;
        state.emit(GameEvent::FuelLow { fuel: state.fuel });
    }
}
