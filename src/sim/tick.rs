//! Fixed timestep simulation tick
//!
//! Core game loop that advances one run deterministically.

use super::collision::ship_illuminated;
use super::events::{GameEvent, RunSummary};
use super::schedule::Effect;
use super::state::{GameState, RunPhase, ShipStatus};
use super::{fuel, scoring, spawn, storm};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player is holding the light (mouse/space)
    pub light: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Toggle between Playing and Paused. Other phases ignore the request.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        RunPhase::Playing => {
            state.phase = RunPhase::Paused;
            log::info!("Paused at {:.0}ms", state.game_time_ms);
        }
        RunPhase::Paused => {
            state.phase = RunPhase::Playing;
            log::info!("Resumed");
        }
        _ => {}
    }
}

/// Leave the shop with every ship and particle as it was
pub fn exit_shop(state: &mut GameState) -> bool {
    if state.phase != RunPhase::Shop {
        return false;
    }
    state.phase = RunPhase::Playing;
    log::info!("Back to sea (next shop at {})", state.next_shop_threshold);
    true
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    // Handle pause toggle
    if input.pause {
        toggle_pause(state);
    }

    // Only Playing advances; every timer is frozen otherwise
    if state.phase != RunPhase::Playing {
        return;
    }

    state.game_time_ms += dt_ms as f64;

    for effect in state.schedule.pop_due(state.game_time_ms) {
        apply_effect(state, effect);
    }

    scoring::tick_combo(state, dt_ms);
    fuel::tick_auto_beacon(state, dt_ms);
    fuel::resolve_light(state, input.light);

    storm::update(state, dt_ms);

    if fuel::burn(state, dt_ms) {
        end_run(state);
        return;
    }
    fuel::tick_fuel_warning(state, dt_ms);

    spawn::maybe_spawn(state);
    update_ships(state, dt_ms);

    state.particles.retain_mut(|p| p.update(dt_ms));

    // Ensure deterministic ordering
    state.normalize_order();
}

fn apply_effect(state: &mut GameState, effect: Effect) {
    match effect {
        Effect::BeaconRestore => {
            // Light falls back to the player's input when it is next resolved
            state.beacon_active = false;
        }
        Effect::StormOverlayEnd => state.storm_overlay = false,
        Effect::MilestoneBannerEnd => state.milestone_banner = None,
    }
}

/// Move every ship, then settle crashes and saves in spawn order
fn update_ships(state: &mut GameState, dt_ms: f32) {
    let mut ships = std::mem::take(&mut state.ships);

    ships.retain_mut(|ship| {
        ship.advance(dt_ms);

        if ship.is_off_left() {
            if ship.status == ShipStatus::Sailing {
                ship.status = ShipStatus::Crashed;
                scoring::record_crash(state, ship);
            }
            return false;
        }

        if state.is_light_on
            && ship.status == ShipStatus::Sailing
            && ship_illuminated(ship, &state.lighthouse, state.upgrades.range_multiplier)
        {
            ship.status = ShipStatus::Saved;
            scoring::record_save(state, ship);
        }
        true
    });

    state.ships = ships;
}

/// Fuel is gone: close the run and report it
pub fn end_run(state: &mut GameState) {
    state.phase = RunPhase::GameOver;
    state.is_light_on = false;
    state.player_light = false;
    state.beacon_active = false;

    let summary = RunSummary {
        score: state.score,
        ships_saved: state.ships_saved,
        survival_secs: state.survival_secs(),
        difficulty_level: state.difficulty_level(),
        peak_combo: state.peak_combo,
        new_records: Vec::new(),
    };
    log::info!(
        "Game over: score {}, {} ships saved, {}s survived",
        summary.score,
        summary.ships_saved,
        summary.survival_secs
    );
    state.emit(GameEvent::GameOver(summary));
}
