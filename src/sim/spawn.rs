//! Ship spawning
//!
//! Picks an archetype by weighted draw and launches it from the right edge.

use glam::Vec2;
use rand::Rng;

use super::difficulty;
use super::state::{GameState, ShipKind, Ship, ShipStatus};
use super::storm::STORM_SPEED_BOOST;
use crate::consts::{SPAWN_BAND_MARGIN, SPAWN_BAND_TOP};

/// Spawn weights for each archetype at `score` (not normalized)
pub fn spawn_weights(score: u64) -> [f64; 3] {
    ShipKind::ALL.map(|kind| {
        let mut weight = kind.archetype().spawn_weight;
        if kind == ShipKind::CargoShip && score > 200 {
            weight += 0.1;
        }
        if kind == ShipKind::CruiseShip && score > 500 {
            weight += 0.2;
        }
        weight
    })
}

/// Cumulative-weight draw; `roll` is uniform in [0, total weight)
pub fn pick_kind(weights: &[f64; 3], roll: f64) -> ShipKind {
    let mut cumulative = 0.0;
    for (kind, weight) in ShipKind::ALL.iter().zip(weights) {
        cumulative += weight;
        if roll <= cumulative {
            return *kind;
        }
    }
    ShipKind::ALL[0]
}

/// Put a ship of `kind` at `pos`, applying the current speed scaling and storm
pub fn place_ship(state: &mut GameState, kind: ShipKind, pos: Vec2) -> u32 {
    let mut speed = kind.archetype().speed * difficulty::speed_multiplier(state.score) as f32;
    let storm_bonus = state.storm.active;
    if storm_bonus {
        speed *= STORM_SPEED_BOOST;
    }
    let id = state.next_entity_id();
    let wobble = state.rng.random_range(0.0..std::f32::consts::TAU);
    state.ships.push(Ship {
        id,
        kind,
        pos,
        speed,
        wobble,
        status: ShipStatus::Sailing,
        storm_bonus,
    });
    id
}

/// Draw an archetype and launch it just past the right edge
pub fn spawn_ship(state: &mut GameState) -> u32 {
    let weights = spawn_weights(state.score);
    let total: f64 = weights.iter().sum();
    let roll = state.rng.random::<f64>() * total;
    let kind = pick_kind(&weights, roll);

    let band = (state.arena.y - SPAWN_BAND_MARGIN).max(0.0);
    let x = state.arena.x + kind.archetype().width;
    let y = state.rng.random::<f32>() * band + SPAWN_BAND_TOP;
    let id = place_ship(state, kind, Vec2::new(x, y));
    log::debug!("Spawned {} #{} at y={:.0}", kind.as_str(), id, y);
    id
}

/// Spawn when the interval for the current score has elapsed
pub fn maybe_spawn(state: &mut GameState) -> bool {
    let rate = difficulty::spawn_rate_ms(state.score);
    if state.game_time_ms - state.last_spawn_ms > rate {
        spawn_ship(state);
        state.last_spawn_ms = state.game_time_ms;
        true
    } else {
        false
    }
}
