//! Scoring: saves, combos, milestones and the shop threshold

use serde::{Deserialize, Serialize};

use super::difficulty;
use super::events::GameEvent;
use super::schedule::Effect;
use super::state::{GameState, ParticleKind, RunPhase, Ship};
use crate::consts::CRASH_PENALTY;

/// A save within this window of the previous one extends the combo
pub const COMBO_WINDOW_MS: f64 = 4000.0;
/// Combo decays to zero this long after the last save
pub const COMBO_TIMEOUT_MS: f32 = 3000.0;
pub const FIRST_SHOP_THRESHOLD: u64 = 150;
pub const SHOP_THRESHOLD_STEP: u64 = 150;
/// How long a milestone banner stays up
pub const MILESTONE_BANNER_MS: f64 = 3000.0;

const SAVE_SPARKLES: usize = 12;
const CRASH_DEBRIS: usize = 8;

/// What a milestone measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneTrigger {
    Score(u64),
    SurvivalSecs(u64),
    ShipsSaved(u64),
}

#[derive(Debug, Clone, Copy)]
pub struct Milestone {
    pub trigger: MilestoneTrigger,
    pub message: &'static str,
}

impl Milestone {
    /// Stable identity within a run, e.g. `score:100`
    pub fn key(&self) -> String {
        match self.trigger {
            MilestoneTrigger::Score(n) => format!("score:{n}"),
            MilestoneTrigger::SurvivalSecs(n) => format!("time:{n}"),
            MilestoneTrigger::ShipsSaved(n) => format!("ships:{n}"),
        }
    }

    pub fn reached(&self, state: &GameState) -> bool {
        match self.trigger {
            MilestoneTrigger::Score(n) => state.score >= n,
            MilestoneTrigger::SurvivalSecs(n) => state.survival_time_ms / 1000.0 >= n as f64,
            MilestoneTrigger::ShipsSaved(n) => state.ships_saved >= n,
        }
    }
}

pub const MILESTONES: [Milestone; 11] = [
    Milestone { trigger: MilestoneTrigger::Score(100), message: "Getting the hang of it!" },
    Milestone { trigger: MilestoneTrigger::Score(250), message: "Lighthouse master!" },
    Milestone { trigger: MilestoneTrigger::Score(500), message: "Storm survivor!" },
    Milestone { trigger: MilestoneTrigger::Score(1000), message: "Legendary keeper!" },
    Milestone { trigger: MilestoneTrigger::Score(2000), message: "Beacon of hope!" },
    Milestone { trigger: MilestoneTrigger::SurvivalSecs(120), message: "2 minutes survived!" },
    Milestone { trigger: MilestoneTrigger::SurvivalSecs(300), message: "5 minutes - incredible!" },
    Milestone { trigger: MilestoneTrigger::SurvivalSecs(600), message: "10 minutes - legendary!" },
    Milestone { trigger: MilestoneTrigger::ShipsSaved(25), message: "25 ships saved!" },
    Milestone { trigger: MilestoneTrigger::ShipsSaved(50), message: "50 ships saved!" },
    Milestone { trigger: MilestoneTrigger::ShipsSaved(100), message: "100 ships saved!" },
];

/// Register a save at the current sim time and return the new combo
pub fn register_save(state: &mut GameState) -> u32 {
    let now = state.game_time_ms;
    state.combo = match state.last_save_ms {
        Some(last) if now - last < COMBO_WINDOW_MS => state.combo + 1,
        _ => 1,
    };
    state.last_save_ms = Some(now);
    state.combo_timer_ms = COMBO_TIMEOUT_MS;
    state.peak_combo = state.peak_combo.max(state.combo);
    state.combo
}

/// Run down the combo timer; the combo drops to zero when it expires
pub fn tick_combo(state: &mut GameState, dt_ms: f32) {
    if state.combo_timer_ms > 0.0 {
        state.combo_timer_ms -= dt_ms;
        if state.combo_timer_ms <= 0.0 {
            state.combo = 0;
        }
    }
}

/// Points for saving `ship`, given the score before the save and the updated combo
pub fn save_points(ship: &Ship, score: u64, combo: u32) -> u64 {
    let mut points = ship.kind.archetype().points;
    if ship.storm_bonus {
        points *= 2;
    }
    let multiplier = difficulty::score_multiplier(score);
    if multiplier > 1.0 {
        points = (points as f64 * multiplier).floor() as u64;
    }
    if combo > 1 {
        points = (points as f64 * (1.0 + combo as f64 * 0.1)).floor() as u64;
    }
    points
}

/// Credit a save: combo, points, effects, then milestone and shop checks
pub fn record_save(state: &mut GameState, ship: &Ship) -> u64 {
    let combo = register_save(state);
    let points = save_points(ship, state.score, combo);
    state.score += points;
    state.ships_saved += 1;

    let at = ship.center();
    state.burst(at, ParticleKind::Sparkle, SAVE_SPARKLES);
    log::debug!(
        "Saved {} #{} for {} (combo {}, score {})",
        ship.kind.as_str(),
        ship.id,
        points,
        combo,
        state.score
    );
    state.emit(GameEvent::ShipSaved {
        ship_id: ship.id,
        kind: ship.kind,
        points,
        combo,
        at,
    });

    check_milestones(state);
    check_shop_threshold(state);

    if combo > 1 {
        state.emit(GameEvent::ComboChanged { combo });
    }
    points
}

/// Apply the penalty for a ship that got away
pub fn record_crash(state: &mut GameState, ship: &Ship) {
    state.score = state.score.saturating_sub(CRASH_PENALTY);
    let at = ship.center();
    state.burst(at, ParticleKind::Explosion, CRASH_DEBRIS);
    log::debug!("Lost {} #{} (score {})", ship.kind.as_str(), ship.id, state.score);
    state.emit(GameEvent::ShipCrashed {
        ship_id: ship.id,
        kind: ship.kind,
        at,
    });
}

/// Fire every milestone reached but not yet achieved this run, in table order
pub fn check_milestones(state: &mut GameState) {
    for milestone in &MILESTONES {
        let key = milestone.key();
        if state.achieved_milestones.contains(&key) || !milestone.reached(state) {
            continue;
        }
        state.achieved_milestones.insert(key.clone());
        log::info!("Milestone {}: {}", key, milestone.message);

        state.milestone_banner = Some(milestone.message.to_string());
        state.schedule.cancel(Effect::MilestoneBannerEnd);
        state.schedule.schedule(
            state.game_time_ms + MILESTONE_BANNER_MS,
            Effect::MilestoneBannerEnd,
        );
        state.emit(GameEvent::MilestoneReached {
            key,
            message: milestone.message.to_string(),
        });
    }
}

/// Open the shop once the score reaches the next threshold
pub fn check_shop_threshold(state: &mut GameState) -> bool {
    if state.phase != RunPhase::Playing || state.score < state.next_shop_threshold {
        return false;
    }
    state.phase = RunPhase::Shop;
    state.shop_visit_count += 1;
    state.next_shop_threshold += SHOP_THRESHOLD_STEP;
    log::info!(
        "Shop visit {} at score {} (next at {})",
        state.shop_visit_count,
        state.score,
        state.next_shop_threshold
    );
    state.emit(GameEvent::ShopEntered {
        visit: state.shop_visit_count,
        next_threshold: state.next_shop_threshold,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{ShipKind, ShipStatus};
    use glam::Vec2;

    fn ship(kind: ShipKind, storm_bonus: bool) -> Ship {
        Ship {
            id: 1,
            kind,
            pos: Vec2::new(380.0, 380.0),
            speed: 1.0,
            wobble: 0.0,
            status: ShipStatus::Saved,
            storm_bonus,
        }
    }

    fn playing() -> GameState {
        let mut state = GameState::new(3, &Settings::default());
        state.phase = RunPhase::Playing;
        state
    }

    #[test]
    fn test_combo_window() {
        let mut state = playing();
        state.game_time_ms = 10_000.0;
        assert_eq!(register_save(&mut state), 1);
        state.game_time_ms = 13_999.0;
        assert_eq!(register_save(&mut state), 2);
        // More than 4s since the previous save resets to one, not zero
        state.game_time_ms = 18_500.0;
        assert_eq!(register_save(&mut state), 1);
        assert_eq!(state.peak_combo, 2);
    }

    #[test]
    fn test_combo_timer_expiry_resets_to_zero() {
        let mut state = playing();
        register_save(&mut state);
        tick_combo(&mut state, 2999.0);
        assert_eq!(state.combo, 1);
        tick_combo(&mut state, 1.0);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_save_points() {
        assert_eq!(save_points(&ship(ShipKind::FishingBoat, false), 0, 1), 15);
        assert_eq!(save_points(&ship(ShipKind::CruiseShip, true), 0, 1), 100);
        // x1.5 score multiplier, then x1.3 combo: floor(floor(25*1.5)*1.3) = floor(37*1.3) = 48
        assert_eq!(save_points(&ship(ShipKind::CargoShip, false), 200, 3), 48);
    }

    #[test]
    fn test_record_save_updates_totals() {
        let mut state = playing();
        let points = record_save(&mut state, &ship(ShipKind::CargoShip, false));
        assert_eq!(points, 25);
        assert_eq!(state.score, 25);
        assert_eq!(state.ships_saved, 1);
        assert_eq!(state.combo, 1);
        assert!(matches!(state.events[0], GameEvent::ShipSaved { points: 25, .. }));
    }

    #[test]
    fn test_crash_penalty_clamps_at_zero() {
        let mut state = playing();
        state.score = 1;
        record_crash(&mut state, &ship(ShipKind::FishingBoat, false));
        assert_eq!(state.score, 0);
        record_crash(&mut state, &ship(ShipKind::FishingBoat, false));
        assert_eq!(state.score, 0);
        assert_eq!(state.events.len(), 2);
    }

    #[test]
    fn test_milestone_fires_once() {
        let mut state = playing();
        state.score = 150;
        check_milestones(&mut state);
        check_milestones(&mut state);
        check_milestones(&mut state);
        let fired: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::MilestoneReached { key, .. } if key == "score:100"))
            .collect();
        assert_eq!(fired.len(), 1);
        assert!(state.achieved_milestones.contains("score:100"));
        assert_eq!(state.milestone_banner.as_deref(), Some("Getting the hang of it!"));
    }

    #[test]
    fn test_milestones_fire_in_table_order() {
        let mut state = playing();
        state.score = 600;
        state.ships_saved = 30;
        check_milestones(&mut state);
        let keys: Vec<_> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::MilestoneReached { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(keys, ["score:100", "score:250", "score:500", "ships:25"]);
        // Only one banner expiry stays queued
        assert_eq!(state.schedule.len(), 1);
    }

    #[test]
    fn test_survival_milestone() {
        let mut state = playing();
        state.survival_time_ms = 121_000.0;
        check_milestones(&mut state);
        assert!(state.achieved_milestones.contains("time:120"));
        assert!(!state.achieved_milestones.contains("time:300"));
    }

    #[test]
    fn test_shop_threshold() {
        let mut state = playing();
        state.score = 149;
        assert!(!check_shop_threshold(&mut state));
        state.score = 150;
        assert!(check_shop_threshold(&mut state));
        assert_eq!(state.phase, RunPhase::Shop);
        assert_eq!(state.shop_visit_count, 1);
        assert_eq!(state.next_shop_threshold, 300);
        // Already in the shop: no double entry
        state.score = 400;
        assert!(!check_shop_threshold(&mut state));
        assert_eq!(state.shop_visit_count, 1);
    }
}
