//! Game state and core simulation types
//!
//! One `GameState` holds everything a run mutates. The tick is its only writer.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::schedule::Schedule;
use crate::consts::*;
use crate::frame_scale;
use crate::settings::Settings;

/// Top-level run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Before the first run, or after quitting a run
    Title,
    /// Active gameplay
    Playing,
    /// Simulation frozen by the player
    Paused,
    /// Simulation frozen while the upgrade shop is open
    Shop,
    /// Run ended (fuel ran out)
    GameOver,
}

/// Ship archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    FishingBoat,
    CargoShip,
    CruiseShip,
}

/// Static description of a ship archetype
#[derive(Debug, Clone, Copy)]
pub struct ShipArchetype {
    pub name: &'static str,
    pub points: u64,
    /// Pixels per reference frame before difficulty scaling
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// Base weight for the spawn draw
    pub spawn_weight: f64,
}

const FISHING_BOAT: ShipArchetype = ShipArchetype {
    name: "fishing_boat",
    points: 15,
    speed: 2.5,
    width: 25.0,
    height: 15.0,
    spawn_weight: 0.5,
};

const CARGO_SHIP: ShipArchetype = ShipArchetype {
    name: "cargo_ship",
    points: 25,
    speed: 2.0,
    width: 35.0,
    height: 20.0,
    spawn_weight: 0.3,
};

const CRUISE_SHIP: ShipArchetype = ShipArchetype {
    name: "cruise_ship",
    points: 50,
    speed: 1.5,
    width: 50.0,
    height: 25.0,
    spawn_weight: 0.2,
};

impl ShipKind {
    /// All archetypes in draw order
    pub const ALL: [ShipKind; 3] = [
        ShipKind::FishingBoat,
        ShipKind::CargoShip,
        ShipKind::CruiseShip,
    ];

    pub fn archetype(&self) -> &'static ShipArchetype {
        match self {
            ShipKind::FishingBoat => &FISHING_BOAT,
            ShipKind::CargoShip => &CARGO_SHIP,
            ShipKind::CruiseShip => &CRUISE_SHIP,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.archetype().name
    }
}

/// Where a ship is in its lifecycle. Saved and Crashed are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipStatus {
    Sailing,
    Saved,
    Crashed,
}

/// A ship crossing the bay from right to left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: u32,
    pub kind: ShipKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per reference frame, fixed at spawn
    pub speed: f32,
    /// Phase of the vertical bobbing
    pub wobble: f32,
    pub status: ShipStatus,
    /// Spawned during a storm: faster, worth double
    pub storm_bonus: bool,
}

impl Ship {
    pub fn width(&self) -> f32 {
        self.kind.archetype().width
    }

    pub fn height(&self) -> f32 {
        self.kind.archetype().height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width() / 2.0, self.height() / 2.0)
    }

    pub fn is_saved(&self) -> bool {
        self.status == ShipStatus::Saved
    }

    pub fn is_crashed(&self) -> bool {
        self.status == ShipStatus::Crashed
    }

    /// Fully past the left edge of the play area
    pub fn is_off_left(&self) -> bool {
        self.pos.x + self.width() < 0.0
    }

    /// Move left and bob on the swell
    pub fn advance(&mut self, dt_ms: f32) {
        let scale = frame_scale(dt_ms);
        self.wobble += 0.05 * scale;
        self.pos.x -= self.speed * scale;
        self.pos.y += self.wobble.sin() * 0.5 * scale;
    }

    /// Value shown by the ship scanner: storm and difficulty bonuses, no combo
    pub fn displayed_points(&self, score: u64) -> u64 {
        let mut points = self.kind.archetype().points;
        if self.storm_bonus {
            points *= 2;
        }
        let multiplier = super::difficulty::score_multiplier(score);
        if multiplier > 1.0 {
            points = (points as f64 * multiplier).floor() as u64;
        }
        points
    }
}

/// Particle look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Gold star burst when a ship is saved
    Sparkle,
    /// Red debris when a ship runs aground
    Explosion,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub life: f32, // 0-1, decreases over time
    pub decay: f32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Step the particle; returns false once it has faded out
    pub fn update(&mut self, dt_ms: f32) -> bool {
        let scale = frame_scale(dt_ms);
        self.pos += self.vel * scale;
        self.vel.y += 0.1 * scale; // gravity
        self.life -= self.decay * scale;
        self.life > 0.0
    }
}

/// Beam origin and shape
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lighthouse {
    pub apex: Vec2,
    /// Full aperture of the beam (radians)
    pub aperture: f32,
    pub base_range: f32,
}

impl Lighthouse {
    pub fn half_angle(&self) -> f32 {
        self.aperture / 2.0
    }
}

impl Default for Lighthouse {
    fn default() -> Self {
        Self {
            apex: Vec2::new(LIGHTHOUSE_X, LIGHTHOUSE_Y),
            aperture: BEAM_APERTURE,
            base_range: BEAM_BASE_RANGE,
        }
    }
}

/// Effects bought in the shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upgrades {
    pub fuel_efficiency_multiplier: f32,
    pub range_multiplier: f32,
    pub has_scanner: bool,
    pub has_auto_beacon: bool,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            fuel_efficiency_multiplier: 1.0,
            range_multiplier: 1.0,
            has_scanner: false,
            has_auto_beacon: false,
        }
    }
}

/// Storm timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storm {
    pub active: bool,
    /// Remaining duration of the current storm
    pub timer_ms: f32,
    /// Time until the next storm may roll
    pub cooldown_ms: f32,
}

impl Default for Storm {
    fn default() -> Self {
        Self {
            active: false,
            timer_ms: 0.0,
            cooldown_ms: super::storm::INITIAL_COOLDOWN_MS,
        }
    }
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub phase: RunPhase,

    pub score: u64,
    pub ships_saved: u64,
    pub combo: u32,
    pub combo_timer_ms: f32,
    /// Sim time of the previous save, if any this run
    pub last_save_ms: Option<f64>,
    /// Best combo reached this run
    pub peak_combo: u32,

    pub fuel: f32,
    pub max_fuel: f32,
    /// Player is holding the light (and has fuel for it)
    pub player_light: bool,
    /// Effective beam state: player input or an auto-beacon pulse
    pub is_light_on: bool,
    pub beacon_active: bool,
    pub beacon_timer_ms: f32,
    pub fuel_warning_timer_ms: f32,

    /// Simulation time, frozen outside of Playing
    pub game_time_ms: f64,
    /// Wall time since the run started
    pub survival_time_ms: f64,
    pub last_spawn_ms: f64,

    /// Active ships (sorted by id for determinism)
    pub ships: Vec<Ship>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub max_particles: usize,

    pub storm: Storm,
    pub storm_overlay: bool,
    pub milestone_banner: Option<String>,

    pub shop_visit_count: u32,
    pub next_shop_threshold: u64,
    /// Units bought per shop item, indexed by `ShopItemId::index`
    pub owned: [u32; super::shop::SHOP_ITEM_COUNT],
    pub upgrades: Upgrades,
    pub achieved_milestones: BTreeSet<String>,

    pub lighthouse: Lighthouse,
    pub arena: Vec2,

    pub schedule: Schedule,
    /// Events raised since the driver last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run context in the Title phase
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RunPhase::Title,
            score: 0,
            ships_saved: 0,
            combo: 0,
            combo_timer_ms: 0.0,
            last_save_ms: None,
            peak_combo: 0,
            fuel: BASE_MAX_FUEL,
            max_fuel: BASE_MAX_FUEL,
            player_light: false,
            is_light_on: false,
            beacon_active: false,
            beacon_timer_ms: 0.0,
            fuel_warning_timer_ms: 0.0,
            game_time_ms: 0.0,
            survival_time_ms: 0.0,
            last_spawn_ms: 0.0,
            ships: Vec::new(),
            particles: Vec::new(),
            max_particles: if settings.particles {
                settings.max_particles
            } else {
                0
            },
            storm: Storm::default(),
            storm_overlay: false,
            milestone_banner: None,
            shop_visit_count: 0,
            next_shop_threshold: super::scoring::FIRST_SHOP_THRESHOLD,
            owned: [0; super::shop::SHOP_ITEM_COUNT],
            upgrades: Upgrades::default(),
            achieved_milestones: BTreeSet::new(),
            lighthouse: Lighthouse {
                apex: Vec2::new(settings.lighthouse_x, settings.lighthouse_y),
                aperture: settings.beam_aperture,
                base_range: settings.beam_range,
            },
            arena: Vec2::new(settings.arena_width, settings.arena_height),
            schedule: Schedule::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Reach of the beam including range upgrades
    pub fn effective_range(&self) -> f32 {
        self.lighthouse.base_range * self.upgrades.range_multiplier
    }

    pub fn survival_secs(&self) -> u64 {
        (self.survival_time_ms / 1000.0).floor() as u64
    }

    pub fn difficulty_level(&self) -> u32 {
        super::difficulty::difficulty_level(self.score)
    }

    /// Emit `count` particles at `center`, respecting the particle cap
    pub fn burst(&mut self, center: Vec2, kind: ParticleKind, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let mut vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 6.0,
                -self.rng.random::<f32>() * 4.0 - 2.0,
            );
            if kind == ParticleKind::Explosion {
                vel.x *= 1.5;
                vel.y *= 0.5;
            }
            let decay = 0.02 + self.rng.random::<f32>() * 0.02;
            let size = 2.0 + self.rng.random::<f32>() * 3.0;
            self.particles.push(Particle {
                pos: center,
                vel,
                life: 1.0,
                decay,
                size,
                kind,
            });
        }
    }

    /// Ensure ships are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.ships.sort_by_key(|s| s.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, &Settings::default());
        assert_eq!(state.phase, RunPhase::Title);
        assert_eq!(state.fuel, 100.0);
        assert_eq!(state.max_fuel, 100.0);
        assert_eq!(state.next_shop_threshold, 150);
        assert_eq!(state.storm.cooldown_ms, 30_000.0);
        assert!(state.ships.is_empty());
        assert_eq!(state.lighthouse.apex, Vec2::new(400.0, 550.0));
    }

    #[test]
    fn test_ship_advance_moves_left() {
        let mut ship = Ship {
            id: 1,
            kind: ShipKind::CargoShip,
            pos: Vec2::new(500.0, 200.0),
            speed: 2.0,
            wobble: 0.0,
            status: ShipStatus::Sailing,
            storm_bonus: false,
        };
        ship.advance(REFERENCE_FRAME_MS);
        assert!((ship.pos.x - 498.0).abs() < 1e-4);
        assert!((ship.wobble - 0.05).abs() < 1e-6);
        assert!((ship.center().x - (498.0 + 17.5)).abs() < 1e-4);
    }

    #[test]
    fn test_displayed_points() {
        let mut ship = Ship {
            id: 1,
            kind: ShipKind::FishingBoat,
            pos: Vec2::ZERO,
            speed: 2.5,
            wobble: 0.0,
            status: ShipStatus::Sailing,
            storm_bonus: false,
        };
        assert_eq!(ship.displayed_points(0), 15);
        ship.storm_bonus = true;
        assert_eq!(ship.displayed_points(0), 30);
        // x1.5 at 200+
        assert_eq!(ship.displayed_points(250), 45);
    }

    #[test]
    fn test_burst_respects_cap() {
        let mut state = GameState::new(1, &Settings::default());
        state.max_particles = 10;
        state.burst(Vec2::ZERO, ParticleKind::Sparkle, 12);
        assert_eq!(state.particles.len(), 10);
        state.burst(Vec2::ZERO, ParticleKind::Explosion, 8);
        assert_eq!(state.particles.len(), 10);
    }

    #[test]
    fn test_particles_fade_out() {
        let mut state = GameState::new(3, &Settings::default());
        state.burst(Vec2::new(10.0, 10.0), ParticleKind::Explosion, 8);
        for _ in 0..60 {
            state.particles.retain_mut(|p| p.update(REFERENCE_FRAME_MS));
        }
        assert!(state.particles.is_empty());
    }
}
