//! Last Light - A lighthouse keeper arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ships, light cone, scoring, fuel, storms)
//! - `game`: Frame driver that owns a run and feeds fixed ticks into `sim`
//! - `highscores`: Cross-run records
//! - `persistence`: Injected high-score storage
//! - `settings`: Arena, lighthouse and timestep configuration

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::{FrameInput, Game};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const SIM_HZ: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Per-frame tuning values are expressed against a 60 fps frame (ms)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Play area dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Ships spawn in a band that keeps clear of the sky and the shore
    pub const SPAWN_BAND_TOP: f32 = 100.0;
    pub const SPAWN_BAND_MARGIN: f32 = 220.0;

    /// Lighthouse apex (origin of the beam)
    pub const LIGHTHOUSE_X: f32 = 400.0;
    pub const LIGHTHOUSE_Y: f32 = 550.0;
    /// Full beam aperture (radians); the cone test uses half of it
    pub const BEAM_APERTURE: f32 = std::f32::consts::FRAC_PI_3;
    /// Beam reach before range upgrades
    pub const BEAM_BASE_RANGE: f32 = 280.0;

    /// Fuel
    pub const BASE_MAX_FUEL: f32 = 100.0;
    /// Fuel burned per reference frame with the light on
    pub const BASE_FUEL_DRAIN: f32 = 0.25;
    /// Warn when fuel falls to this fraction of capacity
    pub const FUEL_WARNING_FRACTION: f32 = 0.10;
    pub const FUEL_WARNING_INTERVAL_MS: f32 = 2000.0;

    /// Points lost when a ship runs aground
    pub const CRASH_PENALTY: u64 = 2;

    /// Particle cap
    pub const MAX_PARTICLES: usize = 512;
}

/// Scale factor converting a per-frame tuning value to a `dt_ms` step
#[inline]
pub fn frame_scale(dt_ms: f32) -> f32 {
    dt_ms / consts::REFERENCE_FRAME_MS
}
