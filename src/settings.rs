//! Game settings
//!
//! Arena geometry, beam shape and timestep. Loaded from an optional JSON
//! file; anything missing takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Lighthouse ===
    pub lighthouse_x: f32,
    pub lighthouse_y: f32,
    /// Full beam aperture (radians)
    pub beam_aperture: f32,
    pub beam_range: f32,

    // === Timestep ===
    /// Fixed simulation ticks per second
    pub sim_hz: f32,
    /// Most ticks run for a single frame; any further backlog is dropped
    pub max_substeps: u32,

    // === Effects ===
    pub particles: bool,
    pub max_particles: usize,
    /// Passed through for the audio layer
    pub sound_enabled: bool,

    /// Fixed run seed; a random one is picked when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            lighthouse_x: LIGHTHOUSE_X,
            lighthouse_y: LIGHTHOUSE_Y,
            beam_aperture: BEAM_APERTURE,
            beam_range: BEAM_BASE_RANGE,

            sim_hz: SIM_HZ,
            max_substeps: MAX_SUBSTEPS,

            particles: true,
            max_particles: MAX_PARTICLES,
            sound_enabled: true,

            seed: None,
        }
    }
}

impl Settings {
    /// Length of one simulation tick
    pub fn step_ms(&self) -> f32 {
        1000.0 / self.sim_hz
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        if !(self.arena_width > 0.0) {
            return invalid("arena_width", "must be positive");
        }
        if !(self.arena_height > 0.0) {
            return invalid("arena_height", "must be positive");
        }
        if !(0.0..=self.arena_width).contains(&self.lighthouse_x) {
            return invalid("lighthouse_x", "must be inside the arena");
        }
        if !(0.0..=self.arena_height).contains(&self.lighthouse_y) {
            return invalid("lighthouse_y", "must be inside the arena");
        }
        if !(self.beam_aperture > 0.0 && self.beam_aperture < std::f32::consts::PI) {
            return invalid("beam_aperture", "must be between 0 and pi");
        }
        if !(self.beam_range > 0.0) {
            return invalid("beam_range", "must be positive");
        }
        if !(self.sim_hz > 0.0) {
            return invalid("sim_hz", "must be positive");
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps", "must be at least 1");
        }
        Ok(())
    }

    /// Read and validate settings from `path`
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, using defaults when missing or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.step_ms() - REFERENCE_FRAME_MS).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 7, "sim_hz": 120}"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.sim_hz, 120.0);
        assert_eq!(settings.arena_width, 800.0);
        assert!(settings.particles);
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let bad = Settings {
            beam_aperture: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(SettingsError::Invalid { field: "beam_aperture", .. })
        ));

        let outside = Settings {
            lighthouse_x: 900.0,
            ..Default::default()
        };
        assert!(outside.validate().is_err());

        let nan = Settings {
            sim_hz: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_load_falls_back_on_bad_file() {
        let path = std::env::temp_dir().join(format!("last-light-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{"arena_width": -5.0}"#).unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        let custom = Settings {
            seed: Some(11),
            max_particles: 64,
            ..Default::default()
        };
        custom.save(&path).unwrap();
        assert_eq!(Settings::load(&path), custom);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("last-light-settings-does-not-exist.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
