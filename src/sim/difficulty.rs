//! Difficulty curve
//!
//! Stateless step/linear functions of the cumulative score. Everything that
//! escalates during a run reads from here.

/// Milliseconds between ship spawns
pub fn spawn_rate_ms(score: u64) -> f64 {
    (3000.0 - 4.0 * score as f64).max(800.0)
}

/// Multiplier applied to a ship's base speed at spawn
pub fn speed_multiplier(score: u64) -> f64 {
    1.0 + 0.1 * (score / 50) as f64
}

/// Seconds of cooldown after a storm starts before the next may roll
pub fn storm_frequency_secs(score: u64) -> f64 {
    (30.0 - 0.2 * (score / 25) as f64).max(10.0)
}

/// Multiplier applied to saved-ship points
pub fn score_multiplier(score: u64) -> f64 {
    1.0 + 0.5 * (score / 200) as f64
}

/// Displayed difficulty level (1-based)
pub fn difficulty_level(score: u64) -> u32 {
    (score / 100) as u32 + 1
}

/// Extra fuel burn past 500 points
pub fn fuel_consumption_multiplier(score: u64) -> f64 {
    if score > 500 {
        1.0 + 0.0001 * (score - 500) as f64
    } else {
        1.0
    }
}

/// Visual intensity in [0, 1], used to pick the sea/sky palette
pub fn visual_intensity(score: u64) -> f32 {
    (score as f32 / 1000.0).min(1.0)
}

/// Palette tier derived from `visual_intensity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityTier {
    Calm,
    High,
    Extreme,
}

pub fn intensity_tier(score: u64) -> IntensityTier {
    let intensity = visual_intensity(score);
    if intensity > 0.7 {
        IntensityTier::Extreme
    } else if intensity > 0.4 {
        IntensityTier::High
    } else {
        IntensityTier::Calm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_rate_floor() {
        assert_eq!(spawn_rate_ms(0), 3000.0);
        assert_eq!(spawn_rate_ms(100), 2600.0);
        assert_eq!(spawn_rate_ms(550), 800.0);
        assert_eq!(spawn_rate_ms(10_000), 800.0);
    }

    #[test]
    fn test_step_functions() {
        assert_eq!(speed_multiplier(49), 1.0);
        assert!((speed_multiplier(150) - 1.3).abs() < 1e-9);
        assert_eq!(storm_frequency_secs(0), 30.0);
        assert!((storm_frequency_secs(250) - 28.0).abs() < 1e-9);
        assert_eq!(storm_frequency_secs(1_000_000), 10.0);
        assert_eq!(score_multiplier(199), 1.0);
        assert_eq!(score_multiplier(400), 2.0);
        assert_eq!(difficulty_level(0), 1);
        assert_eq!(difficulty_level(250), 3);
    }

    #[test]
    fn test_fuel_consumption_kicks_in_after_500() {
        assert_eq!(fuel_consumption_multiplier(500), 1.0);
        assert!((fuel_consumption_multiplier(1500) - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_tiers() {
        assert_eq!(intensity_tier(0), IntensityTier::Calm);
        assert_eq!(intensity_tier(500), IntensityTier::High);
        assert_eq!(intensity_tier(800), IntensityTier::Extreme);
        assert_eq!(visual_intensity(5000), 1.0);
    }

    proptest! {
        #[test]
        fn spawn_rate_bounded_and_non_increasing(score in 0u64..1_000_000, bump in 0u64..10_000) {
            let a = spawn_rate_ms(score);
            let b = spawn_rate_ms(score + bump);
            prop_assert!(a >= 800.0);
            prop_assert!(b <= a);
        }

        #[test]
        fn multipliers_never_decrease(score in 0u64..1_000_000) {
            prop_assert!(speed_multiplier(score + 1) >= speed_multiplier(score));
            prop_assert!(score_multiplier(score + 1) >= score_multiplier(score));
            prop_assert!(fuel_consumption_multiplier(score + 1) >= fuel_consumption_multiplier(score));
            prop_assert!(storm_frequency_secs(score + 1) <= storm_frequency_secs(score));
            prop_assert!(storm_frequency_secs(score) >= 10.0);
        }
    }
}
