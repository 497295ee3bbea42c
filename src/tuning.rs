//! Game balance parameters
//!
//! Defaults reproduce the classic feel: 50 Hz ticks, obstacles start at
//! 3 px/tick and a new one drops every 2 seconds, getting harder every 5 points.
//! Any subset of fields can be overridden from JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Slowest accepted fall speed (px per tick). Anything smaller is lost to f32
/// rounding against the spawn offset and obstacles would stop moving.
pub const MIN_BASE_SPEED: f32 = 0.01;

/// Difficulty and cadence knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tick loop period (ms)
    pub tick_ms: u64,
    /// Obstacle fall speed at the start of a run (px per tick)
    pub base_speed: f32,
    /// Speed added at every difficulty step
    pub speed_increment: f32,
    /// Delay between spawns at the start of a run (ms)
    pub base_spawn_interval_ms: u64,
    /// Spawn delay removed at every difficulty step (ms)
    pub spawn_interval_decrement_ms: u64,
    /// Spawn delay never drops below this (ms)
    pub min_spawn_interval_ms: u64,
    /// Score points between difficulty steps
    pub points_per_level: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            base_speed: 3.0,
            speed_increment: 0.2,
            base_spawn_interval_ms: 2000,
            spawn_interval_decrement_ms: 100,
            min_spawn_interval_ms: 800,
            points_per_level: 5,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field had the wrong type
    Json(serde_json::Error),
    /// Parsed fine but the values can't drive a game
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "malformed tuning JSON: {}", e),
            TuningError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Like [`Tuning::from_json`] but falls back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides: {:?}", tuning);
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.tick_ms == 0 {
            return Err(TuningError::Invalid("tick_ms must be positive".into()));
        }
        if !(self.base_speed >= MIN_BASE_SPEED) {
            return Err(TuningError::Invalid(format!(
                "base_speed must be at least {}",
                MIN_BASE_SPEED
            )));
        }
        if !(self.speed_increment >= 0.0) {
            return Err(TuningError::Invalid(
                "speed_increment must not be negative".into(),
            ));
        }
        if self.min_spawn_interval_ms == 0 {
            return Err(TuningError::Invalid(
                "min_spawn_interval_ms must be positive".into(),
            ));
        }
        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            return Err(TuningError::Invalid(format!(
                "min_spawn_interval_ms ({}) exceeds base_spawn_interval_ms ({})",
                self.min_spawn_interval_ms, self.base_spawn_interval_ms
            )));
        }
        if self.points_per_level == 0 {
            return Err(TuningError::Invalid(
                "points_per_level must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Spawn interval after one difficulty step, clamped to the floor
    pub fn next_spawn_interval(&self, current_ms: u64) -> u64 {
        if current_ms > self.min_spawn_interval_ms {
            current_ms
                .saturating_sub(self.spawn_interval_decrement_ms)
                .max(self.min_spawn_interval_ms)
        } else {
            current_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 5.0, "points_per_level": 3 }"#).unwrap();
        assert_eq!(tuning.base_speed, 5.0);
        assert_eq!(tuning.points_per_level, 3);
        assert_eq!(tuning.tick_ms, 20);
        assert_eq!(tuning.base_spawn_interval_ms, 2000);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_floor_above_base_rejected() {
        let err = Tuning::from_json(r#"{ "min_spawn_interval_ms": 3000 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let tuning = Tuning {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_negligible_speed_rejected() {
        let tuning = Tuning {
            base_speed: 1e-6,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::Invalid(_))));
        let slow = Tuning {
            base_speed: MIN_BASE_SPEED,
            ..Default::default()
        };
        assert!(slow.validate().is_ok());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let tuning = Tuning {
            base_spawn_interval_ms: 0,
            min_spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_zero_points_per_level_rejected() {
        let tuning = Tuning {
            points_per_level: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_fallback_to_default() {
        assert_eq!(Tuning::from_json_or_default("not json"), Tuning::default());
    }

    #[test]
    fn test_next_spawn_interval_floors() {
        let tuning = Tuning::default();
        assert_eq!(tuning.next_spawn_interval(2000), 1900);
        assert_eq!(tuning.next_spawn_interval(900), 800);
        assert_eq!(tuning.next_spawn_interval(800), 800);
        // Odd decrement still clamps to the floor instead of undershooting
        let odd = Tuning {
            spawn_interval_decrement_ms: 150,
            ..Default::default()
        };
        assert_eq!(odd.next_spawn_interval(850), 800);
    }

    proptest::proptest! {
        #[test]
        fn prop_next_spawn_interval_respects_floor(
            current in 0u64..5000,
            decrement in 0u64..1000,
            floor in 1u64..3000,
        ) {
            let tuning = Tuning {
                spawn_interval_decrement_ms: decrement,
                min_spawn_interval_ms: floor,
                ..Default::default()
            };
            let next = tuning.next_spawn_interval(current);
            proptest::prop_assert!(next >= floor.min(current));
            proptest::prop_assert!(next <= current);
            if current > floor {
                proptest::prop_assert_eq!(next, current.saturating_sub(decrement).max(floor));
            } else {
                proptest::prop_assert_eq!(next, current);
            }
        }
    }
}
