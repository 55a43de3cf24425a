//! Data-driven game balance
//!
//! Everything that shapes the difficulty curve lives here so it can be
//! tweaked from JSON without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::PRODUCT_POINTS;

/// How a falling object is tested against the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HitTest {
    /// Axis-aligned bounding box overlap (matches the drawn sprite)
    #[default]
    Bounds,
    /// Centre-to-centre distance below `threshold`
    Radius { threshold: f32 },
}

/// Balance knobs for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Milliseconds between spawns at score 0
    pub base_spawn_rate_ms: f32,
    /// Spawn interval floor
    pub min_spawn_rate_ms: f32,
    /// Spawn interval reduction per 10 points
    pub spawn_rate_step_ms: f32,
    /// Speed multiplier ceiling
    pub max_speed_multiplier: f32,
    /// Speed multiplier gain per 10 points
    pub speed_multiplier_step: f32,
    /// Fall speed before the random spread and multiplier (px per frame)
    pub base_fall_speed: f32,
    /// Random spread added to the fall speed (px per frame)
    pub fall_speed_spread: f32,
    /// Product chance at score 0
    pub product_probability_start: f32,
    /// Product chance lost per 100 points
    pub product_probability_step: f32,
    /// Product chance floor
    pub product_probability_min: f32,
    /// Points per product
    pub product_points: u64,
    /// Player speed factor while boosting
    pub boost_multiplier: f32,
    /// Number of spawn lanes across the field
    pub lane_count: u32,
    /// Snap spawns to lane centres instead of free x
    pub snap_to_lanes: bool,
    /// Collision predicate
    pub hit_test: HitTest,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_spawn_rate_ms: 1000.0,
            min_spawn_rate_ms: 300.0,
            spawn_rate_step_ms: 50.0,
            max_speed_multiplier: 2.5,
            speed_multiplier_step: 0.02,
            base_fall_speed: 2.0,
            fall_speed_spread: 3.0,
            product_probability_start: 0.7,
            product_probability_step: 0.05,
            product_probability_min: 0.4,
            product_points: PRODUCT_POINTS,
            boost_multiplier: 1.6,
            lane_count: 5,
            snap_to_lanes: true,
            hit_test: HitTest::Bounds,
        }
    }
}

impl Tuning {
    /// LocalStorage key for a developer override
    pub const STORAGE_KEY: &'static str = "district_driver_tuning";

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "min_spawn_rate_ms": 250.0 }"#).unwrap();
        assert_eq!(tuning.min_spawn_rate_ms, 250.0);
        assert_eq!(tuning.base_spawn_rate_ms, 1000.0);
        assert_eq!(tuning.hit_test, HitTest::Bounds);
    }

    #[test]
    fn test_radius_hit_test_from_json() {
        let tuning =
            Tuning::from_json(r#"{ "hit_test": { "mode": "radius", "threshold": 30.0 } }"#)
                .unwrap();
        assert_eq!(tuning.hit_test, HitTest::Radius { threshold: 30.0 });
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
