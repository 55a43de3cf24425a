//! Difficulty curve
//!
//! Pure functions of score. Score never decreases within a session, so every
//! value here only moves toward its floor/ceiling.

use crate::tuning::Tuning;

/// Chance that a new spawn is a product (drops 1 step per 100 points)
pub fn product_probability(score: u64, tuning: &Tuning) -> f32 {
    let steps = (score / 100) as f32;
    (tuning.product_probability_start - tuning.product_probability_step * steps)
        .max(tuning.product_probability_min)
}

/// Milliseconds between spawns
pub fn spawn_rate_ms(score: u64, tuning: &Tuning) -> f32 {
    let tens = (score / 10) as f32;
    (tuning.base_spawn_rate_ms - tuning.spawn_rate_step_ms * tens).max(tuning.min_spawn_rate_ms)
}

/// Fall speed multiplier for newly spawned objects
pub fn speed_multiplier(score: u64, tuning: &Tuning) -> f32 {
    let tens = (score / 10) as f32;
    (1.0 + tuning.speed_multiplier_step * tens).min(tuning.max_speed_multiplier)
}

/// Snapshot of all three values for a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub product_probability: f32,
    pub spawn_rate_ms: f32,
    pub speed_multiplier: f32,
}

impl Difficulty {
    pub fn for_score(score: u64, tuning: &Tuning) -> Self {
        Self {
            product_probability: product_probability(score, tuning),
            spawn_rate_ms: spawn_rate_ms(score, tuning),
            speed_multiplier: speed_multiplier(score, tuning),
        }
    }
}
