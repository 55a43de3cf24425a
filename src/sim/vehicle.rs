//! Vehicle choices for the player
//!
//! Each vehicle trades speed for footprint. The table is plain data owned by
//! the enum, so nothing needs a shared lookup at runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Selectable player vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Vehicle {
    /// Small and quick
    Scooter,
    /// Balanced
    #[default]
    Hatchback,
    /// Big and slow
    Van,
}

impl Vehicle {
    pub const ALL: [Vehicle; 3] = [Vehicle::Scooter, Vehicle::Hatchback, Vehicle::Van];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vehicle::Scooter => "Scooter",
            Vehicle::Hatchback => "Hatchback",
            Vehicle::Van => "Van",
        }
    }

    /// Sprite footprint in pixels
    pub fn size(&self) -> Vec2 {
        match self {
            Vehicle::Scooter => Vec2::new(40.0, 64.0),
            Vehicle::Hatchback => Vec2::new(56.0, 84.0),
            Vehicle::Van => Vec2::new(68.0, 100.0),
        }
    }

    /// Base speed in pixels per 60 Hz frame
    pub fn base_speed(&self) -> f32 {
        match self {
            Vehicle::Scooter => 6.5,
            Vehicle::Hatchback => 5.0,
            Vehicle::Van => 4.0,
        }
    }

    /// Body colour used when the sprite image is unavailable
    pub fn color(&self) -> [f32; 4] {
        match self {
            Vehicle::Scooter => [0.95, 0.75, 0.2, 1.0],
            Vehicle::Hatchback => [0.2, 0.6, 1.0, 1.0],
            Vehicle::Van => [0.85, 0.85, 0.9, 1.0],
        }
    }

    /// Image path for the sprite sheet (one row of animation frames)
    pub fn sprite_path(&self) -> &'static str {
        match self {
            Vehicle::Scooter => "assets/scooter.png",
            Vehicle::Hatchback => "assets/hatchback.png",
            Vehicle::Van => "assets/van.png",
        }
    }
}
