//! Collision detection for axis-aligned sprites
//!
//! Everything on the field is a rectangle anchored at its top-left corner.
//! The default hit test is a strict overlap of the two rectangles; the
//! radius test compares centre distance instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, PLAYER_BAND_HEIGHT};
use crate::tuning::HitTest;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Run the configured hit test between two rectangles
pub fn hits(mode: HitTest, a: &Rect, b: &Rect) -> bool {
    match mode {
        HitTest::Bounds => a.overlaps(b),
        HitTest::Radius { threshold } => a.center().distance(b.center()) < threshold,
    }
}

/// Region the player may occupy: full width, bottom band only
pub fn player_band() -> Rect {
    Rect::new(
        0.0,
        FIELD_HEIGHT - PLAYER_BAND_HEIGHT,
        FIELD_WIDTH,
        PLAYER_BAND_HEIGHT,
    )
}

/// Clamp a proposed top-left position so a sprite of `size` stays inside `band`
pub fn clamp_to_band(proposed: Vec2, size: Vec2, band: &Rect) -> Vec2 {
    let max_x = (band.right() - size.x).max(band.left());
    let max_y = (band.bottom() - size.y).max(band.top());
    Vec2::new(
        proposed.x.clamp(band.left(), max_x),
        proposed.y.clamp(band.top(), max_y),
    )
}
