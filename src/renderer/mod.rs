//! Rendering module
//!
//! The scene is described through a small backend trait so the same drawing
//! code serves the browser canvas and headless recording.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;
pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasBackend;
pub use recording::{DrawCommand, RecordingBackend};
pub use scene::{FrameView, draw_scene};

use glam::Vec2;

use crate::sim::{Rect, Vehicle};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Image-backed things the backend may know how to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    /// Player vehicle, one frame of its animation strip
    Vehicle { vehicle: Vehicle, frame: u32 },
    /// Obstacle image (two cosmetic variants)
    Obstacle { variant: u8 },
}

/// Primitive fallback shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

/// Drawing capabilities the scene needs
pub trait RenderBackend {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Translate everything drawn afterwards (screen shake)
    fn set_offset(&mut self, offset: Vec2);
    /// Draw an image into `rect`. Returns false when the image isn't
    /// available yet; the caller then draws a fallback shape.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, alpha: f32) -> bool;
    fn draw_shape(&mut self, shape: Shape, color: Color);
    /// `pos` is the text baseline anchor
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}
