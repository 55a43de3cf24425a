//! Backend that records draw calls instead of drawing
//!
//! Used by tests and the native headless run.

use glam::Vec2;

use super::{Color, RenderBackend, Shape, Sprite, TextStyle};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Offset(Vec2),
    Sprite { sprite: Sprite, rect: Rect, alpha: f32 },
    Shape { shape: Shape, color: Color },
    Text { text: String, pos: Vec2, style: TextStyle },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub commands: Vec<DrawCommand>,
    /// Pretend every sprite image is loaded
    sprites_loaded: bool,
}

impl RecordingBackend {
    /// Backend with no images available
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with every image available
    pub fn with_sprites() -> Self {
        Self {
            commands: Vec::new(),
            sprites_loaded: true,
        }
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == needle))
    }
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Offset(offset));
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, alpha: f32) -> bool {
        if !self.sprites_loaded {
            return false;
        }
        self.commands.push(DrawCommand::Sprite {
            sprite,
            rect,
            alpha,
        });
        true
    }

    fn draw_shape(&mut self, shape: Shape, color: Color) {
        self.commands.push(DrawCommand::Shape { shape, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}
