//! Canvas 2D backend
//!
//! Images load asynchronously in the browser; until an image reports
//! complete, `draw_sprite` declines and the scene draws a fallback shape.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::palette::css;
use super::scene::PLAYER_FRAMES;
use super::{Color, RenderBackend, Shape, Sprite, TextAlign, TextStyle};
use crate::sim::{Rect, Vehicle};

const OBSTACLE_IMAGES: [&str; 2] = ["assets/obstacle-cone.png", "assets/obstacle-barrier.png"];

pub struct CanvasBackend {
    ctx: CanvasRenderingContext2d,
    /// Device pixels per logical pixel
    scale: f64,
    offset: Vec2,
    vehicles: HashMap<Vehicle, HtmlImageElement>,
    obstacles: Vec<HtmlImageElement>,
}

fn load_image(path: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(path);
    Some(img)
}

fn is_ready(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

impl CanvasBackend {
    /// Grab the 2D context and start loading images
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let vehicles = Vehicle::ALL
            .iter()
            .filter_map(|v| load_image(v.sprite_path()).map(|img| (*v, img)))
            .collect();
        let obstacles = OBSTACLE_IMAGES.iter().filter_map(|p| load_image(p)).collect();

        Some(Self {
            ctx,
            scale: 1.0,
            offset: Vec2::ZERO,
            vehicles,
            obstacles,
        })
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.apply_transform();
    }

    fn apply_transform(&self) {
        let s = self.scale;
        self.ctx
            .set_transform(
                s,
                0.0,
                0.0,
                s,
                self.offset.x as f64 * s,
                self.offset.y as f64 * s,
            )
            .ok();
    }
}

impl RenderBackend for CanvasBackend {
    fn clear(&mut self, color: Color) {
        self.offset = Vec2::ZERO;
        self.apply_transform();
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&css(color));
        self.ctx.fill_rect(
            0.0,
            0.0,
            crate::consts::FIELD_WIDTH as f64,
            crate::consts::FIELD_HEIGHT as f64,
        );
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.apply_transform();
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, alpha: f32) -> bool {
        let (img, frame, frames) = match sprite {
            Sprite::Vehicle { vehicle, frame } => match self.vehicles.get(&vehicle) {
                Some(img) => (img, frame, PLAYER_FRAMES),
                None => return false,
            },
            Sprite::Obstacle { variant } => match self.obstacles.get(variant as usize) {
                Some(img) => (img, 0, 1),
                None => return false,
            },
        };
        if !is_ready(img) {
            return false;
        }

        // Sprite sheets are one horizontal strip of equal frames
        let sw = img.natural_width() as f64 / frames as f64;
        let sh = img.natural_height() as f64;
        self.ctx.set_global_alpha(alpha as f64);
        let drawn = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img,
                sw * frame as f64,
                0.0,
                sw,
                sh,
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            )
            .is_ok();
        self.ctx.set_global_alpha(1.0);
        drawn
    }

    fn draw_shape(&mut self, shape: Shape, color: Color) {
        self.ctx.set_fill_style_str(&css(color));
        match shape {
            Shape::Rect(r) => {
                self.ctx.fill_rect(
                    r.pos.x as f64,
                    r.pos.y as f64,
                    r.size.x as f64,
                    r.size.y as f64,
                );
            }
            Shape::Circle { center, radius } => {
                self.ctx.begin_path();
                if self
                    .ctx
                    .arc(
                        center.x as f64,
                        center.y as f64,
                        radius.max(0.0) as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )
                    .is_ok()
                {
                    self.ctx.fill();
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.ctx
            .set_font(&format!("bold {}px sans-serif", style.size.round()));
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        self.ctx.set_fill_style_str(&css(style.color));
        self.ctx.fill_text(text, pos.x as f64, pos.y as f64).ok();
    }
}
