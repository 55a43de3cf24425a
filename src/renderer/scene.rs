//! Scene drawing
//!
//! `FrameView` derives everything visual that isn't stored directly in the
//! game state (animation frame, blink, shake, flash). `draw_scene` then walks
//! the state and issues backend calls, falling back to shapes for any sprite
//! that isn't loaded.

use glam::Vec2;

use super::palette::{self, with_alpha};
use super::{Color, RenderBackend, Shape, Sprite, TextAlign, TextStyle};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::settings::Settings;
use crate::sim::state::{COLLECT_PULSE_MS, HIT_FLASH_MS};
use crate::sim::tick::ROAD_DASH_PERIOD;
use crate::sim::{GameObject, GamePhase, GameState, ObjectKind, Player, Rect};

/// Frames in a vehicle animation strip
pub const PLAYER_FRAMES: u32 = 4;
/// Time per animation frame
pub const ANIM_FRAME_MS: f32 = 120.0;
/// Blink half-period while the hit flash runs
pub const FLASH_BLINK_MS: f32 = 60.0;
/// Peak red overlay alpha right after a hit
pub const FLASH_MAX_ALPHA: f32 = 0.35;
/// Extra scale at the peak of the collect pulse
pub const COLLECT_PULSE_SCALE: f32 = 0.12;

const LANE_DASH_LENGTH: f32 = 40.0;
const LANE_DASH_WIDTH: f32 = 4.0;
const ROAD_EDGE_WIDTH: f32 = 6.0;

/// Visual state derived from the game state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    /// Whole-scene translation
    pub shake_offset: Vec2,
    pub player_frame: u32,
    /// False on the "off" half of a hit blink
    pub player_visible: bool,
    pub player_scale: f32,
    /// Red overlay alpha
    pub flash_alpha: f32,
    /// Boost flame behind the vehicle
    pub exhaust: bool,
}

impl FrameView {
    pub fn derive(state: &GameState, settings: &Settings) -> Self {
        let effects = &state.effects;

        let shake_offset = if settings.effective_screen_shake() && effects.shake > 0.0 {
            let t = state.time_ticks as f32;
            Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * effects.shake
        } else {
            Vec2::ZERO
        };

        let player_frame = (effects.anim_ms / ANIM_FRAME_MS) as u32 % PLAYER_FRAMES;

        let flashing = settings.effective_hit_flash() && effects.hit_flash_ms > 0.0;
        let player_visible =
            !flashing || (effects.hit_flash_ms / FLASH_BLINK_MS) as u32 % 2 == 0;
        let flash_alpha = if flashing {
            FLASH_MAX_ALPHA * effects.hit_flash_ms / HIT_FLASH_MS
        } else {
            0.0
        };

        let player_scale = if effects.collect_pulse_ms > 0.0 {
            let progress = 1.0 - effects.collect_pulse_ms / COLLECT_PULSE_MS;
            1.0 + COLLECT_PULSE_SCALE * (progress * std::f32::consts::PI).sin()
        } else {
            1.0
        };

        Self {
            shake_offset,
            player_frame,
            player_visible,
            player_scale,
            flash_alpha,
            exhaust: state.player.boosting && state.is_running(),
        }
    }
}

/// Draw a complete frame
pub fn draw_scene(state: &GameState, settings: &Settings, backend: &mut dyn RenderBackend) {
    let view = FrameView::derive(state, settings);

    backend.clear(palette::ROAD);
    backend.set_offset(view.shake_offset);

    draw_road(state, backend);
    for obj in &state.objects {
        draw_object(obj, backend);
    }
    if view.player_visible {
        draw_player(&state.player, &view, backend);
    }

    backend.set_offset(Vec2::ZERO);

    if view.flash_alpha > 0.0 {
        backend.draw_shape(
            Shape::Rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)),
            with_alpha(palette::HIT_FLASH, view.flash_alpha),
        );
    }

    draw_hud(state, backend);
    draw_phase_overlay(state, backend);
}

fn draw_road(state: &GameState, backend: &mut dyn RenderBackend) {
    for x in [0.0, FIELD_WIDTH - ROAD_EDGE_WIDTH] {
        backend.draw_shape(
            Shape::Rect(Rect::new(x, 0.0, ROAD_EDGE_WIDTH, FIELD_HEIGHT)),
            palette::ROAD_EDGE,
        );
    }

    let lanes = state.tuning.lane_count.max(1);
    let lane_width = FIELD_WIDTH / lanes as f32;
    let dashes = (FIELD_HEIGHT / ROAD_DASH_PERIOD) as u32 + 2;
    for lane in 1..lanes {
        let x = lane_width * lane as f32 - LANE_DASH_WIDTH / 2.0;
        for i in 0..dashes {
            let y = state.effects.road_offset - ROAD_DASH_PERIOD + i as f32 * ROAD_DASH_PERIOD;
            backend.draw_shape(
                Shape::Rect(Rect::new(x, y, LANE_DASH_WIDTH, LANE_DASH_LENGTH)),
                palette::LANE_DASH,
            );
        }
    }
}

fn draw_object(obj: &GameObject, backend: &mut dyn RenderBackend) {
    let rect = obj.rect();
    let glyph_style = TextStyle::new(obj.size.y * 0.7, palette::TEXT, TextAlign::Center);
    let glyph_pos = Vec2::new(rect.center().x, rect.bottom() - obj.size.y * 0.2);

    match obj.kind {
        ObjectKind::Product => {
            backend.draw_shape(
                Shape::Circle {
                    center: rect.center(),
                    radius: obj.size.x / 2.0,
                },
                palette::PRODUCT_BG,
            );
            backend.draw_text(obj.payload.glyph, glyph_pos, glyph_style);
        }
        ObjectKind::Obstacle => {
            let sprite = Sprite::Obstacle {
                variant: obj.variant,
            };
            if !backend.draw_sprite(sprite, rect, 1.0) {
                backend.draw_shape(Shape::Rect(rect), palette::OBSTACLE);
                backend.draw_text(obj.payload.glyph, glyph_pos, glyph_style);
            }
        }
    }
}

fn draw_player(player: &Player, view: &FrameView, backend: &mut dyn RenderBackend) {
    let base = player.rect();
    let size = base.size * view.player_scale;
    let rect = Rect {
        pos: base.center() - size * 0.5,
        size,
    };

    if view.exhaust {
        let flicker = if view.player_frame % 2 == 0 { 1.0 } else { 0.75 };
        backend.draw_shape(
            Shape::Circle {
                center: Vec2::new(rect.center().x, rect.bottom() + 6.0),
                radius: size.x * 0.18 * flicker,
            },
            palette::EXHAUST,
        );
    }

    let sprite = Sprite::Vehicle {
        vehicle: player.vehicle,
        frame: view.player_frame,
    };
    if !backend.draw_sprite(sprite, rect, 1.0) {
        backend.draw_shape(Shape::Rect(rect), player.vehicle.color());
        let windshield = Rect::new(
            rect.left() + size.x * 0.15,
            rect.top() + size.y * 0.18,
            size.x * 0.7,
            size.y * 0.2,
        );
        backend.draw_shape(Shape::Rect(windshield), palette::WINDSHIELD);
    }
}

fn draw_hud(state: &GameState, backend: &mut dyn RenderBackend) {
    let style = TextStyle::new(22.0, palette::TEXT, TextAlign::Left);
    backend.draw_text(&format!("Score: {}", state.score), Vec2::new(16.0, 32.0), style);
    backend.draw_text(
        &format!("Best: {}", state.best_score.max(state.score)),
        Vec2::new(16.0, 58.0),
        TextStyle::new(16.0, palette::TEXT_DIM, TextAlign::Left),
    );
    let hearts = "♥".repeat(state.lives as usize);
    backend.draw_text(
        &hearts,
        Vec2::new(FIELD_WIDTH - 16.0, 32.0),
        TextStyle::new(24.0, palette::OBSTACLE, TextAlign::Right),
    );
}

fn draw_phase_overlay(state: &GameState, backend: &mut dyn RenderBackend) {
    let lines: Vec<(String, f32, Color)> = match state.phase {
        GamePhase::Playing => return,
        GamePhase::Idle => vec![
            ("District Driver".to_string(), 48.0, palette::HIGHLIGHT),
            ("Collect goods, dodge hazards".to_string(), 20.0, palette::TEXT_DIM),
            ("Press Enter to start".to_string(), 24.0, palette::TEXT),
        ],
        GamePhase::Paused => vec![
            ("Paused".to_string(), 48.0, palette::TEXT),
            ("Press P to resume".to_string(), 20.0, palette::TEXT_DIM),
        ],
        GamePhase::Ended => {
            let mut lines = vec![
                ("Game Over".to_string(), 48.0, palette::OBSTACLE),
                (format!("Score: {}", state.score), 28.0, palette::TEXT),
            ];
            if state.new_best {
                lines.push(("New best!".to_string(), 24.0, palette::HIGHLIGHT));
            }
            lines.push(("Press Enter to continue".to_string(), 20.0, palette::TEXT_DIM));
            lines
        }
    };

    backend.draw_shape(
        Shape::Rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT)),
        palette::OVERLAY,
    );
    let mut y = FIELD_HEIGHT / 2.0 - 40.0;
    for (text, size, color) in lines {
        backend.draw_text(
            &text,
            Vec2::new(FIELD_WIDTH / 2.0, y),
            TextStyle::new(size, color, TextAlign::Center),
        );
        y += size + 14.0;
    }
}
