//! Colors for game elements

use super::Color;

pub const ROAD: Color = [0.16, 0.17, 0.2, 1.0];
pub const ROAD_EDGE: Color = [0.3, 0.75, 0.35, 1.0];
pub const LANE_DASH: Color = [0.92, 0.92, 0.85, 0.8];
pub const PRODUCT_BG: Color = [1.0, 0.85, 0.3, 0.9];
pub const OBSTACLE: Color = [0.9, 0.25, 0.2, 1.0];
pub const WINDSHIELD: Color = [0.7, 0.9, 1.0, 0.9];
pub const EXHAUST: Color = [1.0, 0.55, 0.1, 0.85];
pub const HIT_FLASH: Color = [1.0, 0.1, 0.1, 1.0];
pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
pub const TEXT_DIM: Color = [0.75, 0.75, 0.8, 1.0];
pub const HIGHLIGHT: Color = [1.0, 0.85, 0.2, 1.0];
pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.55];

/// Same color with a different alpha
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// CSS `rgba()` string for canvas fill styles
pub fn css(color: Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}
