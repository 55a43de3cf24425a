//! Keyboard and touch mapping
//!
//! Event callbacks only flip flags on a `TickInput`; the next tick reads them.
//! Each flag has a single writer, so no locking is involved.

use glam::Vec2;

use crate::sim::TickInput;

/// What a key press/release means for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Up,
    Down,
    Boost,
    Pause,
    /// Start from the title screen or leave the summary
    Confirm,
}

/// Map a DOM `KeyboardEvent.key` value
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(KeyAction::Left),
        "ArrowRight" | "d" | "D" => Some(KeyAction::Right),
        "ArrowUp" | "w" | "W" => Some(KeyAction::Up),
        "ArrowDown" | "s" | "S" => Some(KeyAction::Down),
        "Shift" | " " => Some(KeyAction::Boost),
        "p" | "P" | "Escape" => Some(KeyAction::Pause),
        "Enter" => Some(KeyAction::Confirm),
        _ => None,
    }
}

/// Apply a key transition. Returns true if the key was handled.
///
/// `repeat` marks auto-repeated keydowns from a held key. Held directions
/// simply stay set; one-shot actions ignore them.
pub fn apply_key(input: &mut TickInput, key: &str, pressed: bool, repeat: bool) -> bool {
    let Some(action) = key_action(key) else {
        return false;
    };
    match action {
        KeyAction::Left => input.left = pressed,
        KeyAction::Right => input.right = pressed,
        KeyAction::Up => input.up = pressed,
        KeyAction::Down => input.down = pressed,
        KeyAction::Boost => input.boost = pressed,
        // One-shot actions trigger on the initial press only
        KeyAction::Pause => {
            if pressed && !repeat {
                input.pause = true;
            }
        }
        KeyAction::Confirm => {
            if pressed && !repeat {
                input.start = true;
                input.restart = true;
            }
        }
    }
    true
}

/// Directions a touch point asks for.
///
/// The surface is split in thirds horizontally: the outer thirds steer left
/// or right, the middle third steers up (top half) or down (bottom half).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

pub fn touch_quadrant(point: Vec2, surface: Vec2) -> TouchIntent {
    let mut intent = TouchIntent::default();
    if surface.x <= 0.0 || surface.y <= 0.0 {
        return intent;
    }
    let third = surface.x / 3.0;
    if point.x < third {
        intent.left = true;
    } else if point.x > third * 2.0 {
        intent.right = true;
    } else if point.y < surface.y / 2.0 {
        intent.up = true;
    } else {
        intent.down = true;
    }
    intent
}

/// Replace directional flags from the current set of touches.
/// Two or more fingers down means boost.
pub fn apply_touches(input: &mut TickInput, touches: &[Vec2], surface: Vec2) {
    input.left = false;
    input.right = false;
    input.up = false;
    input.down = false;
    for &point in touches {
        let intent = touch_quadrant(point, surface);
        input.left |= intent.left;
        input.right |= intent.right;
        input.up |= intent.up;
        input.down |= intent.down;
    }
    input.boost = touches.len() >= 2;
}
