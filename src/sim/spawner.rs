//! Falling object spawner
//!
//! Gated on elapsed simulated milliseconds rather than frame count, so the
//! cadence is the same whatever the host's frame rate.

use glam::Vec2;
use rand::Rng;

use super::catalog::{OBSTACLES, PRODUCTS};
use super::state::{GameObject, GameState, ObjectKind};
use crate::consts::{FIELD_WIDTH, OBJECT_SIZE};

/// Advance the spawn timer and create at most one object.
/// Returns the new object's id when one was spawned.
pub fn advance_spawner(state: &mut GameState, dt_ms: f32) -> Option<u32> {
    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms < state.spawn_rate_ms {
        return None;
    }
    state.spawn_timer_ms -= state.spawn_rate_ms;
    // Never let a long stall queue up a burst
    state.spawn_timer_ms = state.spawn_timer_ms.min(state.spawn_rate_ms);
    Some(spawn_object(state))
}

/// Create one object above the field using the current difficulty
pub fn spawn_object(state: &mut GameState) -> u32 {
    let kind_roll: f32 = state.rng.random();
    let kind = if kind_roll < state.product_probability {
        ObjectKind::Product
    } else {
        ObjectKind::Obstacle
    };
    spawn_kind(state, kind)
}

/// Create one object of a known kind (also used for scripted spawns)
pub fn spawn_kind(state: &mut GameState, kind: ObjectKind) -> u32 {
    let size = Vec2::splat(OBJECT_SIZE);
    let x = spawn_x(state, size.x);

    let spread: f32 = state.rng.random();
    let speed = (state.tuning.base_fall_speed + spread * state.tuning.fall_speed_spread)
        * state.speed_multiplier;

    let catalog = match kind {
        ObjectKind::Product => PRODUCTS,
        ObjectKind::Obstacle => OBSTACLES,
    };
    let payload = catalog[state.rng.random_range(0..catalog.len())];
    let variant = state.rng.random_range(0..2u8);

    let id = state.next_entity_id();
    log::debug!("spawn #{id} {kind:?} {} at x={x:.0} speed={speed:.2}", payload.name);
    state.objects.push(GameObject {
        id,
        pos: Vec2::new(x, -size.y),
        size,
        kind,
        payload,
        variant,
        speed,
    });
    id
}

/// Horizontal spawn position, either a lane centre or free within the field
fn spawn_x(state: &mut GameState, width: f32) -> f32 {
    let max_x = (FIELD_WIDTH - width).max(0.0);
    let lanes = state.tuning.lane_count;
    if state.tuning.snap_to_lanes && lanes > 0 {
        let lane_width = FIELD_WIDTH / lanes as f32;
        let lane = state.rng.random_range(0..lanes);
        let center = lane_width * (lane as f32 + 0.5);
        (center - width / 2.0).clamp(0.0, max_x)
    } else {
        state.rng.random::<f32>() * max_x
    }
}
