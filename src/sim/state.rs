//! Game state and core simulation types
//!
//! All state a session needs lives here. Nothing reads the wall clock or a
//! global RNG, so a seed plus an input sequence reproduces a run exactly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::Payload;
use super::collision::{Rect, clamp_to_band, player_band};
use super::difficulty::Difficulty;
use super::events::GameEvent;
use super::vehicle::Vehicle;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title / summary screen, waiting for start
    Idle,
    /// Active gameplay
    Playing,
    /// Frozen; rendering continues
    Paused,
    /// Lives ran out
    Ended,
}

/// What a falling object does on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Product,
    Obstacle,
}

/// The player's vehicle
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per 60 Hz frame
    pub base_speed: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    pub moving_up: bool,
    pub moving_down: bool,
    pub boosting: bool,
    pub vehicle: Vehicle,
}

impl Player {
    pub fn new(vehicle: Vehicle) -> Self {
        let size = vehicle.size();
        let mut player = Self {
            pos: Vec2::ZERO,
            size,
            base_speed: vehicle.base_speed(),
            moving_left: false,
            moving_right: false,
            moving_up: false,
            moving_down: false,
            boosting: false,
            vehicle,
        };
        player.recenter();
        player
    }

    /// Park at the bottom centre of the band
    pub fn recenter(&mut self) {
        let proposed = Vec2::new(
            (FIELD_WIDTH - self.size.x) / 2.0,
            FIELD_HEIGHT - self.size.y - 20.0,
        );
        self.pos = clamp_to_band(proposed, self.size, &player_band());
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Any direction held (opposing pairs cancel)
    pub fn is_moving(&self) -> bool {
        self.direction() != Vec2::ZERO
    }

    /// Unit-per-axis direction from the movement flags
    pub fn direction(&self) -> Vec2 {
        let x = self.moving_right as i8 - self.moving_left as i8;
        let y = self.moving_down as i8 - self.moving_up as i8;
        Vec2::new(x as f32, y as f32)
    }

    /// Velocity in pixels per frame
    pub fn velocity(&self, boost_multiplier: f32) -> Vec2 {
        let speed = if self.boosting {
            self.base_speed * boost_multiplier
        } else {
            self.base_speed
        };
        self.direction() * speed
    }

    pub fn clear_intent(&mut self) {
        self.moving_left = false;
        self.moving_right = false;
        self.moving_up = false;
        self.moving_down = false;
        self.boosting = false;
    }
}

/// A falling product or obstacle
#[derive(Debug, Clone, Serialize)]
pub struct GameObject {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObjectKind,
    pub payload: Payload,
    /// Cosmetic sprite variant (0 or 1)
    pub variant: u8,
    /// Pixels per frame, fixed at spawn
    pub speed: f32,
}

impl GameObject {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Entirely below the visible field
    pub fn is_off_field(&self) -> bool {
        self.pos.y > FIELD_HEIGHT
    }
}

/// Hit flash duration
pub const HIT_FLASH_MS: f32 = 400.0;
/// Screen shake amplitude on hit (pixels)
pub const SHAKE_AMPLITUDE: f32 = 8.0;
/// Per-tick shake decay factor
pub const SHAKE_DECAY: f32 = 0.9;
/// Collect pulse duration
pub const COLLECT_PULSE_MS: f32 = 250.0;
/// Road marking scroll speed (pixels per frame at multiplier 1)
pub const ROAD_SCROLL_SPEED: f32 = 3.0;

/// Timers feeding the derived render state (not gameplay-affecting)
#[derive(Debug, Clone, Default, Serialize)]
pub struct Effects {
    /// Remaining hit flash
    pub hit_flash_ms: f32,
    /// Current shake amplitude
    pub shake: f32,
    /// Remaining collect pulse
    pub collect_pulse_ms: f32,
    /// Background scroll position
    pub road_offset: f32,
    /// Animation clock, only advances while the player moves
    pub anim_ms: f32,
}

impl Effects {
    pub fn trigger_hit(&mut self) {
        self.hit_flash_ms = HIT_FLASH_MS;
        self.shake = SHAKE_AMPLITUDE;
    }

    pub fn trigger_collect(&mut self) {
        self.collect_pulse_ms = COLLECT_PULSE_MS;
    }

    /// Count timers down by one tick
    pub fn decay(&mut self, dt_ms: f32) {
        self.hit_flash_ms = (self.hit_flash_ms - dt_ms).max(0.0);
        self.collect_pulse_ms = (self.collect_pulse_ms - dt_ms).max(0.0);
        self.shake *= SHAKE_DECAY;
        if self.shake < 0.01 {
            self.shake = 0.0;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Best score known before/through this session
    pub best_score: u64,
    /// The finished session beat `best_score`
    pub new_best: bool,
    pub product_probability: f32,
    pub spawn_rate_ms: f32,
    pub speed_multiplier: f32,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer_ms: f32,
    /// Simulation tick counter (playing ticks only)
    pub time_ticks: u64,
    pub player: Player,
    /// Live objects (sorted by id)
    pub objects: Vec<GameObject>,
    pub effects: Effects,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New idle state with default tuning and vehicle
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Vehicle::default(), 0)
    }

    pub fn with_config(seed: u64, tuning: Tuning, vehicle: Vehicle, best_score: u64) -> Self {
        let difficulty = Difficulty::for_score(0, &tuning);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            score: 0,
            lives: START_LIVES,
            best_score,
            new_best: false,
            product_probability: difficulty.product_probability,
            spawn_rate_ms: difficulty.spawn_rate_ms,
            speed_multiplier: difficulty.speed_multiplier,
            spawn_timer_ms: 0.0,
            time_ticks: 0,
            player: Player::new(vehicle),
            objects: Vec::new(),
            effects: Effects::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything a fresh session starts from.
    /// Entity IDs keep counting so an old id can never come back.
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.new_best = false;
        self.objects.clear();
        self.spawn_timer_ms = 0.0;
        self.time_ticks = 0;
        self.effects = Effects::default();
        self.player.clear_intent();
        self.player.recenter();
        self.apply_difficulty();
    }

    /// Swap the vehicle; only takes effect outside a session
    pub fn set_vehicle(&mut self, vehicle: Vehicle) {
        if matches!(self.phase, GamePhase::Idle | GamePhase::Ended) {
            self.player = Player::new(vehicle);
        }
    }

    /// Recompute the difficulty curve from the current score
    pub fn apply_difficulty(&mut self) {
        let d = Difficulty::for_score(self.score, &self.tuning);
        self.product_probability = d.product_probability;
        self.spawn_rate_ms = d.spawn_rate_ms;
        self.speed_multiplier = d.speed_multiplier;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
