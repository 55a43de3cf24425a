//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Objects kept in spawn order (ids only ever increase)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod catalog;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod events;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod vehicle;

pub use catalog::Payload;
pub use clock::FrameClock;
pub use collision::{Rect, clamp_to_band, hits, player_band};
pub use difficulty::Difficulty;
pub use events::{GameEvent, GameListener, dispatch_events};
pub use spawner::{advance_spawner, spawn_kind, spawn_object};
pub use state::{Effects, GameObject, GamePhase, GameState, ObjectKind, Player};
pub use tick::{TickInput, start_session, tick};
pub use vehicle::Vehicle;
