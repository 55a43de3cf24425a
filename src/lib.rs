//! District Driver - A falling-items lane arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, difficulty, collisions, session state)
//! - `renderer`: Backend-agnostic scene drawing (Canvas 2D on web)
//! - `input`: Keyboard/touch mapping to driving intent
//! - `persistence`: Key-value storage for leaderboard and settings
//! - `tuning`: Data-driven game balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field dimensions (logical pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Height of the band at the bottom the player is confined to
    pub const PLAYER_BAND_HEIGHT: f32 = 160.0;

    /// Falling object size
    pub const OBJECT_SIZE: f32 = 40.0;

    /// Lives at session start
    pub const START_LIVES: u8 = 3;
    /// Points per collected product
    pub const PRODUCT_POINTS: u64 = 10;
}
