//! Lane Dodger - A three-lane obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timers, spawning, collisions, game state)
//! - `renderer`: Projection of game state onto positioned sprites (DOM on web)
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{Layout, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Number of lanes the player and obstacles can occupy
    pub const LANE_COUNT: u8 = 3;

    /// Default play area dimensions (used when the container can't be measured)
    pub const PLAY_AREA_WIDTH: f32 = 300.0;
    pub const PLAY_AREA_HEIGHT: f32 = 500.0;

    /// Player box defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player's bottom edge and the play area floor
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Obstacle box (matches the `.obstacle` stylesheet)
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;

    /// Longest wall-clock slice fed into the scheduler per frame (ms).
    /// A backgrounded tab resumes without flushing seconds of backlog.
    pub const MAX_FRAME_MS: f64 = 100.0;
}
