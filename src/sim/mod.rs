//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only (the platform feeds elapsed milliseconds)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod layout;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use input::{Direction, move_player};
pub use layout::Layout;
pub use schedule::{Scheduler, TimerHandle};
pub use session::{Session, Task};
pub use state::{GameEvent, GamePhase, GameState, Lane, Obstacle, ObstacleId, Player};
pub use tick::{first_collision, spawn_obstacle, spawn_obstacle_in, tick};
