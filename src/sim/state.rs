//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Timers armed, obstacles falling
    Running,
    /// Collision happened (or the game was never started)
    #[default]
    Stopped,
}

/// One of the three lanes, always in range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Lane(u8);

impl Lane {
    pub const LEFT: Lane = Lane(0);
    pub const CENTER: Lane = Lane(1);
    pub const RIGHT: Lane = Lane(LANE_COUNT - 1);

    /// All lanes, left to right
    pub const ALL: [Lane; LANE_COUNT as usize] = [Lane::LEFT, Lane::CENTER, Lane::RIGHT];

    pub fn new(index: u8) -> Option<Self> {
        (index < LANE_COUNT).then_some(Lane(index))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Lane to the left, clamped at the edge
    pub fn left(self) -> Self {
        Lane(self.0.saturating_sub(1))
    }

    /// Lane to the right, clamped at the edge
    pub fn right(self) -> Self {
        Lane((self.0 + 1).min(LANE_COUNT - 1))
    }
}

impl TryFrom<u8> for Lane {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Lane::new(index).ok_or_else(|| format!("lane index {} out of range", index))
    }
}

impl From<Lane> for u8 {
    fn from(lane: Lane) -> u8 {
        lane.0
    }
}

/// The player's runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub lane: Lane,
}

impl Default for Player {
    fn default() -> Self {
        Self { lane: Lane::CENTER }
    }
}

/// Opaque handle identifying an obstacle across ticks (and its visual)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub lane: Lane,
    /// Pixels from the top of the play area (negative while above it)
    pub top: f32,
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A run began; all previous visuals are stale
    Started,
    PlayerMoved { lane: Lane },
    ObstacleSpawned { id: ObstacleId, lane: Lane },
    /// Obstacle left the bottom of the play area
    ObstacleRemoved { id: ObstacleId },
    ScoreChanged { score: u32 },
    /// Speed and spawn interval after a difficulty step
    DifficultyIncreased { speed: f32, spawn_interval_ms: u64 },
    Collision { id: ObstacleId },
    GameOver { score: u32 },
}

/// Complete session state (everything `start()` resets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Obstacles that passed the player this run
    pub score: u32,
    /// Current fall speed (px per tick)
    pub speed: f32,
    /// Current delay between spawns (ms), read when the spawner re-arms
    pub spawn_interval_ms: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Unordered; removal iterates in reverse
    pub obstacles: Vec<Obstacle>,
    /// Ticks processed this run
    pub time_ticks: u64,
    /// Pending notifications for the renderer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// A stopped state with base difficulty
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            speed: tuning.base_speed,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
            phase: GamePhase::Stopped,
            player: Player::default(),
            obstacles: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reset everything to base values. Ids keep counting so stale visuals
    /// from the previous run can never alias a new obstacle.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.speed = tuning.base_speed;
        self.spawn_interval_ms = tuning.base_spawn_interval_ms;
        self.player = Player::default();
        self.obstacles.clear();
        self.time_ticks = 0;
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
