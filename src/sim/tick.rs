//! Fixed timestep simulation tick and obstacle spawning
//!
//! Both entry points are no-ops unless the game is running. Neither touches
//! timers: the session decides what to re-arm and when to stop.

use rand::Rng;

use super::layout::Layout;
use super::state::{GameEvent, GameState, Lane, Obstacle, ObstacleId};
use crate::tuning::Tuning;

/// Advance the game by one tick.
///
/// Moves every obstacle down by the current speed, retires the ones that left
/// the play area (scoring them), then checks the player against what's left.
/// Returns the first obstacle the player hit, if any.
pub fn tick(state: &mut GameState, tuning: &Tuning, layout: &Layout) -> Option<ObstacleId> {
    if !state.is_running() {
        return None;
    }

    state.time_ticks += 1;
    advance_obstacles(state, tuning, layout);

    let hit = first_collision(state, layout);
    if let Some(id) = hit {
        state.events.push(GameEvent::Collision { id });
    }
    hit
}

fn advance_obstacles(state: &mut GameState, tuning: &Tuning, layout: &Layout) {
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.top += speed;
    }

    // Reverse so removal doesn't shift unvisited entries
    for idx in (0..state.obstacles.len()).rev() {
        if !layout.is_past_bottom(&state.obstacles[idx]) {
            continue;
        }
        let passed = state.obstacles.remove(idx);
        state.events.push(GameEvent::ObstacleRemoved { id: passed.id });

        if state.is_running() {
            award_point(state, tuning);
        }
    }
}

fn award_point(state: &mut GameState, tuning: &Tuning) {
    state.score += 1;
    state.events.push(GameEvent::ScoreChanged { score: state.score });

    if state.score % tuning.points_per_level == 0 {
        state.speed += tuning.speed_increment;
        state.spawn_interval_ms = tuning.next_spawn_interval(state.spawn_interval_ms);
        log::debug!(
            "Difficulty up at score {}: speed {:.1}, spawn every {} ms",
            state.score,
            state.speed,
            state.spawn_interval_ms
        );
        state.events.push(GameEvent::DifficultyIncreased {
            speed: state.speed,
            spawn_interval_ms: state.spawn_interval_ms,
        });
    }
}

/// First obstacle overlapping the player, in collection order
pub fn first_collision(state: &GameState, layout: &Layout) -> Option<ObstacleId> {
    let player = layout.player_box(state.player.lane);
    state
        .obstacles
        .iter()
        .find(|obstacle| player.overlaps(&layout.obstacle_box(obstacle)))
        .map(|obstacle| obstacle.id)
}

/// Drop a new obstacle into a uniformly random lane
pub fn spawn_obstacle<R: Rng>(
    state: &mut GameState,
    layout: &Layout,
    rng: &mut R,
) -> Option<ObstacleId> {
    if !state.is_running() {
        return None;
    }
    let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
    spawn_obstacle_in(state, layout, lane)
}

/// Drop a new obstacle into `lane`, just above the visible area
pub fn spawn_obstacle_in(state: &mut GameState, layout: &Layout, lane: Lane) -> Option<ObstacleId> {
    if !state.is_running() {
        return None;
    }
    let id = state.next_obstacle_id();
    state.obstacles.push(Obstacle {
        id,
        lane,
        top: layout.obstacle_spawn_top(),
    });
    state.events.push(GameEvent::ObstacleSpawned { id, lane });
    Some(id)
}
