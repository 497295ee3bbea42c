//! Directional input

use super::state::{GameEvent, GameState};

/// A discrete lane-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Shift the player one lane, clamped to the outer lanes.
/// Returns true if the lane changed.
pub fn move_player(state: &mut GameState, direction: Direction) -> bool {
    if !state.is_running() {
        return false;
    }
    let current = state.player.lane;
    let next = match direction {
        Direction::Left => current.left(),
        Direction::Right => current.right(),
    };
    if next == current {
        return false;
    }
    state.player.lane = next;
    state.events.push(GameEvent::PlayerMoved { lane: next });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, Lane};
    use crate::tuning::Tuning;

    fn running() -> GameState {
        let mut state = GameState::new(&Tuning::default());
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("a"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("ArrowUp"), None);
        assert_eq!(Direction::from_key(" "), None);
    }

    #[test]
    fn test_left_clamps_at_edge() {
        let mut state = running();
        assert_eq!(state.player.lane, Lane::CENTER);
        assert!(move_player(&mut state, Direction::Left));
        assert_eq!(state.player.lane, Lane::LEFT);
        assert!(!move_player(&mut state, Direction::Left));
        assert_eq!(state.player.lane, Lane::LEFT);
    }

    #[test]
    fn test_right_clamps_at_edge() {
        let mut state = running();
        move_player(&mut state, Direction::Right);
        move_player(&mut state, Direction::Right);
        assert_eq!(state.player.lane, Lane::RIGHT);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PlayerMoved { lane: Lane::RIGHT }]
        );
    }

    #[test]
    fn test_ignored_when_stopped() {
        let mut state = GameState::new(&Tuning::default());
        assert!(!move_player(&mut state, Direction::Left));
        assert_eq!(state.player.lane, Lane::CENTER);
        assert!(state.events.is_empty());
    }
}
