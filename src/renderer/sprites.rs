//! State-to-sprite projection

use glam::Vec2;

use crate::sim::{GameState, Layout, ObstacleId};

/// A positioned rectangle in play-area pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Sprite {
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub player: Sprite,
    /// In collection order
    pub obstacles: Vec<(ObstacleId, Sprite)>,
    pub score: u32,
    pub game_over: bool,
}

/// Project the current state onto the play area
pub fn project(state: &GameState, layout: &Layout) -> Frame {
    let player = Sprite {
        pos: Vec2::new(layout.player_left(state.player.lane), layout.player_top()),
        size: Vec2::new(layout.player_width, layout.player_height),
    };
    let obstacle_size = Vec2::new(layout.obstacle_width, layout.obstacle_height);
    let obstacles = state
        .obstacles
        .iter()
        .map(|o| {
            let pos = Vec2::new(layout.obstacle_left(o.lane), o.top);
            (o.id, Sprite { pos, size: obstacle_size })
        })
        .collect();

    Frame {
        player,
        obstacles,
        score: state.score,
        game_over: !state.is_running(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Lane, Session, spawn_obstacle_in};
    use crate::tuning::Tuning;

    #[test]
    fn test_projection_tracks_player_lane() {
        let mut session = Session::new(Tuning::default(), Layout::default(), 1);
        session.start();
        let frame = project(&session.state, session.layout());
        assert_eq!(frame.player.left(), 125.0);
        assert_eq!(frame.player.top(), 440.0);
        assert!(!frame.game_over);

        session.steer(Direction::Left);
        let frame = project(&session.state, session.layout());
        assert_eq!(frame.player.left(), 25.0);
    }

    #[test]
    fn test_projection_lists_obstacles() {
        let mut session = Session::new(Tuning::default(), Layout::default(), 1);
        session.start();
        let layout = *session.layout();
        let id = spawn_obstacle_in(&mut session.state, &layout, Lane::RIGHT).unwrap();

        let frame = project(&session.state, &layout);
        assert_eq!(frame.obstacles.len(), 1);
        let (sprite_id, sprite) = frame.obstacles[0];
        assert_eq!(sprite_id, id);
        assert_eq!(sprite.left(), 220.0);
        assert_eq!(sprite.top(), -60.0);
        assert_eq!(sprite.size, Vec2::new(60.0, 60.0));
    }

    #[test]
    fn test_stopped_session_projects_game_over() {
        let session = Session::new(Tuning::default(), Layout::default(), 1);
        let frame = project(&session.state, session.layout());
        assert!(frame.game_over);
        assert_eq!(frame.score, 0);
        assert!(frame.obstacles.is_empty());
    }
}
