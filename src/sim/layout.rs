//! Play area geometry
//!
//! Lanes split the play area into equal thirds. The player sits near the
//! bottom edge; obstacles drop from just above the top edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{Lane, Obstacle};
use crate::consts::*;

/// Pixel dimensions of the play area and its sprites
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_margin: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
        }
    }
}

impl Layout {
    /// Layout for a measured play area; non-positive measurements fall back
    /// to the defaults.
    pub fn measured(width: f32, height: f32, player_width: f32, player_height: f32) -> Self {
        let pick = |value: f32, fallback: f32| if value > 0.0 { value } else { fallback };
        Self {
            width: pick(width, PLAY_AREA_WIDTH),
            height: pick(height, PLAY_AREA_HEIGHT),
            player_width: pick(player_width, PLAYER_WIDTH),
            player_height: pick(player_height, PLAYER_HEIGHT),
            ..Default::default()
        }
    }

    pub fn lane_width(&self) -> f32 {
        self.width / LANE_COUNT as f32
    }

    /// Player left offsets, one per lane
    pub fn player_lefts(&self) -> [f32; LANE_COUNT as usize] {
        let lane_width = self.lane_width();
        let half_player = self.player_width / 2.0;
        [
            lane_width / 2.0 - half_player,
            self.width / 2.0 - half_player,
            self.width - lane_width / 2.0 - half_player,
        ]
    }

    pub fn player_left(&self, lane: Lane) -> f32 {
        self.player_lefts()[lane.index()]
    }

    pub fn player_top(&self) -> f32 {
        self.height - self.player_height - self.player_bottom_margin
    }

    /// Where a new obstacle starts: fully hidden above the top edge
    pub fn obstacle_spawn_top(&self) -> f32 {
        -self.obstacle_height
    }

    pub fn obstacle_left(&self, lane: Lane) -> f32 {
        let lane_width = self.lane_width();
        lane.index() as f32 * lane_width + lane_width / 2.0 - self.obstacle_width / 2.0
    }

    pub fn player_box(&self, lane: Lane) -> Aabb {
        Aabb::from_origin_size(
            Vec2::new(self.player_left(lane), self.player_top()),
            Vec2::new(self.player_width, self.player_height),
        )
    }

    pub fn obstacle_box(&self, obstacle: &Obstacle) -> Aabb {
        Aabb::from_origin_size(
            Vec2::new(self.obstacle_left(obstacle.lane), obstacle.top),
            Vec2::new(self.obstacle_width, self.obstacle_height),
        )
    }

    /// True once an obstacle's top edge has passed the bottom of the play area
    pub fn is_past_bottom(&self, obstacle: &Obstacle) -> bool {
        obstacle.top > self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ObstacleId;

    #[test]
    fn test_player_lefts_center_in_lanes() {
        let layout = Layout::default();
        // 300 wide, 50 wide player: lane centers at 50, 150, 250
        assert_eq!(layout.player_lefts(), [25.0, 125.0, 225.0]);
    }

    #[test]
    fn test_obstacle_left_centers_in_lane() {
        let layout = Layout::default();
        assert_eq!(layout.obstacle_left(Lane::LEFT), 20.0);
        assert_eq!(layout.obstacle_left(Lane::CENTER), 120.0);
        assert_eq!(layout.obstacle_left(Lane::RIGHT), 220.0);
    }

    #[test]
    fn test_obstacle_and_player_share_lane_centers() {
        let layout = Layout::default();
        for lane in Lane::ALL {
            let player_center = layout.player_left(lane) + layout.player_width / 2.0;
            let obstacle_center = layout.obstacle_left(lane) + layout.obstacle_width / 2.0;
            assert!((player_center - obstacle_center).abs() < 1e-4);
        }
    }

    #[test]
    fn test_measured_falls_back_on_zero() {
        let layout = Layout::measured(0.0, 600.0, 0.0, 40.0);
        assert_eq!(layout.width, PLAY_AREA_WIDTH);
        assert_eq!(layout.height, 600.0);
        assert_eq!(layout.player_width, PLAYER_WIDTH);
        assert_eq!(layout.player_height, 40.0);
    }

    #[test]
    fn test_spawn_top_is_hidden() {
        let layout = Layout::default();
        let obstacle = Obstacle {
            id: ObstacleId(1),
            lane: Lane::CENTER,
            top: layout.obstacle_spawn_top(),
        };
        assert_eq!(obstacle.top, -60.0);
        assert!(layout.obstacle_box(&obstacle).max.y <= 0.0);
        assert!(!layout.is_past_bottom(&obstacle));
    }
}
