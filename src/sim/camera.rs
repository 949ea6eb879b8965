//! Viewport that tracks the skier down the slope

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::tuning::ViewTuning;

/// `pos` is the top-left corner of the view in world space
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Player is kept this fraction of the height below the top edge
    pub player_screen_y: f32,
    /// Extra margin for `is_visible`
    pub cull_margin: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        let view = ViewTuning::default();
        Self {
            pos: Vec2::ZERO,
            width,
            height,
            player_screen_y: view.player_screen_y,
            cull_margin: view.cull_margin,
        }
    }

    pub fn with_view(mut self, view: &ViewTuning) -> Self {
        self.player_screen_y = view.player_screen_y;
        self.cull_margin = view.cull_margin;
        self
    }

    /// Center horizontally on `target`, keep it 30% down the view
    pub fn follow(&mut self, target: Vec2) {
        self.pos.x = target.x - self.width / 2.0;
        self.pos.y = target.y - self.height * self.player_screen_y;
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.pos
    }

    /// Whether a box centered at `center` overlaps the view plus margin
    pub fn is_visible(&self, center: Vec2, size: Vec2) -> bool {
        let m = self.cull_margin;
        let half = size * 0.5;
        center.x + half.x > self.pos.x - m
            && center.x - half.x < self.pos.x + self.width + m
            && center.y + half.y > self.pos.y - m
            && center.y - half.y < self.pos.y + self.height + m
    }

    pub fn top_edge(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom_edge(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}
