//! The pursuer that appears once the run gets long

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::fair_overlap;
use super::entity::{Body, Entity, draw_bound_sprite};
use crate::assets::Assets;
use crate::consts::PIXELS_PER_METER;
use crate::renderer::{Canvas, colors};
use crate::tuning::BossTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    /// Off screen, not simulated
    Dormant,
    /// Closing in from above
    Approaching,
    /// Within striking range
    Chasing,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub body: Body,
    pub state: BossState,
    pub anim_timer: f32,
    tuning: BossTuning,
}

impl Boss {
    pub fn new(tuning: &BossTuning) -> Self {
        let mut body = Body::new(Vec2::new(tuning.width, tuning.height));
        body.sprite = Some("boss");
        Self {
            body,
            state: BossState::Dormant,
            anim_timer: 0.0,
            tuning: tuning.clone(),
        }
    }

    pub fn is_hunting(&self) -> bool {
        self.body.active && self.state != BossState::Dormant
    }

    /// Appear at `pos` and start closing in
    pub fn start_chase(&mut self, pos: Vec2) {
        self.body.place(pos, Vec2::new(self.tuning.width, self.tuning.height));
        self.state = BossState::Approaching;
        self.anim_timer = 0.0;
    }

    /// Leave the slope until triggered again
    pub fn retire(&mut self) {
        self.body.active = false;
        self.state = BossState::Dormant;
    }

    /// Move toward `target`, a little faster vertically
    pub fn pursue(&mut self, dt: f32, target: Vec2) {
        if !self.is_hunting() {
            return;
        }
        self.anim_timer += dt;

        let delta = target - self.body.pos;
        let dist = delta.length();
        if dist > 0.0 {
            let step = delta / dist * self.tuning.speed * dt;
            self.body.pos.x += step.x;
            self.body.pos.y += step.y * self.tuning.vertical_pursuit;
        }

        if self.state == BossState::Approaching && dist < self.tuning.chase_radius {
            self.state = BossState::Chasing;
        }
    }

    /// Capture test with the boss's own forgiving hitbox scale
    pub fn has_caught(&self, player: &Body) -> bool {
        if !self.is_hunting() || !player.active {
            return false;
        }
        fair_overlap(&self.body.bounds(), &player.bounds(), self.tuning.catch_scale)
    }

    /// How far (meters) the player is below the boss
    pub fn lead_meters(&self, player_pos: Vec2) -> f32 {
        (player_pos.y - self.body.pos.y) / PIXELS_PER_METER
    }
}

impl Entity for Boss {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let (w, h) = (self.body.size.x, self.body.size.y);
        let bob = (self.anim_timer * 5.0).sin() * 3.0;
        let c = screen + Vec2::new(0.0, bob);

        canvas.fill_ellipse(
            screen + Vec2::new(0.0, h / 2.0),
            Vec2::new(w / 2.5, 8.0),
            colors::SHADOW,
        );
        canvas.fill_ellipse(c, Vec2::new(w / 2.5, h / 2.5), colors::BOSS_SUIT);
        for x in [-w / 4.0, w / 4.0] {
            canvas.stroke_line(
                c + Vec2::new(x, -h / 4.0),
                c + Vec2::new(x, h / 4.0),
                3.0,
                colors::BOSS_ACCENT,
            );
        }

        let head = c - Vec2::new(0.0, h / 2.8);
        canvas.fill_circle(head, 14.0, colors::SKIN);
        let mut eye = colors::ALERT;
        if (self.anim_timer * 8.0).sin() <= 0.0 {
            eye[3] = 0.7;
        }
        canvas.fill_circle(head + Vec2::new(-5.0, -2.0), 3.0, eye);
        canvas.fill_circle(head + Vec2::new(5.0, -2.0), 3.0, eye);

        let mut aura = colors::BOSS_ACCENT;
        aura[3] = 0.1 + (self.anim_timer * 4.0).sin() * 0.05;
        canvas.stroke_circle(c, w / 2.0 + 5.0, 2.0, aura);
    }

    fn render(&self, camera: &Camera, canvas: &mut dyn Canvas, assets: &dyn Assets) {
        if !self.is_hunting() {
            return;
        }
        let screen = camera.world_to_screen(self.body.pos);
        if !draw_bound_sprite(self.body.sprite, canvas, assets, screen, self.body.size) {
            self.render_placeholder(canvas, screen);
        }
    }
}
