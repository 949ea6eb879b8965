//! The skier: steering, jumps and tricks, crashes
//!
//! A four-state machine driven once per frame by [`Player::update`]. Velocity
//! is derived from one of seven discrete headings every frame rather than
//! integrated, which keeps steering snappy and predictable.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{Body, Entity, draw_bound_sprite};
use super::play::{Swipe, TickInput};
use crate::assets::Assets;
use crate::consts::{PIXELS_PER_METER, TRAIL_LENGTH};
use crate::lerp;
use crate::renderer::{Canvas, colors};
use crate::tuning::PlayerTuning;

/// Discrete heading, left-most first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    LeftFast,
    Left,
    LeftSlight,
    Down,
    RightSlight,
    Right,
    RightFast,
}

impl Direction {
    pub const ALL: [Direction; 7] = [
        Direction::LeftFast,
        Direction::Left,
        Direction::LeftSlight,
        Direction::Down,
        Direction::RightSlight,
        Direction::Right,
        Direction::RightFast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Radians from straight downhill, positive to the right
    pub fn angle(self) -> f32 {
        match self {
            Direction::LeftFast => -PI / 2.0,
            Direction::Left => -PI / 3.0,
            Direction::LeftSlight => -PI / 6.0,
            Direction::Down => 0.0,
            Direction::RightSlight => PI / 6.0,
            Direction::Right => PI / 3.0,
            Direction::RightFast => PI / 2.0,
        }
    }

    /// The sideways stall headings
    pub fn is_extreme(self) -> bool {
        matches!(self, Direction::LeftFast | Direction::RightFast)
    }

    pub fn step_left(self) -> Self {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn step_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// One notch back toward `Down`
    pub fn relax(self) -> Self {
        match self.cmp(&Direction::Down) {
            std::cmp::Ordering::Less => self.step_right(),
            std::cmp::Ordering::Greater => self.step_left(),
            std::cmp::Ordering::Equal => self,
        }
    }

    fn sprite_key(self) -> &'static str {
        match self {
            Direction::LeftFast => "player_dir_0",
            Direction::Left => "player_dir_1",
            Direction::LeftSlight => "player_dir_2",
            Direction::Down => "player_dir_3",
            Direction::RightSlight => "player_dir_4",
            Direction::Right => "player_dir_5",
            Direction::RightFast => "player_dir_6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Skiing,
    Jumping,
    Crashing,
    /// Terminal: the boss got us
    Caught,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub velocity: Vec2,
    pub speed: f32,
    pub direction: Direction,
    pub state: PlayerState,

    /// Height off the snow, negative while above it
    pub air_height: f32,
    pub air_velocity: f32,
    pub on_ground: bool,

    /// Degrees accumulated on the flip axis (up/down held)
    pub flip_rotation: f32,
    /// Degrees accumulated on the spin axis (left/right held)
    pub spin_rotation: f32,
    pub flips: u32,
    pub spins: u32,
    pending_trick_points: u64,

    pub crash_timer: f32,
    pub invincible_timer: f32,
    pub boosting: bool,

    /// Recent positions, newest first
    pub trail: Vec<Vec2>,

    tuning: PlayerTuning,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        let mut body = Body::new(Vec2::new(tuning.width, tuning.height));
        body.place(pos, Vec2::new(tuning.width, tuning.height));
        Self {
            body,
            velocity: Vec2::new(0.0, tuning.base_speed),
            speed: tuning.base_speed,
            direction: Direction::Down,
            state: PlayerState::Skiing,
            air_height: 0.0,
            air_velocity: 0.0,
            on_ground: true,
            flip_rotation: 0.0,
            spin_rotation: 0.0,
            flips: 0,
            spins: 0,
            pending_trick_points: 0,
            crash_timer: 0.0,
            invincible_timer: 0.0,
            boosting: false,
            trail: Vec::with_capacity(TRAIL_LENGTH + 1),
            tuning: tuning.clone(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &TickInput) {
        match self.state {
            PlayerState::Skiing => self.update_skiing(dt, input),
            PlayerState::Jumping => self.update_jumping(dt, input),
            PlayerState::Crashing => self.update_crashing(dt),
            PlayerState::Caught => {}
        }

        if self.invincible_timer > 0.0 {
            self.invincible_timer -= dt;
        }

        self.record_trail();
    }

    fn update_skiing(&mut self, dt: f32, input: &TickInput) {
        let t = &self.tuning;

        self.boosting = input.boost;
        let target = if self.boosting {
            t.boost_speed
        } else {
            t.base_speed
        };
        self.speed = lerp(self.speed, target, dt * t.speed_blend_rate);

        let swipe = input.swipe;
        self.direction = if input.left || swipe == Some(Swipe::Left) {
            self.direction.step_left()
        } else if input.right || swipe == Some(Swipe::Right) {
            self.direction.step_right()
        } else {
            self.direction.relax()
        };

        let angle = self.direction.angle();
        self.velocity = Vec2::new(angle.sin(), angle.cos()) * self.speed;
        if self.direction.is_extreme() {
            self.velocity.y *= t.stall_forward_factor;
            self.velocity.x = self.velocity.x.signum() * self.speed * t.stall_lateral_factor;
        }

        self.body.pos += self.velocity * dt;

        if input.jump {
            let velocity = t.jump_velocity;
            self.start_jump(velocity);
        }
    }

    fn update_jumping(&mut self, dt: f32, input: &TickInput) {
        let t = &self.tuning;

        self.air_velocity += t.gravity * dt;
        self.air_height += self.air_velocity * dt;

        if input.up || input.down {
            self.flip_rotation += t.flip_rate * dt;
        }
        if input.left || input.right {
            self.spin_rotation += t.spin_rate * dt;
        }
        self.flips = self.flips.max((self.flip_rotation / 360.0).floor() as u32);
        self.spins = self.spins.max((self.spin_rotation / 360.0).floor() as u32);

        self.body.pos.x += self.velocity.x * dt * t.air_control;
        self.body.pos.y += self.velocity.y * dt;

        if self.air_height >= 0.0 && self.air_velocity > 0.0 {
            self.land();
        }
    }

    fn land(&mut self) {
        self.air_height = 0.0;
        self.air_velocity = 0.0;
        self.on_ground = true;
        self.state = PlayerState::Skiing;

        self.pending_trick_points = self.flips as u64 * self.tuning.flip_points
            + self.spins as u64 * self.tuning.spin_points;
        if self.pending_trick_points > 0 {
            log::debug!(
                "Landed {} flips, {} spins: {} pts",
                self.flips,
                self.spins,
                self.pending_trick_points
            );
        }
        self.reset_tricks();
    }

    fn update_crashing(&mut self, dt: f32) {
        let t = &self.tuning;

        self.crash_timer -= dt;
        self.velocity.x = 0.0;
        self.velocity.y = lerp(self.velocity.y, 0.0, dt * t.crash_decel_rate);
        self.body.pos.y += self.velocity.y * dt * t.crash_slide_factor;

        if self.crash_timer <= 0.0 {
            self.state = PlayerState::Skiing;
            self.invincible_timer = t.invincible_duration;
            self.speed = t.base_speed * t.recovery_speed_factor;
        }
    }

    fn reset_tricks(&mut self) {
        self.flip_rotation = 0.0;
        self.spin_rotation = 0.0;
        self.flips = 0;
        self.spins = 0;
    }

    fn take_off(&mut self, velocity: f32) {
        self.state = PlayerState::Jumping;
        self.on_ground = false;
        self.air_velocity = velocity;
        // Start just above the snow so the landing test cannot fire at once
        self.air_height = -1.0;
        self.reset_tricks();
    }

    /// Jump with `velocity` (negative = upward). Fails unless grounded.
    pub fn start_jump(&mut self, velocity: f32) -> bool {
        if !self.on_ground || self.state != PlayerState::Skiing {
            return false;
        }
        self.take_off(velocity);
        true
    }

    /// Ramp launch: starts a jump whatever the vertical state
    pub fn launch_from_ramp(&mut self) {
        if self.state == PlayerState::Caught {
            return;
        }
        let velocity = self.tuning.ramp_launch_velocity;
        self.take_off(velocity);
    }

    /// Enter the crash state. Rejected while invincible, airborne, already
    /// crashing or caught.
    pub fn crash(&mut self) -> bool {
        match self.state {
            PlayerState::Skiing if self.invincible_timer <= 0.0 => {}
            _ => return false,
        }
        self.state = PlayerState::Crashing;
        self.crash_timer = self.tuning.crash_duration;
        self.pending_trick_points = 0;
        true
    }

    pub fn catch_player(&mut self) {
        self.state = PlayerState::Caught;
        self.velocity = Vec2::ZERO;
    }

    /// Drain banked trick points (a second call returns zero)
    pub fn collect_trick_points(&mut self) -> u64 {
        std::mem::take(&mut self.pending_trick_points)
    }

    pub fn distance_meters(&self) -> f32 {
        self.body.pos.y / PIXELS_PER_METER
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    fn record_trail(&mut self) {
        self.trail.insert(0, self.body.pos);
        self.trail.truncate(TRAIL_LENGTH);
    }

    pub fn sprite_key(&self) -> &'static str {
        match self.state {
            PlayerState::Jumping => "player_jump",
            PlayerState::Crashing => "player_crash",
            PlayerState::Caught => "player_caught",
            PlayerState::Skiing => self.direction.sprite_key(),
        }
    }

    /// Blink off on alternate tenths of a second while invincible
    fn blinked_out(&self) -> bool {
        self.is_invincible() && ((self.invincible_timer * 10.0).floor() as i32) % 2 == 0
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let body_color = if self.boosting {
            colors::GOLD
        } else {
            match self.state {
                PlayerState::Crashing => colors::CRASH_ORANGE,
                PlayerState::Caught => colors::MUTED,
                _ => colors::ACCENT_RED,
            }
        };

        // Trick rotation is applied to the offsets by hand
        let turn = if self.state == PlayerState::Jumping {
            Vec2::from_angle((self.flip_rotation + self.spin_rotation).to_radians())
        } else {
            Vec2::X
        };
        let at = |offset: Vec2| screen + turn.rotate(offset);

        canvas.fill_ellipse(at(Vec2::new(0.0, -4.0)), Vec2::new(12.0, 18.0), body_color);
        canvas.fill_circle(at(Vec2::new(0.0, -20.0)), 8.0, colors::GOLD);

        let angle = self.direction.angle();
        let ski = Vec2::new(angle.sin() * 22.0, angle.cos() * 6.0);
        for x in [-6.0, 6.0] {
            let root = Vec2::new(x, 14.0);
            canvas.stroke_line(at(root), at(root + ski), 3.0, colors::DARK);
        }

        if self.boosting {
            for i in 0..3 {
                let mut spark = colors::GOLD;
                spark[3] = 0.6 - i as f32 * 0.2;
                canvas.fill_circle(
                    at(Vec2::new((i as f32 - 1.0) * 6.0, -30.0 - i as f32 * 4.0)),
                    3.0 - i as f32,
                    spark,
                );
            }
        }
    }

    fn render(&self, camera: &Camera, canvas: &mut dyn Canvas, assets: &dyn Assets) {
        if !self.body.active {
            return;
        }
        let screen = camera.world_to_screen(self.body.pos);
        let draw_at = screen + Vec2::new(0.0, self.air_height);

        if !self.on_ground {
            canvas.fill_ellipse(
                screen + Vec2::new(0.0, self.body.size.y / 3.0),
                Vec2::new(self.body.size.x / 2.5, 6.0),
                colors::SHADOW,
            );
        }

        if self.blinked_out() {
            return;
        }

        let key = Some(self.sprite_key());
        if !draw_bound_sprite(key, canvas, assets, draw_at, self.body.size) {
            self.render_placeholder(canvas, draw_at);
        }
    }
}
