//! Positional actors that populate the slope
//!
//! Every variant owns a [`Body`] (center position, extent, membership and
//! collision flags, optional sprite key) and implements [`Entity`] for the
//! shared update/render/bounds contract. Variants are recycled through
//! [`ObjectPool`](super::pool::ObjectPool), so each has an `init` that resets
//! it in place.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::pool::Poolable;
use super::rng::RandomSource;
use crate::assets::Assets;
use crate::renderer::Canvas;
use crate::renderer::colors;
use crate::tuning::ScoreTuning;

pub const COLLECTIBLE_SIZE: f32 = 28.0;
pub const RAMP_WIDTH: f32 = 52.0;
pub const RAMP_HEIGHT: f32 = 20.0;
pub const NPC_SIZE: f32 = 40.0;
pub const NPC_SPEED_MIN: f32 = 80.0;
pub const NPC_SPEED_MAX: f32 = 160.0;
pub const NPC_WOBBLE_MIN: f32 = 20.0;
pub const NPC_WOBBLE_MAX: f32 = 60.0;

/// Axis-aligned box described by its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Same center, extent multiplied by `scale`
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            center: self.center,
            size: self.size * scale,
        }
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// State shared by every entity variant
#[derive(Debug, Clone)]
pub struct Body {
    /// World-space center (y grows downhill)
    pub pos: Vec2,
    /// Collision and draw extent
    pub size: Vec2,
    /// Pool membership / visibility
    pub active: bool,
    /// Participates in collision tests
    pub collidable: bool,
    /// Asset key for the sprite; `None` draws the placeholder
    pub sprite: Option<&'static str>,
}

impl Body {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            active: false,
            collidable: true,
            sprite: None,
        }
    }

    /// Reset for reuse: new position and extent, active and collidable
    pub fn place(&mut self, pos: Vec2, size: Vec2) {
        self.pos = pos;
        self.size = size;
        self.active = true;
        self.collidable = true;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos, self.size)
    }
}

/// Shared contract for everything on the slope
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Advance self-animation
    fn update(&mut self, _dt: f32) {}

    fn bounds(&self) -> Bounds {
        self.body().bounds()
    }

    /// Procedural stand-in drawn when no sprite is available
    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2);

    /// Draw the sprite if the asset store has it, otherwise the placeholder
    fn render(&self, camera: &Camera, canvas: &mut dyn Canvas, assets: &dyn Assets) {
        let body = self.body();
        if !body.active {
            return;
        }
        let screen = camera.world_to_screen(body.pos);
        if !draw_bound_sprite(body.sprite, canvas, assets, screen, body.size) {
            self.render_placeholder(canvas, screen);
        }
    }
}

/// Draw the sprite bound to `key`. False when there is no key, the store
/// lacks it, or the canvas cannot texture it.
pub fn draw_bound_sprite(
    key: Option<&str>,
    canvas: &mut dyn Canvas,
    assets: &dyn Assets,
    center: Vec2,
    size: Vec2,
) -> bool {
    key.and_then(|key| assets.get(key))
        .is_some_and(|sprite| canvas.draw_sprite(sprite, center, size))
}

macro_rules! impl_poolable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Poolable for $ty {
                fn is_active(&self) -> bool {
                    self.body.active
                }
                fn set_active(&mut self, active: bool) {
                    self.body.active = active;
                }
            }
        )*
    };
}

impl_poolable!(Obstacle, Collectible, Ramp, Npc, Gate);

// --- Obstacles ---

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Tree,
    BlackHole,
    Snowbank,
}

impl ObstacleKind {
    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Tree => Vec2::new(36.0, 44.0),
            ObstacleKind::BlackHole => Vec2::new(40.0, 40.0),
            ObstacleKind::Snowbank => Vec2::new(48.0, 32.0),
        }
    }

    pub fn sprite_key(self) -> &'static str {
        match self {
            ObstacleKind::Tree => "obstacle_tree",
            ObstacleKind::BlackHole => "obstacle_blackhole",
            ObstacleKind::Snowbank => "obstacle_snowbank",
        }
    }

    /// Weighted pick: 60% tree, 20% snowbank, 20% black hole
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.60 {
            ObstacleKind::Tree
        } else if roll < 0.80 {
            ObstacleKind::Snowbank
        } else {
            ObstacleKind::BlackHole
        }
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub body: Body,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new() -> Self {
        Self {
            body: Body::new(ObstacleKind::Tree.size()),
            kind: ObstacleKind::Tree,
        }
    }

    pub fn init(&mut self, pos: Vec2, kind: ObstacleKind) {
        self.body.place(pos, kind.size());
        self.body.sprite = Some(kind.sprite_key());
        self.kind = kind;
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Obstacle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let (w, h) = (self.body.size.x, self.body.size.y);
        match self.kind {
            ObstacleKind::Tree => {
                // Trunk, then two stacked triangles
                canvas.fill_rect(
                    screen + Vec2::new(0.0, h * 0.4),
                    Vec2::new(w * 0.2, h * 0.2),
                    colors::TREE_TRUNK,
                );
                canvas.fill_triangle(
                    screen + Vec2::new(0.0, -h * 0.5),
                    screen + Vec2::new(-w * 0.4, h * 0.05),
                    screen + Vec2::new(w * 0.4, h * 0.05),
                    colors::TREE_TOP,
                );
                canvas.fill_triangle(
                    screen + Vec2::new(0.0, -h * 0.2),
                    screen + Vec2::new(-w * 0.5, h * 0.3),
                    screen + Vec2::new(w * 0.5, h * 0.3),
                    colors::ACCENT_RED,
                );
            }
            ObstacleKind::BlackHole => {
                let r = w * 0.5;
                canvas.fill_circle(screen, r * 1.3, colors::BLACK_HOLE_GLOW);
                canvas.fill_circle(screen, r, colors::BLACK_HOLE);
            }
            ObstacleKind::Snowbank => {
                canvas.fill_ellipse(screen, Vec2::new(w * 0.5, h * 0.5), colors::SNOW_SHADOW);
                canvas.fill_ellipse(
                    screen - Vec2::new(0.0, h * 0.1),
                    Vec2::new(w * 0.42, h * 0.36),
                    colors::SNOW_WHITE,
                );
            }
        }
    }
}

// --- Collectibles ---

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Common,
    Rare,
}

impl TokenKind {
    pub fn points(self, tuning: &ScoreTuning) -> u64 {
        match self {
            TokenKind::Common => tuning.common_token,
            TokenKind::Rare => tuning.rare_token,
        }
    }

    pub fn sprite_key(self) -> &'static str {
        match self {
            TokenKind::Common => "token_common",
            TokenKind::Rare => "token_rare",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub body: Body,
    pub kind: TokenKind,
    pub collected: bool,
    /// Hover animation phase
    pub anim_timer: f32,
    /// 0..1 progress of the pickup animation
    pub collect_anim: f32,
}

impl Collectible {
    pub fn new() -> Self {
        Self {
            body: Body::new(Vec2::splat(COLLECTIBLE_SIZE)),
            kind: TokenKind::Common,
            collected: false,
            anim_timer: 0.0,
            collect_anim: 0.0,
        }
    }

    pub fn init(&mut self, pos: Vec2, kind: TokenKind, rng: &mut impl RandomSource) {
        self.body.place(pos, Vec2::splat(COLLECTIBLE_SIZE));
        self.body.sprite = Some(kind.sprite_key());
        self.kind = kind;
        self.collected = false;
        self.collect_anim = 0.0;
        self.anim_timer = rng.range(0.0, std::f32::consts::TAU);
    }

    /// Mark as picked up. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.body.collidable = false;
        self.collect_anim = 0.0;
        true
    }

    /// Pickup animation has played out; ready to return to the pool
    pub fn is_finished(&self) -> bool {
        self.collected && self.collect_anim > 1.0
    }
}

impl Default for Collectible {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Collectible {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.anim_timer += dt * 3.0;
        if self.collected {
            self.collect_anim += dt * 4.0;
        }
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let r = self.body.size.x * 0.5;
        let (rim, face) = match self.kind {
            TokenKind::Common => (colors::WHITE, colors::ACCENT_RED),
            TokenKind::Rare => (colors::DARK, colors::GOLD),
        };
        canvas.fill_circle(screen, r, rim);
        canvas.fill_circle(screen, r * 0.8, face);
        canvas.fill_triangle(
            screen + Vec2::new(0.0, -r * 0.45),
            screen + Vec2::new(-r * 0.4, r * 0.35),
            screen + Vec2::new(r * 0.4, r * 0.35),
            rim,
        );
    }

    fn render(&self, camera: &Camera, canvas: &mut dyn Canvas, assets: &dyn Assets) {
        if !self.body.active {
            return;
        }
        let screen = camera.world_to_screen(self.body.pos);

        if self.collected {
            // Rising, fading glow
            let alpha = (1.0 - self.collect_anim).clamp(0.0, 1.0);
            let lift = Vec2::new(0.0, self.collect_anim * -30.0);
            let mut glow = match self.kind {
                TokenKind::Common => colors::ACCENT_RED,
                TokenKind::Rare => colors::GOLD,
            };
            glow[3] = alpha * 0.6;
            canvas.fill_circle(screen + lift, self.body.size.x * 0.5 + 5.0, glow);
            return;
        }

        let hover = screen + Vec2::new(0.0, self.anim_timer.sin() * 3.0);
        if !draw_bound_sprite(self.body.sprite, canvas, assets, hover, self.body.size) {
            self.render_placeholder(canvas, hover);
        }
    }
}

// --- Ramps ---

#[derive(Debug, Clone)]
pub struct Ramp {
    pub body: Body,
}

impl Ramp {
    pub fn new() -> Self {
        Self {
            body: Body::new(Vec2::new(RAMP_WIDTH, RAMP_HEIGHT)),
        }
    }

    pub fn init(&mut self, pos: Vec2) {
        self.body.place(pos, Vec2::new(RAMP_WIDTH, RAMP_HEIGHT));
        self.body.sprite = Some("ramp");
    }
}

impl Default for Ramp {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Ramp {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let half = self.body.size * 0.5;
        canvas.fill_rect(screen, self.body.size, colors::RAMP_SIDE);
        canvas.fill_triangle(
            screen + Vec2::new(-half.x, half.y),
            screen + Vec2::new(half.x, half.y),
            screen + Vec2::new(0.0, -half.y),
            colors::RAMP_TOP,
        );
    }
}

// --- NPC skiers ---

/// Rival skier liveries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpcKind {
    Benqi,
    Salvor,
    Blaze,
    Arena,
    YieldYak,
    Dokyo,
    Dexalot,
    Pangolin,
}

impl NpcKind {
    pub const ALL: [NpcKind; 8] = [
        NpcKind::Benqi,
        NpcKind::Salvor,
        NpcKind::Blaze,
        NpcKind::Arena,
        NpcKind::YieldYak,
        NpcKind::Dokyo,
        NpcKind::Dexalot,
        NpcKind::Pangolin,
    ];

    pub fn sprite_key(self) -> &'static str {
        match self {
            NpcKind::Benqi => "npc_benqi",
            NpcKind::Salvor => "npc_salvor",
            NpcKind::Blaze => "npc_blaze",
            NpcKind::Arena => "npc_arena",
            NpcKind::YieldYak => "npc_yieldyak",
            NpcKind::Dokyo => "npc_dokyo",
            NpcKind::Dexalot => "npc_dexalot",
            NpcKind::Pangolin => "npc_pangolin",
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            NpcKind::Benqi => [0.0, 0.82, 1.0, 1.0],
            NpcKind::Salvor => [1.0, 0.42, 0.21, 1.0],
            NpcKind::Blaze => [1.0, 0.27, 0.27, 1.0],
            NpcKind::Arena => [0.55, 0.36, 0.96, 1.0],
            NpcKind::YieldYak => [0.29, 0.87, 0.5, 1.0],
            NpcKind::Dokyo => [0.93, 0.28, 0.6, 1.0],
            NpcKind::Dexalot => [0.23, 0.51, 0.96, 1.0],
            NpcKind::Pangolin => [0.96, 0.62, 0.04, 1.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Npc {
    pub body: Body,
    pub kind: NpcKind,
    /// Downhill speed (pixels/s)
    pub speed: f32,
    pub wobble_timer: f32,
    pub wobble_amount: f32,
    /// Lane the wobble oscillates around
    pub base_x: f32,
}

impl Npc {
    pub fn new() -> Self {
        Self {
            body: Body::new(Vec2::splat(NPC_SIZE)),
            kind: NpcKind::Benqi,
            speed: NPC_SPEED_MIN,
            wobble_timer: 0.0,
            wobble_amount: NPC_WOBBLE_MIN,
            base_x: 0.0,
        }
    }

    pub fn init(&mut self, pos: Vec2, kind: NpcKind, rng: &mut impl RandomSource) {
        self.body.place(pos, Vec2::splat(NPC_SIZE));
        self.body.sprite = Some(kind.sprite_key());
        self.kind = kind;
        self.speed = rng.range(NPC_SPEED_MIN, NPC_SPEED_MAX);
        self.wobble_timer = rng.range(0.0, std::f32::consts::TAU);
        self.wobble_amount = rng.range(NPC_WOBBLE_MIN, NPC_WOBBLE_MAX);
        self.base_x = pos.x;
    }
}

impl Default for Npc {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Npc {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.pos.y += self.speed * dt;
        self.wobble_timer += dt * 2.0;
        self.body.pos.x = self.base_x + self.wobble_timer.sin() * self.wobble_amount;
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let color = self.kind.color();
        canvas.fill_ellipse(screen + Vec2::new(0.0, -2.0), Vec2::new(10.0, 15.0), color);
        canvas.fill_circle(screen + Vec2::new(0.0, -17.0), 7.0, colors::SKIN);
        canvas.stroke_line(
            screen + Vec2::new(-9.0, 14.0),
            screen + Vec2::new(-9.0, 20.0),
            3.0,
            colors::DARK,
        );
        canvas.stroke_line(
            screen + Vec2::new(9.0, 14.0),
            screen + Vec2::new(9.0, 20.0),
            3.0,
            colors::DARK,
        );
    }
}

// --- Slalom gates ---

/// Resolution of a slalom gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateStatus {
    Pending,
    Passed,
    Missed,
}

#[derive(Debug, Clone)]
pub struct Gate {
    pub body: Body,
    /// 1-based position in the course
    pub number: u32,
    pub status: GateStatus,
    /// Distance between the flags
    pub gate_width: f32,
}

impl Gate {
    pub fn new() -> Self {
        let mut body = Body::new(Vec2::new(120.0, 40.0));
        body.collidable = false;
        Self {
            body,
            number: 0,
            status: GateStatus::Pending,
            gate_width: 120.0,
        }
    }

    pub fn init(&mut self, pos: Vec2, number: u32, width: f32, height: f32) {
        self.body.place(pos, Vec2::new(width, height));
        // Gates never cause crashes
        self.body.collidable = false;
        self.body.sprite = None;
        self.number = number;
        self.status = GateStatus::Pending;
        self.gate_width = width;
    }

    pub fn is_resolved(&self) -> bool {
        self.status != GateStatus::Pending
    }

    /// True when `x` lies strictly between the flags
    pub fn contains_x(&self, x: f32) -> bool {
        (x - self.body.pos.x).abs() < self.gate_width / 2.0
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Gate {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn render_placeholder(&self, canvas: &mut dyn Canvas, screen: Vec2) {
        let half_w = self.gate_width / 2.0;
        let (flag, pole) = match self.status {
            GateStatus::Pending => (colors::ACCENT_RED, colors::WHITE),
            GateStatus::Passed => (colors::SUCCESS, colors::SUCCESS),
            GateStatus::Missed => (colors::MUTED, colors::MUTED),
        };
        for side in [-1.0, 1.0] {
            let base = screen + Vec2::new(side * half_w, 0.0);
            canvas.stroke_line(base + Vec2::new(0.0, 15.0), base - Vec2::new(0.0, 25.0), 3.0, pole);
            canvas.fill_triangle(
                base - Vec2::new(0.0, 25.0),
                base - Vec2::new(0.0, 13.0),
                base + Vec2::new(-side * 14.0, -19.0),
                flag,
            );
        }
        if self.status == GateStatus::Pending {
            // Faint lane between the flags
            let mut lane = colors::ACCENT_RED;
            lane[3] = 0.15;
            canvas.fill_rect(screen, Vec2::new(self.gate_width, 4.0), lane);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::seeded;

    #[test]
    fn test_bounds_strict_overlap() {
        let a = Bounds::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Bounds::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let overlapping = Bounds::new(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert_eq!(a.scaled(0.5).size, Vec2::splat(5.0));
    }

    #[test]
    fn test_obstacle_weights() {
        assert_eq!(ObstacleKind::from_roll(0.0), ObstacleKind::Tree);
        assert_eq!(ObstacleKind::from_roll(0.59), ObstacleKind::Tree);
        assert_eq!(ObstacleKind::from_roll(0.6), ObstacleKind::Snowbank);
        assert_eq!(ObstacleKind::from_roll(0.8), ObstacleKind::BlackHole);
        assert_eq!(ObstacleKind::from_roll(0.99), ObstacleKind::BlackHole);
    }

    #[test]
    fn test_obstacle_init_resets_in_place() {
        let mut obstacle = Obstacle::new();
        obstacle.body.collidable = false;
        obstacle.init(Vec2::new(5.0, 6.0), ObstacleKind::Snowbank);
        assert!(obstacle.body.active);
        assert!(obstacle.body.collidable);
        assert_eq!(obstacle.body.size, Vec2::new(48.0, 32.0));
        assert_eq!(obstacle.body.sprite, Some("obstacle_snowbank"));
    }

    #[test]
    fn test_collectible_collects_once() {
        let mut rng = seeded(3);
        let mut token = Collectible::new();
        token.init(Vec2::ZERO, TokenKind::Rare, &mut rng);

        assert!(token.collect());
        assert!(!token.body.collidable);
        assert!(!token.collect());

        assert!(!token.is_finished());
        for _ in 0..20 {
            token.update(0.05);
        }
        assert!(token.is_finished());

        // Reuse clears the pickup state
        token.init(Vec2::ONE, TokenKind::Common, &mut rng);
        assert!(!token.collected);
        assert!(token.body.collidable);
    }

    #[test]
    fn test_npc_skis_downhill_with_wobble() {
        let mut rng = seeded(11);
        let mut npc = Npc::new();
        npc.init(Vec2::new(100.0, 0.0), NpcKind::Dokyo, &mut rng);
        assert!((NPC_SPEED_MIN..NPC_SPEED_MAX).contains(&npc.speed));
        assert!((NPC_WOBBLE_MIN..NPC_WOBBLE_MAX).contains(&npc.wobble_amount));

        npc.update(1.0);
        assert!((npc.body.pos.y - npc.speed).abs() < 1e-3);
        assert!((npc.body.pos.x - 100.0).abs() <= npc.wobble_amount + 1e-3);
    }

    #[test]
    fn test_gate_is_not_collidable() {
        let mut gate = Gate::new();
        gate.init(Vec2::new(400.0, 500.0), 3, 120.0, 40.0);
        assert!(!gate.body.collidable);
        assert!(gate.contains_x(459.0));
        assert!(!gate.contains_x(460.0));
        assert!(!gate.is_resolved());
    }
}
