//! Endless slope streaming
//!
//! Content is generated in horizontal bands just below the camera and
//! recycled once it scrolls out above. The generator owns one pool per
//! entity variant; nothing else changes pool membership except the play
//! session's collision step.

use glam::Vec2;

use super::camera::Camera;
use super::entity::{Collectible, Gate, Npc, NpcKind, Obstacle, ObstacleKind, Ramp, TokenKind};
use super::play::GameMode;
use super::pool::ObjectPool;
use super::rng::{GameRng, RandomSource, seeded};
use crate::consts::{CANVAS_WIDTH, PIXELS_PER_METER};
use crate::tuning::{GameConfig, SlalomTuning, TerrainTuning};

/// Initial pool sizes
const OBSTACLE_POOL: usize = 30;
const COLLECTIBLE_POOL: usize = 20;
const RAMP_POOL: usize = 10;
const NPC_POOL: usize = 15;
const GATE_POOL: usize = 25;

/// Deterministic weave of gate `index` plus its jitter.
///
/// `jitter_roll` is a uniform draw in `[0, 1)`; 0.5 gives no jitter.
pub fn gate_offset(index: u32, jitter_roll: f32, slalom: &SlalomTuning) -> f32 {
    (index as f32 * slalom.weave_frequency).sin() * slalom.weave_amplitude
        + (jitter_roll - 0.5) * slalom.jitter
}

pub struct TerrainGenerator {
    pub mode: GameMode,
    /// Furthest world Y generated so far
    pub last_generated_y: f32,

    pub obstacles: ObjectPool<Obstacle>,
    pub collectibles: ObjectPool<Collectible>,
    pub ramps: ObjectPool<Ramp>,
    pub npcs: ObjectPool<Npc>,
    pub gates: ObjectPool<Gate>,

    /// Placements still near the play area, for spacing checks
    recent: Vec<Vec2>,

    pub difficulty: f32,
    /// World X that band lanes are centered on
    pub lane_center_x: f32,

    pub gates_generated: u32,
    pub total_gates: u32,
    /// Slalom: no obstacles, ramps or NPCs above this Y
    pub safe_zone_end: f32,

    rng: GameRng,
    terrain: TerrainTuning,
    slalom: SlalomTuning,
}

impl TerrainGenerator {
    pub fn new(mode: GameMode, config: &GameConfig, seed: u64) -> Self {
        Self {
            mode,
            last_generated_y: 0.0,
            obstacles: ObjectPool::new(Obstacle::new, OBSTACLE_POOL),
            collectibles: ObjectPool::new(Collectible::new, COLLECTIBLE_POOL),
            ramps: ObjectPool::new(Ramp::new, RAMP_POOL),
            npcs: ObjectPool::new(Npc::new, NPC_POOL),
            gates: ObjectPool::new(Gate::new, GATE_POOL),
            recent: Vec::new(),
            difficulty: 1.0,
            lane_center_x: CANVAS_WIDTH / 2.0,
            gates_generated: 0,
            total_gates: config.slalom.gate_count,
            safe_zone_end: f32::NEG_INFINITY,
            rng: seeded(seed),
            terrain: config.terrain.clone(),
            slalom: config.slalom.clone(),
        }
    }

    /// Lay out the opening stretch (and the whole gate course in slalom)
    pub fn generate_initial(&mut self, camera: &Camera) {
        self.last_generated_y = camera.top_edge();
        self.lane_center_x = camera.center_x();

        if self.mode == GameMode::Slalom {
            self.generate_slalom_course(camera);
        }

        for _ in 0..self.terrain.initial_bands {
            self.advance_band();
        }
        log::debug!(
            "Initial terrain to y={:.0}: {} obstacles, {} collectibles",
            self.last_generated_y,
            self.obstacles.active_count(),
            self.collectibles.active_count()
        );
    }

    /// Keep the frontier a lookahead past the bottom of the view
    pub fn generate_ahead(&mut self, camera: &Camera) {
        self.lane_center_x = camera.center_x();

        let threshold = camera.bottom_edge() + self.terrain.lookahead;
        let mut bands = 0;
        while self.last_generated_y < threshold {
            self.advance_band();
            bands += 1;
        }
        if bands > 1 {
            log::debug!("Generated {} bands to y={:.0}", bands, self.last_generated_y);
        }

        let meters = camera.top_edge() / PIXELS_PER_METER;
        self.difficulty = 1.0 + meters * self.terrain.difficulty_per_meter;
    }

    /// Recycle everything that scrolled out above the view. Gates stay for
    /// course bookkeeping.
    pub fn despawn_behind(&mut self, camera: &Camera) {
        let line = camera.top_edge() - self.terrain.despawn_margin;

        self.obstacles.release_where(|e| e.body.pos.y < line);
        self.collectibles.release_where(|e| e.body.pos.y < line);
        self.ramps.release_where(|e| e.body.pos.y < line);
        self.npcs.release_where(|e| e.body.pos.y < line);

        self.recent.retain(|p| p.y > line);
    }

    fn advance_band(&mut self) {
        let from = self.last_generated_y;
        let to = from + self.terrain.band_height;
        self.generate_band(from, to);
        self.last_generated_y = to;
    }

    fn in_safe_zone(&self, from_y: f32) -> bool {
        self.mode == GameMode::Slalom && from_y < self.safe_zone_end
    }

    fn generate_band(&mut self, from_y: f32, to_y: f32) {
        let t = self.terrain.clone();
        let band = to_y - from_y;
        let lane_width = CANVAS_WIDTH * t.lane_width_factor;
        let center = self.lane_center_x;
        let safe = self.in_safe_zone(from_y);

        if !safe {
            let count =
                (self.rng.range(t.obstacles_min, t.obstacles_max) * self.difficulty).floor() as u32;
            for _ in 0..count {
                let pos = Vec2::new(
                    self.rng.range(center - lane_width / 2.0, center + lane_width / 2.0),
                    self.rng.range(from_y, to_y),
                );
                let kind = ObstacleKind::from_roll(self.rng.unit());
                if self.claim(pos) {
                    self.obstacles.acquire().init(pos, kind);
                }
            }
        }

        // Tokens are allowed even in the safe zone
        if self.rng.chance(t.collectible_density * band * 3.0) {
            let pos = self.inner_lane_point(center, lane_width, from_y, to_y);
            let kind = if self.rng.chance(t.rare_token_chance) {
                TokenKind::Rare
            } else {
                TokenKind::Common
            };
            if self.claim(pos) {
                self.collectibles.acquire().init(pos, kind, &mut self.rng);
            }
        }

        if self.rng.chance(t.line_chance) {
            let start = Vec2::new(
                self.rng.range(center - 200.0, center + 200.0),
                self.rng.range(from_y, to_y),
            );
            let count = self.rng.int_inclusive(t.line_min, t.line_max);
            let dx = self.rng.range(-15.0, 15.0);
            for i in 0..count {
                let pos = start + Vec2::new(dx * i as f32, t.line_step_y * i as f32);
                if self.claim(pos) {
                    self.collectibles
                        .acquire()
                        .init(pos, TokenKind::Common, &mut self.rng);
                }
            }
        }

        if !safe && self.rng.chance(t.ramp_density * band) {
            let pos = self.inner_lane_point(center, lane_width, from_y, to_y);
            if self.claim(pos) {
                self.ramps.acquire().init(pos);
            }
        }

        if !safe && self.rng.chance(t.npc_density * band) {
            let pos = self.inner_lane_point(center, lane_width, from_y, to_y);
            let kind = self
                .rng
                .pick(&NpcKind::ALL)
                .copied()
                .unwrap_or(NpcKind::Benqi);
            if self.claim(pos) {
                self.npcs.acquire().init(pos, kind, &mut self.rng);
            }
        }
    }

    /// Random point in the middle two-thirds of the lane
    fn inner_lane_point(&mut self, center: f32, lane_width: f32, from_y: f32, to_y: f32) -> Vec2 {
        Vec2::new(
            self.rng.range(center - lane_width / 3.0, center + lane_width / 3.0),
            self.rng.range(from_y, to_y),
        )
    }

    /// Record `pos` as a placement unless it crowds an existing one
    fn claim(&mut self, pos: Vec2) -> bool {
        if self.is_too_close(pos) {
            return false;
        }
        self.recent.push(pos);
        true
    }

    fn is_too_close(&self, pos: Vec2) -> bool {
        let min_sq = self.terrain.min_spawn_distance * self.terrain.min_spawn_distance;
        self.recent.iter().any(|p| p.distance_squared(pos) < min_sq)
    }

    fn generate_slalom_course(&mut self, camera: &Camera) {
        let s = &self.slalom;
        let start_y = camera.top_edge() + s.course_start_offset;
        self.safe_zone_end = start_y + s.gate_spacing + s.safe_zone_extra;

        for i in 0..self.total_gates {
            let roll = self.rng.unit();
            let s = &self.slalom;
            let pos = Vec2::new(
                self.lane_center_x + gate_offset(i, roll, s),
                start_y + (i + 1) as f32 * s.gate_spacing,
            );
            let (width, height) = (s.gate_width, s.gate_height);
            self.gates.acquire().init(pos, i + 1, width, height);
            self.gates_generated += 1;
        }
        log::info!(
            "Slalom course: {} gates from y={:.0}",
            self.gates_generated,
            start_y
        );
    }

    /// Active entities across every variant
    pub fn active_count(&self) -> usize {
        self.obstacles.active_count()
            + self.collectibles.active_count()
            + self.ramps.active_count()
            + self.npcs.active_count()
            + self.gates.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn camera_at(y: f32) -> Camera {
        let mut camera = Camera::default();
        camera.follow(Vec2::new(400.0, y));
        camera
    }

    fn generator(mode: GameMode, seed: u64) -> TerrainGenerator {
        TerrainGenerator::new(mode, &GameConfig::default(), seed)
    }

    #[test]
    fn test_initial_frontier() {
        let camera = camera_at(100.0);
        let mut terrain = generator(GameMode::Freerun, 1);
        terrain.generate_initial(&camera);
        assert!(terrain.last_generated_y >= camera.top_edge() + 8.0 * 100.0);
        assert!(terrain.obstacles.active_count() > 0);
        assert_eq!(terrain.gates.active_count(), 0);
    }

    #[test]
    fn test_generate_ahead_reaches_lookahead() {
        let mut terrain = generator(GameMode::Freerun, 2);
        let mut camera = camera_at(100.0);
        terrain.generate_initial(&camera);
        camera.follow(Vec2::new(400.0, 5000.0));
        terrain.generate_ahead(&camera);
        assert!(terrain.last_generated_y >= camera.bottom_edge() + 300.0);
        assert!(terrain.difficulty > 1.0);
    }

    #[test]
    fn test_despawn_behind_spares_gates() {
        let mut terrain = generator(GameMode::Slalom, 3);
        let mut camera = camera_at(100.0);
        terrain.generate_initial(&camera);
        let gates = terrain.gates.active_count();

        camera.follow(Vec2::new(400.0, 100_000.0));
        terrain.despawn_behind(&camera);
        assert_eq!(terrain.obstacles.active_count(), 0);
        assert_eq!(terrain.collectibles.active_count(), 0);
        assert_eq!(terrain.ramps.active_count(), 0);
        assert_eq!(terrain.npcs.active_count(), 0);
        assert_eq!(terrain.gates.active_count(), gates);
        assert!(terrain.recent.is_empty());
    }

    #[test]
    fn test_spacing_is_respected() {
        let mut terrain = generator(GameMode::Freerun, 4);
        terrain.generate_initial(&camera_at(100.0));
        let points = &terrain.recent;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 60.0 - 1e-3);
            }
        }
    }

    #[test]
    fn test_claim_rejects_crowded_points() {
        let mut terrain = generator(GameMode::Freerun, 5);
        assert!(terrain.claim(Vec2::new(0.0, 0.0)));
        assert!(!terrain.claim(Vec2::new(59.0, 0.0)));
        assert!(terrain.claim(Vec2::new(60.0, 0.0)));

        let mut config = GameConfig::default();
        config.terrain.min_spawn_distance = 0.0;
        let mut loose = TerrainGenerator::new(GameMode::Freerun, &config, 5);
        assert!(loose.claim(Vec2::ZERO));
        assert!(loose.claim(Vec2::ZERO));
    }

    #[test]
    fn test_slalom_course_layout() {
        let camera = camera_at(100.0);
        let mut terrain = generator(GameMode::Slalom, 6);
        terrain.generate_initial(&camera);

        let slalom = SlalomTuning::default();
        assert_eq!(terrain.gates_generated, slalom.gate_count);
        assert_eq!(terrain.gates.active_count(), slalom.gate_count as usize);

        let start = camera.top_edge() + slalom.course_start_offset;
        assert_eq!(terrain.safe_zone_end, start + slalom.gate_spacing + slalom.safe_zone_extra);

        for (i, gate) in terrain.gates.active().enumerate() {
            assert_eq!(gate.number, i as u32 + 1);
            assert_eq!(gate.body.pos.y, start + (i + 1) as f32 * slalom.gate_spacing);
            let weave = gate_offset(i as u32, 0.5, &slalom);
            let jitter = gate.body.pos.x - 400.0 - weave;
            assert!(jitter.abs() <= slalom.jitter / 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_gate_offset_is_deterministic() {
        let slalom = SlalomTuning::default();
        assert_eq!(gate_offset(0, 0.5, &slalom), 0.0);
        let expected = 0.7f32.sin() * 80.0;
        assert!((gate_offset(1, 0.5, &slalom) - expected).abs() < 1e-4);
        assert!((gate_offset(1, 1.0, &slalom) - (expected + 20.0)).abs() < 1e-4);
        assert!((gate_offset(1, 0.0, &slalom) - (expected - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn test_safe_zone_is_clear() {
        let camera = camera_at(100.0);
        let mut terrain = generator(GameMode::Slalom, 7);
        terrain.generate_initial(&camera);
        let end = terrain.safe_zone_end;
        // Bands starting inside the zone are suppressed entirely
        let band_floor = ((end - camera.top_edge()) / 100.0).ceil() * 100.0 + camera.top_edge();
        assert!(terrain.obstacles.active().all(|o| o.body.pos.y >= band_floor - 1e-3));
        assert!(terrain.ramps.active().all(|r| r.body.pos.y >= band_floor - 1e-3));
        assert!(terrain.npcs.active().all(|n| n.body.pos.y >= band_floor - 1e-3));

        // Tokens still spawn inside the zone
        assert!(terrain.collectibles.active().any(|c| c.body.pos.y < end));
    }

    #[test]
    fn test_same_seed_same_slope() {
        let camera = camera_at(100.0);
        let mut a = generator(GameMode::Freerun, 99);
        let mut b = generator(GameMode::Freerun, 99);
        a.generate_initial(&camera);
        b.generate_initial(&camera);
        let xs = |t: &TerrainGenerator| t.obstacles.active().map(|o| o.body.pos).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    proptest! {
        #[test]
        fn prop_frontier_never_retreats(
            seed in any::<u64>(),
            steps in prop::collection::vec(0.0f32..400.0, 1..40),
        ) {
            let mut terrain = generator(GameMode::Freerun, seed);
            let mut y = 100.0;
            let mut camera = camera_at(y);
            terrain.generate_initial(&camera);
            let mut frontier = terrain.last_generated_y;

            for step in steps {
                y += step;
                camera.follow(Vec2::new(400.0, y));
                terrain.generate_ahead(&camera);
                terrain.despawn_behind(&camera);
                prop_assert!(terrain.last_generated_y >= frontier);
                prop_assert!(terrain.last_generated_y >= camera.bottom_edge() + 300.0);
                frontier = terrain.last_generated_y;
            }
        }
    }
}
