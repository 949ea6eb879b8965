//! One run down the mountain
//!
//! [`PlaySession::tick`] sequences everything that happens in a frame:
//! player physics, camera, terrain streaming, collisions, scoring, the boss
//! and slalom gates. The session never reads a clock; the caller passes the
//! (already clamped) frame delta.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::camera::Camera;
use super::collision::CollisionManager;
use super::entity::{Entity, GateStatus};
use super::player::{Player, PlayerState};
use super::score::ScoreBoard;
use super::terrain::TerrainGenerator;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::tuning::GameConfig;

/// Where the skier starts
const START_POS: Vec2 = Vec2::new(CANVAS_WIDTH / 2.0, 100.0);

const CRASH_SHAKE: f32 = 8.0;
const NPC_SHAKE: f32 = 5.0;
const GATE_MISS_SHAKE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Endless run for points
    Freerun,
    /// Gate course against the clock
    Slalom,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Freerun => "freerun",
            GameMode::Slalom => "slalom",
        }
    }

    /// Slalom is ranked by time, lower is better
    pub fn lower_is_better(self) -> bool {
        self == GameMode::Slalom
    }

    pub fn toggled(self) -> Self {
        match self {
            GameMode::Freerun => GameMode::Slalom,
            GameMode::Slalom => GameMode::Freerun,
        }
    }
}

/// Touch swipe direction past the dead zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
    Up,
    Down,
}

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pressed this frame
    pub jump: bool,
    /// Held
    pub boost: bool,
    /// Pressed this frame
    pub pause: bool,
    /// Pressed this frame
    pub confirm: bool,
    pub swipe: Option<Swipe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTone {
    Reward,
    Penalty,
    Warning,
}

/// Short-lived text shown over the slope
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub text: String,
    pub tone: PopupTone,
    /// Seconds left on screen
    pub timer: f32,
}

impl Popup {
    fn new(text: impl Into<String>, tone: PopupTone, timer: f32) -> Self {
        Self {
            text: text.into(),
            tone,
            timer,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.timer > 0.0
    }

    /// Fades out over the last second
    pub fn alpha(&self) -> f32 {
        self.timer.clamp(0.0, 1.0)
    }
}

/// What a finished run reports to the game-over screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub mode: GameMode,
    pub score: u64,
    /// Slalom run clock including penalties and bonus (seconds)
    pub time: f32,
    pub distance_m: f32,
    pub tokens: u32,
    pub best_combo: u32,
    pub gates_passed: u32,
    pub gates_missed: u32,
}

impl SessionSummary {
    /// The number this run is ranked by: points for freerun, time for slalom
    pub fn ranking_value(&self) -> f64 {
        match self.mode {
            GameMode::Freerun => self.score as f64,
            GameMode::Slalom => self.time as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Continue,
    /// Pause requested; nothing advanced
    Paused,
    Finished(SessionSummary),
}

pub struct PlaySession {
    pub mode: GameMode,
    pub player: Player,
    pub camera: Camera,
    pub terrain: TerrainGenerator,
    pub collision: CollisionManager,
    pub score: ScoreBoard,
    pub boss: Boss,

    /// Distance (m) at which the boss next appears
    pub next_boss_at: f32,
    pub bosses_escaped: u32,

    /// Session clock; after capture, time since capture
    pub game_time: f32,
    pub slalom_time: f32,
    pub gates_passed: u32,
    pub gates_missed: u32,
    pub slalom_finished: bool,

    pub screen_shake: f32,
    /// Event text (crash, pickup, gates, boss)
    pub event_popup: Option<Popup>,
    /// Trick landing text
    pub trick_popup: Option<Popup>,

    config: GameConfig,
}

impl PlaySession {
    pub fn new(mode: GameMode, config: &GameConfig, seed: u64) -> Self {
        let player = Player::new(START_POS, &config.player);
        let mut camera = Camera::default().with_view(&config.view);
        camera.follow(player.pos());

        let mut terrain = TerrainGenerator::new(mode, config, seed);
        terrain.generate_initial(&camera);

        log::info!("Session started: {} (seed {})", mode.as_str(), seed);

        Self {
            mode,
            player,
            camera,
            terrain,
            collision: CollisionManager::new(config.view.fairness_scale),
            score: ScoreBoard::new(&config.score),
            boss: Boss::new(&config.boss),
            next_boss_at: config.boss.trigger_distance,
            bosses_escaped: 0,
            game_time: 0.0,
            slalom_time: 0.0,
            gates_passed: 0,
            gates_missed: 0,
            slalom_finished: false,
            screen_shake: 0.0,
            event_popup: None,
            trick_popup: None,
            config: config.clone(),
        }
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> TickOutcome {
        if self.player.state == PlayerState::Caught {
            self.game_time += dt;
            if self.game_time > self.config.boss.game_over_delay {
                return TickOutcome::Finished(self.summary());
            }
            return TickOutcome::Continue;
        }
        if self.slalom_finished {
            return TickOutcome::Finished(self.summary());
        }
        if input.pause {
            return TickOutcome::Paused;
        }

        self.game_time += dt;
        if self.mode == GameMode::Slalom {
            self.slalom_time += dt;
        }

        self.player.update(dt, input);

        let tricks = self.player.collect_trick_points();
        if tricks > 0 {
            self.score.add_trick_points(tricks);
            self.trick_popup = Some(Popup::new(
                format!("+{} TRICK!", tricks),
                PopupTone::Reward,
                1.5,
            ));
        }

        self.camera.follow(self.player.pos());

        self.terrain.generate_ahead(&self.camera);
        self.terrain.despawn_behind(&self.camera);

        if self.player.state == PlayerState::Skiing {
            self.check_collisions();
        }

        self.terrain.npcs.for_each_active_mut(|npc| npc.update(dt));
        self.terrain
            .collectibles
            .for_each_active_mut(|token| token.update(dt));
        self.terrain.collectibles.release_where(|c| c.is_finished());

        self.score.update_distance(self.player.distance_meters());

        if self.mode == GameMode::Freerun {
            self.update_boss(dt);
        }

        self.decay_effects(dt);

        if self.mode == GameMode::Slalom {
            self.check_gates();
        }

        TickOutcome::Continue
    }

    fn check_collisions(&mut self) {
        let collision = self.collision;

        let hit_obstacle = self
            .terrain
            .obstacles
            .active()
            .any(|o| collision.check(&self.player, o));
        if hit_obstacle && self.player.crash() {
            self.score.crash_penalty();
            self.screen_shake = CRASH_SHAKE;
            self.event_popup = Some(Popup::new("CRASH!", PopupTone::Penalty, 1.0));
        }

        let base_points = &self.config.score;
        let player = &self.player;
        let score = &mut self.score;
        let event_popup = &mut self.event_popup;
        self.terrain.collectibles.for_each_active_mut(|token| {
            if token.collected || !collision.check(player, &*token) {
                return;
            }
            token.collect();
            let points = score.collect_token(token.kind.points(base_points));
            let text = if score.combo > 1 {
                format!("+{} x{}", points, score.combo)
            } else {
                format!("+{}", points)
            };
            *event_popup = Some(Popup::new(text, PopupTone::Reward, 0.8));
        });

        let hit_ramp = self
            .terrain
            .ramps
            .active()
            .any(|r| collision.check(&self.player, r));
        if hit_ramp {
            self.player.launch_from_ramp();
        }

        let hit_npc = self
            .terrain
            .npcs
            .active()
            .any(|n| collision.check(&self.player, n));
        if hit_npc && self.player.crash() {
            self.score.crash_penalty();
            self.screen_shake = NPC_SHAKE;
            self.event_popup = Some(Popup::new("COLLISION!", PopupTone::Penalty, 1.0));
        }
    }

    fn update_boss(&mut self, dt: f32) {
        let distance = self.player.distance_meters();

        if !self.boss.is_hunting() && distance >= self.next_boss_at {
            let spawn = self.player.pos()
                - Vec2::new(0.0, CANVAS_HEIGHT * self.config.boss.spawn_offset);
            self.boss.start_chase(spawn);
            self.event_popup = Some(Popup::new("THE BOSS IS COMING", PopupTone::Warning, 2.5));
            log::info!("Boss triggered at {:.0}m", distance);
        }

        if !self.boss.is_hunting() {
            return;
        }

        self.boss.pursue(dt, self.player.pos());

        if self.boss.has_caught(&self.player.body) {
            self.player.catch_player();
            // Restart the clock for the game-over delay
            self.game_time = 0.0;
            log::info!("Caught by the boss at {:.0}m", distance);
            return;
        }

        if self.boss.lead_meters(self.player.pos()) >= self.config.boss.escape_distance {
            self.boss.retire();
            self.score.boss_escape_bonus();
            self.bosses_escaped += 1;
            self.next_boss_at = distance + self.config.boss.trigger_distance;
            self.event_popup = Some(Popup::new(
                format!("ESCAPED! +{}", self.config.score.boss_escape_bonus),
                PopupTone::Reward,
                1.5,
            ));
            log::info!(
                "Boss escaped at {:.0}m, next at {:.0}m",
                distance,
                self.next_boss_at
            );
        }
    }

    fn decay_effects(&mut self, dt: f32) {
        if self.screen_shake > 0.0 {
            self.screen_shake *= 0.9;
            if self.screen_shake < 0.5 {
                self.screen_shake = 0.0;
            }
        }

        for popup in [&mut self.event_popup, &mut self.trick_popup] {
            let expired = match popup.as_mut() {
                Some(p) => {
                    p.timer -= dt;
                    !p.is_visible()
                }
                None => false,
            };
            if expired {
                *popup = None;
            }
        }
    }

    fn check_gates(&mut self) {
        let player = self.player.pos();
        let slalom = &self.config.slalom;
        let total_gates = self.terrain.total_gates;
        let mut passed = self.gates_passed;
        let mut missed = self.gates_missed;
        let mut penalty = 0.0;
        let mut shake = None;
        let mut popup = None;

        self.terrain.gates.for_each_active_mut(|gate| {
            if passed + missed >= total_gates
                || gate.is_resolved()
                || player.y <= gate.body.pos.y + slalom.resolve_offset
            {
                return;
            }

            if gate.contains_x(player.x) {
                gate.status = GateStatus::Passed;
                passed += 1;
                popup = Some(Popup::new(
                    format!("Gate {}!", passed),
                    PopupTone::Reward,
                    0.6,
                ));
            } else {
                gate.status = GateStatus::Missed;
                missed += 1;
                penalty += slalom.miss_penalty;
                shake = Some(GATE_MISS_SHAKE);
                popup = Some(Popup::new(
                    format!("+{}s PENALTY", slalom.miss_penalty),
                    PopupTone::Penalty,
                    1.0,
                ));
            }
        });

        self.gates_passed = passed;
        self.gates_missed = missed;
        self.slalom_time += penalty;
        if let Some(shake) = shake {
            self.screen_shake = shake;
        }
        let resolved_any = popup.is_some();
        if resolved_any {
            self.event_popup = popup;
        }

        if resolved_any && !self.slalom_finished && passed + missed >= total_gates {
            if missed == 0 {
                self.slalom_time *= 1.0 - self.config.slalom.clean_run_bonus;
            }
            self.slalom_finished = true;
            log::info!(
                "Slalom finished: {:.2}s, {} missed",
                self.slalom_time,
                missed
            );
        }
    }

    /// Camera-space offset for the current screen shake
    pub fn shake_offset(&self) -> Vec2 {
        if self.screen_shake <= 0.0 {
            return Vec2::ZERO;
        }
        let t = self.game_time;
        Vec2::new((t * 73.0).sin(), (t * 91.0).cos()) * self.screen_shake
    }

    /// The boss is on screen and the player is still free
    pub fn boss_warning_active(&self) -> bool {
        self.boss.is_hunting() && self.player.state != PlayerState::Caught
    }

    pub fn is_caught(&self) -> bool {
        self.player.state == PlayerState::Caught
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            score: self.score.total(),
            time: self.slalom_time,
            distance_m: self.player.distance_meters(),
            tokens: self.score.tokens_collected,
            best_combo: self.score.best_combo,
            gates_passed: self.gates_passed,
            gates_missed: self.gates_missed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PIXELS_PER_METER;
    use crate::sim::boss::BossState;
    use crate::sim::entity::{NpcKind, ObstacleKind, TokenKind};
    use crate::sim::rng::seeded;

    const DT: f32 = 1.0 / 60.0;

    /// A slope with nothing generated on it
    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.terrain.obstacles_min = 0.0;
        config.terrain.obstacles_max = 0.0;
        config.terrain.collectible_density = 0.0;
        config.terrain.line_chance = 0.0;
        config.terrain.ramp_density = 0.0;
        config.terrain.npc_density = 0.0;
        config
    }

    fn quiet_session(mode: GameMode) -> PlaySession {
        PlaySession::new(mode, &quiet_config(), 1)
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Place something just ahead of the skier so next frame overlaps it
    fn ahead_of(session: &PlaySession) -> Vec2 {
        session.player.pos() + Vec2::new(0.0, 6.0)
    }

    #[test]
    fn test_initial_terrain_frontier() {
        let session = PlaySession::new(GameMode::Freerun, &GameConfig::default(), 9);
        assert_eq!(session.player.pos(), Vec2::new(400.0, 100.0));
        assert_eq!(session.camera.pos.y, 100.0 - 600.0 * 0.3);
        assert!(
            session.terrain.last_generated_y >= session.camera.top_edge() + 8.0 * 100.0
        );
    }

    #[test]
    fn test_obstacle_crash_and_recovery() {
        let mut session = quiet_session(GameMode::Freerun);
        session.score.combo = 3;
        let pos = ahead_of(&session);
        session
            .terrain
            .obstacles
            .acquire()
            .init(pos, ObstacleKind::Tree);

        assert_eq!(session.tick(&idle(), DT), TickOutcome::Continue);
        assert_eq!(session.player.state, PlayerState::Crashing);
        assert_eq!(session.score.combo, 1);
        assert_eq!(session.screen_shake, CRASH_SHAKE * 0.9);
        assert_eq!(
            session.event_popup.as_ref().map(|p| p.tone),
            Some(PopupTone::Penalty)
        );

        for _ in 0..70 {
            session.tick(&idle(), DT);
        }
        assert_eq!(session.player.state, PlayerState::Skiing);
        assert!(session.player.is_invincible());
    }

    #[test]
    fn test_npc_contact_crashes() {
        let mut session = quiet_session(GameMode::Freerun);
        session.score.combo = 4;
        session.score.token_score = 120;
        let pos = ahead_of(&session);
        let mut rng = seeded(2);
        session
            .terrain
            .npcs
            .acquire()
            .init(pos, NpcKind::Blaze, &mut rng);

        session.tick(&idle(), DT);
        assert_eq!(session.player.state, PlayerState::Crashing);
        assert_eq!(session.score.combo, 1);
        assert_eq!(session.score.token_score, 70);
        assert_eq!(session.screen_shake, NPC_SHAKE * 0.9);
        assert_eq!(
            session.event_popup.as_ref().map(|p| p.text.as_str()),
            Some("COLLISION!")
        );

        // Already crashing: further contact is not punished again
        session.tick(&idle(), DT);
        assert_eq!(session.score.token_score, 70);
    }

    #[test]
    fn test_tokens_in_one_frame_all_count() {
        let mut session = quiet_session(GameMode::Freerun);
        let pos = ahead_of(&session);
        let mut rng = seeded(0);
        for dx in [-4.0, 4.0] {
            session.terrain.collectibles.acquire().init(
                pos + Vec2::new(dx, 0.0),
                TokenKind::Common,
                &mut rng,
            );
        }

        session.tick(&idle(), DT);
        assert_eq!(session.score.tokens_collected, 2);
        assert_eq!(session.score.token_score, 100 + 200);
        assert_eq!(
            session.event_popup.as_ref().map(|p| p.text.as_str()),
            Some("+200 x3")
        );
    }

    #[test]
    fn test_token_awards_with_combo() {
        let mut session = quiet_session(GameMode::Freerun);
        session.score.combo = 3;
        let pos = ahead_of(&session);
        let mut rng = seeded(0);
        session
            .terrain
            .collectibles
            .acquire()
            .init(pos, TokenKind::Common, &mut rng);

        session.tick(&idle(), DT);
        assert_eq!(session.score.token_score, 300);
        assert_eq!(session.score.combo, 4);
        assert_eq!(session.score.tokens_collected, 1);

        // Consumed once, then returned to the pool after its animation
        session.tick(&idle(), DT);
        assert_eq!(session.score.token_score, 300);
        for _ in 0..20 {
            session.tick(&idle(), DT);
        }
        assert_eq!(session.terrain.collectibles.active_count(), 0);
    }

    #[test]
    fn test_ramp_launches_player() {
        let mut session = quiet_session(GameMode::Freerun);
        let pos = ahead_of(&session);
        session.terrain.ramps.acquire().init(pos);
        session.tick(&idle(), DT);
        assert_eq!(session.player.state, PlayerState::Jumping);
        assert_eq!(session.player.air_velocity, -450.0);
    }

    #[test]
    fn test_no_collisions_while_airborne() {
        let mut session = quiet_session(GameMode::Freerun);
        session.player.start_jump(-350.0);
        let pos = ahead_of(&session);
        session
            .terrain
            .obstacles
            .acquire()
            .init(pos, ObstacleKind::Tree);
        session.tick(&idle(), DT);
        assert_eq!(session.player.state, PlayerState::Jumping);
    }

    #[test]
    fn test_trick_points_are_banked() {
        let mut session = quiet_session(GameMode::Freerun);
        session.player.start_jump(-350.0);
        let flip = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..90 {
            session.tick(&flip, DT);
        }
        assert_eq!(session.score.trick_score, 200);
        assert!(session.trick_popup.is_some());
    }

    #[test]
    fn test_pause_does_not_advance() {
        let mut session = quiet_session(GameMode::Freerun);
        let before = session.player.pos();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        assert_eq!(session.tick(&pause, DT), TickOutcome::Paused);
        assert_eq!(session.player.pos(), before);
        assert_eq!(session.game_time, 0.0);
    }

    #[test]
    fn test_distance_score_follows_player() {
        let mut session = quiet_session(GameMode::Freerun);
        for _ in 0..60 {
            session.tick(&idle(), DT);
        }
        let meters = session.player.distance_meters();
        assert!(meters > 10.0);
        // Paid from zero, so the starting 10m counts too
        assert!((session.score.distance_score as f32 - meters).abs() < 0.01);
    }

    fn boss_config(trigger: f32) -> GameConfig {
        let mut config = quiet_config();
        config.boss.trigger_distance = trigger;
        config
    }

    #[test]
    fn test_boss_catch_ends_session_after_delay() {
        let mut session = PlaySession::new(GameMode::Freerun, &boss_config(5.0), 1);
        session.tick(&idle(), DT);
        assert_eq!(session.boss.state, BossState::Approaching);
        assert!(session.boss_warning_active());
        let expected = session.player.pos().y - CANVAS_HEIGHT * 0.8 + 300.0 * 1.1 * DT;
        assert!((session.boss.body.pos.y - expected).abs() < 1e-3);
        assert_eq!(session.boss.body.pos.x, session.player.pos().x);

        session.boss.body.pos = session.player.pos();
        session.tick(&idle(), DT);
        assert!(session.is_caught());
        assert!(!session.boss_warning_active());
        assert_eq!(session.player.velocity, Vec2::ZERO);

        let mut frames = 0;
        let summary = loop {
            frames += 1;
            if let TickOutcome::Finished(summary) = session.tick(&idle(), 0.05) {
                break summary;
            }
            assert!(frames < 100);
        };
        // 2s delay at 50ms per frame
        assert!((40..=41).contains(&frames));
        assert_eq!(summary.mode, GameMode::Freerun);
        assert_eq!(summary.score, session.score.total());
    }

    #[test]
    fn test_boss_escape_pays_bonus_and_rearms() {
        let mut session = PlaySession::new(GameMode::Freerun, &boss_config(5.0), 1);
        session.tick(&idle(), DT);
        assert!(session.boss.is_hunting());

        session.player.body.pos.y += 2100.0 * PIXELS_PER_METER;
        session.tick(&idle(), DT);

        assert!(!session.boss.is_hunting());
        assert_eq!(session.bosses_escaped, 1);
        assert_eq!(session.score.token_score, 5000);
        let distance = session.player.distance_meters();
        assert!(session.next_boss_at > distance);

        // Not before the re-armed distance
        session.tick(&idle(), DT);
        assert!(!session.boss.is_hunting());
    }

    #[test]
    fn test_no_boss_in_slalom() {
        let mut session = PlaySession::new(GameMode::Slalom, &boss_config(1.0), 1);
        session.tick(&idle(), DT);
        assert_eq!(session.boss.state, BossState::Dormant);
    }

    /// Teleport through each gate (inside or beside it) and tick
    fn run_course(session: &mut PlaySession, miss_every: Option<usize>) -> usize {
        let gates: Vec<Vec2> = session.terrain.gates.active().map(|g| g.body.pos).collect();
        let mut ticks = 0;
        for (i, gate) in gates.iter().enumerate() {
            let miss = miss_every.is_some_and(|n| i % n == 0);
            let x = if miss { gate.x + 100.0 } else { gate.x };
            session.player.body.pos = Vec2::new(x, gate.y + 25.0);
            session.tick(&idle(), DT);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_clean_slalom_gets_time_bonus() {
        let mut session = quiet_session(GameMode::Slalom);
        let ticks = run_course(&mut session, None);
        assert_eq!(ticks, 20);
        assert!(session.slalom_finished);
        assert_eq!(session.gates_passed, 20);
        assert_eq!(session.gates_missed, 0);

        let expected = ticks as f32 * DT * 0.9;
        assert!((session.slalom_time - expected).abs() < 1e-4);

        match session.tick(&idle(), DT) {
            TickOutcome::Finished(summary) => {
                assert_eq!(summary.mode, GameMode::Slalom);
                assert_eq!(summary.ranking_value(), session.slalom_time as f64);
                assert_eq!(summary.gates_passed, 20);
            }
            other => panic!("expected finish, got {:?}", other),
        }
    }

    #[test]
    fn test_missed_gates_cost_time() {
        let mut session = quiet_session(GameMode::Slalom);
        let ticks = run_course(&mut session, Some(5));
        assert!(session.slalom_finished);
        assert_eq!(session.gates_missed, 4);
        assert_eq!(session.gates_passed, 16);

        // Penalties, no clean-run discount
        let expected = ticks as f32 * DT + 4.0 * 5.0;
        assert!((session.slalom_time - expected).abs() < 1e-3);
    }

    #[test]
    fn test_effects_decay() {
        let mut session = quiet_session(GameMode::Freerun);
        session.screen_shake = 8.0;
        session.event_popup = Some(Popup::new("x", PopupTone::Reward, 0.1));
        for _ in 0..30 {
            session.tick(&idle(), DT);
        }
        assert_eq!(session.screen_shake, 0.0);
        assert!(session.event_popup.is_none());
        assert_eq!(session.shake_offset(), Vec2::ZERO);
    }
}
