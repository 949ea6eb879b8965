//! Frame driver and app phases
//!
//! `Game` owns everything between page load and page close: the selected
//! mode, the running session, the local high score tables and the
//! leaderboard. The platform layer calls [`Game::frame`] once per animation
//! frame with the host timestamp and the current input snapshot.

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::leaderboard::{DisabledLeaderboard, Leaderboard, ScoreSubmission};
use crate::sim::{GameMode, PlaySession, SessionSummary, Swipe, TickInput, TickOutcome};
use crate::tuning::GameConfig;
use crate::clamp_frame_dt;

/// Seconds the game over screen ignores input
const GAME_OVER_INPUT_DELAY: f32 = 0.5;

/// Top-level phase of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppPhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// What the game over screen shows
#[derive(Debug, Clone)]
pub struct GameOverReport {
    pub summary: SessionSummary,
    /// Rank in the local table, if the run made it
    pub local_rank: Option<usize>,
    pub new_best: bool,
    pub submitted: bool,
    pub global_rank: Option<usize>,
}

pub struct Game {
    pub phase: AppPhase,
    /// Mode highlighted in the menu
    pub selected_mode: GameMode,
    pub session: Option<PlaySession>,
    pub report: Option<GameOverReport>,
    /// Name used for leaderboard submissions
    pub player_name: String,
    config: GameConfig,
    freerun_scores: HighScores,
    slalom_scores: HighScores,
    leaderboard: Box<dyn Leaderboard>,
    seed: u64,
    runs_started: u64,
    last_time: Option<f64>,
    running: bool,
    phase_time: f32,
    prev_input: TickInput,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            phase: AppPhase::Menu,
            selected_mode: GameMode::Freerun,
            session: None,
            report: None,
            player_name: String::new(),
            config,
            freerun_scores: HighScores::load(GameMode::Freerun),
            slalom_scores: HighScores::load(GameMode::Slalom),
            leaderboard: Box::new(DisabledLeaderboard),
            seed,
            runs_started: 0,
            last_time: None,
            running: true,
            phase_time: 0.0,
            prev_input: TickInput::default(),
        }
    }

    pub fn with_leaderboard(mut self, leaderboard: Box<dyn Leaderboard>) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_scores(&self, mode: GameMode) -> &HighScores {
        match mode {
            GameMode::Freerun => &self.freerun_scores,
            GameMode::Slalom => &self.slalom_scores,
        }
    }

    fn high_scores_mut(&mut self, mode: GameMode) -> &mut HighScores {
        match mode {
            GameMode::Freerun => &mut self.freerun_scores,
            GameMode::Slalom => &mut self.slalom_scores,
        }
    }

    pub fn leaderboard(&self) -> &dyn Leaderboard {
        self.leaderboard.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the loop; further frames do nothing
    pub fn stop(&mut self) {
        self.running = false;
        log::info!("Game loop stopped");
    }

    /// Ask for a pause from outside the input stream (tab hidden, blur)
    pub fn request_pause(&mut self) {
        if self.phase == AppPhase::Playing {
            self.set_phase(AppPhase::Paused);
            log::info!("Auto-paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == AppPhase::Paused {
            self.set_phase(AppPhase::Playing);
        }
    }

    /// Advance one animation frame. Returns false once stopped.
    pub fn frame(&mut self, timestamp_ms: f64, input: &TickInput) -> bool {
        if !self.running {
            return false;
        }
        let dt = match self.last_time {
            Some(last) => clamp_frame_dt(((timestamp_ms - last) / 1000.0) as f32),
            None => 0.0,
        };
        self.last_time = Some(timestamp_ms);
        self.update(input, dt);
        self.prev_input = *input;
        true
    }

    /// Phase update with an already-clamped `dt`
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        self.phase_time += dt;
        match self.phase {
            AppPhase::Menu => self.update_menu(input),
            AppPhase::Playing => self.update_playing(input, dt),
            AppPhase::Paused => {
                if input.pause || input.confirm {
                    self.resume();
                }
            }
            AppPhase::GameOver => {
                if self.phase_time >= GAME_OVER_INPUT_DELAY && input.confirm {
                    self.return_to_menu();
                }
            }
        }
    }

    fn set_phase(&mut self, phase: AppPhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.phase_time = 0.0;
        }
    }

    /// Rising edge of a held direction, or a fresh swipe
    fn turned(&self, input: &TickInput) -> bool {
        let prev = &self.prev_input;
        let key_edge = (input.left && !prev.left)
            || (input.right && !prev.right)
            || (input.up && !prev.up)
            || (input.down && !prev.down);
        let swipe_edge = input.swipe.is_some() && prev.swipe.is_none();
        key_edge || swipe_edge
    }

    fn update_menu(&mut self, input: &TickInput) {
        if self.turned(input) && input.swipe != Some(Swipe::Down) {
            self.selected_mode = self.selected_mode.toggled();
        }
        if input.confirm {
            self.start_game(self.selected_mode);
        }
    }

    fn update_playing(&mut self, input: &TickInput, dt: f32) {
        let Some(session) = self.session.as_mut() else {
            self.set_phase(AppPhase::Menu);
            return;
        };
        match session.tick(input, dt) {
            TickOutcome::Continue => {}
            TickOutcome::Paused => self.set_phase(AppPhase::Paused),
            TickOutcome::Finished(summary) => self.game_over(summary),
        }
    }

    /// Begin a fresh session in `mode`
    pub fn start_game(&mut self, mode: GameMode) {
        let seed = self.seed.wrapping_add(self.runs_started);
        self.runs_started += 1;
        self.selected_mode = mode;
        self.session = Some(PlaySession::new(mode, &self.config, seed));
        self.report = None;
        self.set_phase(AppPhase::Playing);
    }

    fn game_over(&mut self, summary: SessionSummary) {
        let mode = summary.mode;
        let date = now_ms();
        let table = self.high_scores_mut(mode);
        let new_best = table.is_new_best(summary.ranking_value());
        let local_rank = table.record(&summary, date);
        table.save();

        let (submitted, global_rank) = self.submit(&summary);
        log::info!(
            "Game over ({}): score {}, {:.0} m, local rank {:?}",
            mode.as_str(),
            summary.score,
            summary.distance_m,
            local_rank
        );

        self.report = Some(GameOverReport {
            summary,
            local_rank,
            new_best,
            submitted,
            global_rank,
        });
        self.set_phase(AppPhase::GameOver);
    }

    fn submit(&mut self, summary: &SessionSummary) -> (bool, Option<usize>) {
        if !self.leaderboard.is_configured() || self.player_name.trim().is_empty() {
            return (false, None);
        }
        let submission = ScoreSubmission::new(&self.player_name, summary);
        let submitted = self.leaderboard.submit_score(&submission);
        if !submitted {
            log::warn!("Leaderboard submission failed");
        }
        let rank = self.leaderboard.rank(submission.score, submission.mode);
        (submitted, rank)
    }

    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.set_phase(AppPhase::Menu);
    }
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
