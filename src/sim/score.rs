//! Run scoring: distance, tokens with combo, tricks

use crate::tuning::ScoreTuning;

#[derive(Debug, Clone)]
pub struct ScoreBoard {
    pub distance_score: f64,
    pub token_score: u64,
    pub trick_score: u64,
    /// Current token multiplier, 1..=max_combo
    pub combo: u32,
    pub best_combo: u32,
    pub tokens_collected: u32,
    /// High-water mark of meters skied; only ground past it scores
    pub max_distance: f32,
    tuning: ScoreTuning,
}

impl ScoreBoard {
    pub fn new(tuning: &ScoreTuning) -> Self {
        Self {
            distance_score: 0.0,
            token_score: 0,
            trick_score: 0,
            combo: 1,
            best_combo: 1,
            tokens_collected: 0,
            max_distance: 0.0,
            tuning: tuning.clone(),
        }
    }

    /// Pay out distance beyond the high-water mark. Backward samples are
    /// ignored, so re-covered ground never scores twice.
    pub fn update_distance(&mut self, meters: f32) {
        let delta = meters - self.max_distance;
        if delta > 0.0 {
            self.distance_score += delta as f64 * self.tuning.distance_per_meter;
            self.max_distance = meters;
        }
    }

    /// Award `base_points × combo`, then raise the combo. Returns the award.
    pub fn collect_token(&mut self, base_points: u64) -> u64 {
        let points = base_points * self.combo as u64;
        self.token_score += points;
        self.tokens_collected += 1;

        if self.combo < self.tuning.max_combo {
            self.combo += 1;
        }
        self.best_combo = self.best_combo.max(self.combo);
        points
    }

    pub fn add_trick_points(&mut self, points: u64) {
        self.trick_score += points;
    }

    /// Reset the combo and dock token score (never below zero)
    pub fn crash_penalty(&mut self) {
        self.combo = 1;
        self.token_score = self.token_score.saturating_sub(self.tuning.crash_penalty);
    }

    pub fn boss_escape_bonus(&mut self) {
        self.token_score += self.tuning.boss_escape_bonus;
    }

    pub fn total(&self) -> u64 {
        self.distance_score.floor() as u64 + self.token_score + self.trick_score
    }
}
