//! Local high score tables
//!
//! One table per mode, persisted to LocalStorage. Freerun keeps the ten
//! highest scores; slalom keeps the ten fastest run times.

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, SessionSummary};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Points (freerun) or seconds (slalom)
    pub score: f64,
    /// Meters skied
    pub distance: u32,
    /// Unix timestamp (ms) when achieved
    pub date: f64,
}

/// High score table for one mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScores {
    pub mode: GameMode,
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create an empty table
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    /// LocalStorage key for a mode's table
    pub fn storage_key(mode: GameMode) -> String {
        format!("slope_runner_highscores_{}", mode.as_str())
    }

    /// `a` ranks strictly ahead of `b`
    fn beats(&self, a: f64, b: f64) -> bool {
        if self.mode.lower_is_better() { a < b } else { a > b }
    }

    /// Check if a result would make the table
    pub fn qualifies(&self, score: f64) -> bool {
        if !score.is_finite() {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .is_none_or(|e| self.beats(score, e.score))
    }

    /// Would this be a new best
    pub fn is_new_best(&self, score: f64) -> bool {
        self.entries
            .first()
            .is_none_or(|e| self.beats(score, e.score))
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| self.beats(score, e.score));
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a result; returns the rank achieved (1-indexed) or None
    pub fn add_score(&mut self, score: f64, distance: u32, date: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                distance,
                date,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished session in its mode's table
    pub fn record(&mut self, summary: &SessionSummary, date: f64) -> Option<usize> {
        debug_assert_eq!(summary.mode, self.mode);
        self.add_score(summary.ranking_value(), summary.distance_m.floor() as u32, date)
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry, if any
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Parse a stored table. Stored entries are re-sorted and trimmed so a
    /// hand-edited value cannot break ordering.
    pub fn from_json(mode: GameMode, json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HighScoreEntry> = serde_json::from_str(json)?;
        let mut table = Self::new(mode);
        for entry in entries {
            table.add_score(entry.score, entry.distance, entry.date);
        }
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Load a mode's table from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(mode: GameMode) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(&Self::storage_key(mode)) {
                match Self::from_json(mode, &json) {
                    Ok(scores) => {
                        log::info!("Loaded {} {} high scores", scores.entries.len(), mode.as_str());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable high scores: {}", e),
                }
            }
        }

        log::info!("No {} high scores found, starting fresh", mode.as_str());
        Self::new(mode)
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(&Self::storage_key(self.mode), &json);
                    log::info!("High scores saved ({} entries)", self.entries.len());
                }
                Err(e) => log::warn!("Could not serialize high scores: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(mode: GameMode) -> Self {
        Self::new(mode)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_freerun_descending() {
        let mut scores = HighScores::new(GameMode::Freerun);
        assert_eq!(scores.add_score(500.0, 50, 0.0), Some(1));
        assert_eq!(scores.add_score(900.0, 90, 0.0), Some(1));
        assert_eq!(scores.add_score(700.0, 70, 0.0), Some(2));
        let order: Vec<f64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![900.0, 700.0, 500.0]);
        assert!(scores.is_new_best(901.0));
        assert!(!scores.is_new_best(900.0));
    }

    #[test]
    fn test_slalom_ascending() {
        let mut scores = HighScores::new(GameMode::Slalom);
        scores.add_score(42.5, 400, 0.0);
        scores.add_score(38.0, 400, 0.0);
        scores.add_score(55.1, 400, 0.0);
        assert_eq!(scores.best().map(|e| e.score), Some(38.0));
        assert_eq!(scores.potential_rank(40.0), Some(2));
    }

    #[test]
    fn test_full_table_rejects_worse() {
        let mut scores = HighScores::new(GameMode::Freerun);
        for i in 1..=10 {
            scores.add_score(i as f64 * 100.0, 0, 0.0);
        }
        assert!(!scores.qualifies(100.0));
        assert_eq!(scores.add_score(50.0, 0, 0.0), None);
        assert_eq!(scores.add_score(150.0, 0, 0.0), Some(10));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(150.0));
    }

    #[test]
    fn test_storage_round_trip_resorts() {
        let json = r#"[{"score":10,"distance":1,"date":0},{"score":30,"distance":3,"date":0}]"#;
        let scores = HighScores::from_json(GameMode::Freerun, json).unwrap();
        assert_eq!(scores.best().map(|e| e.score), Some(30.0));
        let again = HighScores::from_json(GameMode::Freerun, &scores.to_json().unwrap()).unwrap();
        assert_eq!(again.entries, scores.entries);
        assert!(HighScores::from_json(GameMode::Freerun, "{").is_err());
    }

    #[test]
    fn test_storage_keys_per_mode() {
        assert_eq!(
            HighScores::storage_key(GameMode::Slalom),
            "slope_runner_highscores_slalom"
        );
        assert_ne!(
            HighScores::storage_key(GameMode::Freerun),
            HighScores::storage_key(GameMode::Slalom)
        );
    }

    proptest! {
        #[test]
        fn prop_table_sorted_and_bounded(
            slalom in any::<bool>(),
            values in proptest::collection::vec(0.0f64..10_000.0, 0..40),
        ) {
            let mode = if slalom { GameMode::Slalom } else { GameMode::Freerun };
            let mut scores = HighScores::new(mode);
            for v in values {
                scores.add_score(v, 0, 0.0);
            }
            prop_assert!(scores.entries.len() <= MAX_HIGH_SCORES);
            for pair in scores.entries.windows(2) {
                if slalom {
                    prop_assert!(pair[0].score <= pair[1].score);
                } else {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }
    }
}
