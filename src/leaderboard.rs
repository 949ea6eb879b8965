//! Global leaderboard collaborator
//!
//! The game talks to the leaderboard only through [`Leaderboard`]. Every call
//! degrades instead of failing: an unconfigured or unreachable board reports
//! "not submitted", an empty list, or no rank.
//!
//! [`RestEndpoint`] describes the REST wire format (table `scores`, filtered
//! by mode, ordered per mode) so a transport only has to send what it builds.

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, SessionSummary};

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 20;
/// Default page size for top score queries
pub const DEFAULT_LIMIT: usize = 10;

/// Row written to the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub score: u64,
    pub distance: u64,
    pub mode: GameMode,
    pub tokens_collected: u32,
    pub best_combo: u32,
}

impl ScoreSubmission {
    /// Normalize a finished run: name trimmed and cut to 20 characters,
    /// score and distance floored
    pub fn new(name: &str, summary: &SessionSummary) -> Self {
        Self {
            player_name: name.trim().chars().take(MAX_NAME_LEN).collect(),
            score: summary.ranking_value().max(0.0).floor() as u64,
            distance: summary.distance_m.max(0.0).floor() as u64,
            mode: summary.mode,
            tokens_collected: summary.tokens,
            best_combo: summary.best_combo.max(1),
        }
    }
}

/// Row read back from the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u64,
    #[serde(default)]
    pub distance: u64,
    #[serde(default)]
    pub tokens_collected: u32,
    #[serde(default)]
    pub best_combo: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Sort direction of a mode's board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Highest first (points)
    Descending,
    /// Lowest first (times)
    Ascending,
}

impl ScoreOrder {
    pub fn for_mode(mode: GameMode) -> Self {
        if mode.lower_is_better() {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    /// `a` ranks strictly ahead of `b`
    pub fn beats(self, a: u64, b: u64) -> bool {
        match self {
            Self::Descending => a > b,
            Self::Ascending => a < b,
        }
    }
}

pub trait Leaderboard {
    fn is_configured(&self) -> bool;

    /// True when the board accepted the row
    fn submit_score(&mut self, submission: &ScoreSubmission) -> bool;

    /// Best entries for a mode, best first; empty on any failure
    fn top_scores(&self, mode: GameMode, limit: usize) -> Vec<LeaderboardEntry>;

    /// 1-based rank `score` would hold (1 + number of strictly better rows)
    fn rank(&self, score: u64, mode: GameMode) -> Option<usize>;
}

/// Board used when no service is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLeaderboard;

impl Leaderboard for DisabledLeaderboard {
    fn is_configured(&self) -> bool {
        false
    }

    fn submit_score(&mut self, _submission: &ScoreSubmission) -> bool {
        false
    }

    fn top_scores(&self, _mode: GameMode, _limit: usize) -> Vec<LeaderboardEntry> {
        Vec::new()
    }

    fn rank(&self, _score: u64, _mode: GameMode) -> Option<usize> {
        None
    }
}

/// Board kept in memory for the current page / process
#[derive(Debug, Clone, Default)]
pub struct LocalLeaderboard {
    rows: Vec<ScoreSubmission>,
}

impl LocalLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Leaderboard for LocalLeaderboard {
    fn is_configured(&self) -> bool {
        true
    }

    fn submit_score(&mut self, submission: &ScoreSubmission) -> bool {
        if submission.player_name.is_empty() {
            log::warn!("Leaderboard: rejecting submission without a name");
            return false;
        }
        self.rows.push(submission.clone());
        true
    }

    fn top_scores(&self, mode: GameMode, limit: usize) -> Vec<LeaderboardEntry> {
        let order = ScoreOrder::for_mode(mode);
        let mut rows: Vec<&ScoreSubmission> = self.rows.iter().filter(|r| r.mode == mode).collect();
        rows.sort_by(|a, b| match order {
            ScoreOrder::Descending => b.score.cmp(&a.score),
            ScoreOrder::Ascending => a.score.cmp(&b.score),
        });
        rows.into_iter()
            .take(limit)
            .map(|r| LeaderboardEntry {
                player_name: r.player_name.clone(),
                score: r.score,
                distance: r.distance,
                tokens_collected: r.tokens_collected,
                best_combo: r.best_combo,
                created_at: None,
            })
            .collect()
    }

    fn rank(&self, score: u64, mode: GameMode) -> Option<usize> {
        let order = ScoreOrder::for_mode(mode);
        let better = self
            .rows
            .iter()
            .filter(|r| r.mode == mode && order.beats(r.score, score))
            .count();
        Some(better + 1)
    }
}

/// Connection settings for a REST leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestEndpoint {
    pub url: String,
    pub api_key: String,
}

/// A request ready for a transport to send
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl RestEndpoint {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }

    fn auth_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", "application/json".to_string()),
            ("apikey", self.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.api_key)),
        ]
    }

    fn table(&self) -> String {
        format!("{}/rest/v1/scores", self.url.trim_end_matches('/'))
    }

    /// Insert one row
    pub fn submit_request(&self, submission: &ScoreSubmission) -> Result<RestRequest, serde_json::Error> {
        let mut headers = self.auth_headers();
        headers.push(("Prefer", "return=minimal".to_string()));
        Ok(RestRequest {
            method: "POST",
            url: self.table(),
            headers,
            body: Some(serde_json::to_string(submission)?),
        })
    }

    /// Top rows for a mode in board order
    pub fn top_scores_request(&self, mode: GameMode, limit: usize) -> RestRequest {
        let order = match ScoreOrder::for_mode(mode) {
            ScoreOrder::Descending => "score.desc",
            ScoreOrder::Ascending => "score.asc",
        };
        RestRequest {
            method: "GET",
            url: format!(
                "{}?select=player_name,score,distance,tokens_collected,best_combo,created_at\
                 &mode=eq.{}&order={}&limit={}",
                self.table(),
                mode.as_str(),
                order,
                limit
            ),
            headers: self.auth_headers(),
            body: None,
        }
    }

    /// Count of strictly better rows, returned in `Content-Range`
    pub fn rank_request(&self, score: u64, mode: GameMode) -> RestRequest {
        let op = match ScoreOrder::for_mode(mode) {
            ScoreOrder::Descending => "gt",
            ScoreOrder::Ascending => "lt",
        };
        let mut headers = self.auth_headers();
        headers.push(("Prefer", "count=exact".to_string()));
        RestRequest {
            method: "GET",
            url: format!(
                "{}?select=id&mode=eq.{}&score={}.{}",
                self.table(),
                mode.as_str(),
                op,
                score
            ),
            headers,
            body: None,
        }
    }
}

/// Decode a top scores response body; anything unreadable is an empty board
pub fn parse_top_scores(body: &str) -> Vec<LeaderboardEntry> {
    serde_json::from_str(body).unwrap_or_else(|e| {
        log::warn!("Leaderboard: unreadable score list: {}", e);
        Vec::new()
    })
}

/// Rank from a `Content-Range` header such as `0-4/17` or `*/17`
pub fn rank_from_content_range(header: &str) -> Option<usize> {
    let total = header.rsplit_once('/')?.1.trim();
    total.parse::<usize>().ok().map(|better| better + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(mode: GameMode, score: u64, time: f32) -> SessionSummary {
        SessionSummary {
            mode,
            score,
            time,
            distance_m: 1234.9,
            tokens: 7,
            best_combo: 3,
            gates_passed: 0,
            gates_missed: 0,
        }
    }

    #[test]
    fn test_submission_normalization() {
        let s = ScoreSubmission::new(
            "   A Very Long Player Name Indeed   ",
            &summary(GameMode::Freerun, 4321, 0.0),
        );
        assert_eq!(s.player_name, "A Very Long Player N");
        assert_eq!(s.player_name.chars().count(), MAX_NAME_LEN);
        assert_eq!(s.score, 4321);
        assert_eq!(s.distance, 1234);

        let slalom = ScoreSubmission::new("ana", &summary(GameMode::Slalom, 999, 41.87));
        assert_eq!(slalom.score, 41);
        assert_eq!(slalom.mode, GameMode::Slalom);
    }

    #[test]
    fn test_disabled_board_degrades() {
        let mut board = DisabledLeaderboard;
        let s = ScoreSubmission::new("ana", &summary(GameMode::Freerun, 10, 0.0));
        assert!(!board.is_configured());
        assert!(!board.submit_score(&s));
        assert!(board.top_scores(GameMode::Freerun, 10).is_empty());
        assert_eq!(board.rank(10, GameMode::Freerun), None);
    }

    #[test]
    fn test_local_board_orders_per_mode() {
        let mut board = LocalLeaderboard::new();
        for (name, score) in [("a", 300), ("b", 900), ("c", 600)] {
            board.submit_score(&ScoreSubmission::new(
                name,
                &summary(GameMode::Freerun, score, 0.0),
            ));
        }
        for (name, time) in [("x", 50.0), ("y", 40.0)] {
            board.submit_score(&ScoreSubmission::new(name, &summary(GameMode::Slalom, 0, time)));
        }

        let free: Vec<u64> = board
            .top_scores(GameMode::Freerun, 10)
            .iter()
            .map(|e| e.score)
            .collect();
        assert_eq!(free, vec![900, 600, 300]);
        let slalom: Vec<u64> = board
            .top_scores(GameMode::Slalom, 1)
            .iter()
            .map(|e| e.score)
            .collect();
        assert_eq!(slalom, vec![40]);

        assert_eq!(board.rank(700, GameMode::Freerun), Some(2));
        assert_eq!(board.rank(45, GameMode::Slalom), Some(2));
        assert_eq!(board.rank(900, GameMode::Freerun), Some(1));
    }

    #[test]
    fn test_local_board_rejects_blank_name() {
        let mut board = LocalLeaderboard::new();
        let s = ScoreSubmission::new("   ", &summary(GameMode::Freerun, 10, 0.0));
        assert!(!board.submit_score(&s));
        assert!(board.is_empty());
    }

    #[test]
    fn test_rest_requests() {
        let endpoint = RestEndpoint {
            url: "https://board.example/".into(),
            api_key: "key".into(),
        };
        assert!(endpoint.is_configured());
        assert!(!RestEndpoint::default().is_configured());

        let top = endpoint.top_scores_request(GameMode::Slalom, 10);
        assert_eq!(top.method, "GET");
        assert!(top.url.starts_with("https://board.example/rest/v1/scores?"));
        assert!(top.url.contains("mode=eq.slalom&order=score.asc&limit=10"));

        let rank = endpoint.rank_request(500, GameMode::Freerun);
        assert!(rank.url.ends_with("mode=eq.freerun&score=gt.500"));
        assert!(rank.headers.contains(&("Prefer", "count=exact".to_string())));

        let submit = endpoint
            .submit_request(&ScoreSubmission::new("ana", &summary(GameMode::Freerun, 5, 0.0)))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(submit.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["player_name"], "ana");
        assert_eq!(body["mode"], "freerun");
        assert!(submit.headers.contains(&("Authorization", "Bearer key".to_string())));
    }

    #[test]
    fn test_response_parsing() {
        assert_eq!(rank_from_content_range("0-4/17"), Some(18));
        assert_eq!(rank_from_content_range("*/0"), Some(1));
        assert_eq!(rank_from_content_range("*/*"), None);

        let rows = parse_top_scores(r#"[{"player_name":"ana","score":12}]"#);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].distance, 0);
        assert!(parse_top_scores("oops").is_empty());
    }
}
