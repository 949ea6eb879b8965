//! Slope Runner - An endless downhill skiing arcade game
//!
//! Core modules:
//! - `sim`: Simulation (pools, terrain streaming, player physics, scoring)
//! - `renderer`: Draw contract and WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `app`: Frame driver and menu/play/pause/game-over phases

pub mod app;
pub mod assets;
pub mod highscores;
pub mod leaderboard;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use app::{AppPhase, Game};
pub use highscores::HighScores;
pub use tuning::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Display surface dimensions (logical pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Largest simulation step accepted per frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// World pixels per displayed meter
    pub const PIXELS_PER_METER: f32 = 10.0;

    /// Trail samples kept for ski tracks
    pub const TRAIL_LENGTH: usize = 20;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp a raw frame delta (seconds) into the simulation's accepted range
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}

/// Format a score with thousands separators ("12,345")
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a run time in seconds as `M:SS.cc`
pub fn format_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u32;
    format!("{}:{:02}.{:02}", mins, secs, hundredths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(-0.2), 0.0);
        assert_eq!(clamp_frame_dt(0.016), 0.016);
        assert_eq!(clamp_frame_dt(3.0), consts::MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(999), "999");
        assert_eq!(format_score(1000), "1,000");
        assert_eq!(format_score(1234567), "1,234,567");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00.00");
        assert_eq!(format_time(65.5), "1:05.50");
    }
}
