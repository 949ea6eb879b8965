//! Data-driven game balance
//!
//! Every gameplay number lives in one immutable [`GameConfig`] that is
//! handed to the player, terrain generator, score board and play session at
//! construction. Tests override individual fields instead of touching
//! shared state; JSON overrides only need the fields they change.

use serde::{Deserialize, Serialize};

/// Skier locomotion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Cruising speed (pixels/s)
    pub base_speed: f32,
    /// Speed while boost is held (pixels/s)
    pub boost_speed: f32,
    /// Blend rate toward the target speed (per second)
    pub speed_blend_rate: f32,
    /// Initial air velocity for a jump (negative = upward)
    pub jump_velocity: f32,
    /// Initial air velocity when launched by a ramp
    pub ramp_launch_velocity: f32,
    /// Downward acceleration while airborne (pixels/s²)
    pub gravity: f32,
    /// Fraction of lateral velocity applied while airborne
    pub air_control: f32,
    /// Downhill velocity factor at the extreme directions
    pub stall_forward_factor: f32,
    /// Lateral velocity as a fraction of speed at the extreme directions
    pub stall_lateral_factor: f32,
    /// Rotation rate (degrees/s) while holding up/down in the air
    pub flip_rate: f32,
    /// Rotation rate (degrees/s) while holding left/right in the air
    pub spin_rate: f32,
    pub flip_points: u64,
    pub spin_points: u64,
    /// Seconds spent in the crash state
    pub crash_duration: f32,
    /// Seconds of invincibility after recovering from a crash
    pub invincible_duration: f32,
    /// Decay rate of downhill velocity while crashing
    pub crash_decel_rate: f32,
    /// Fraction of the decaying velocity still applied while sliding
    pub crash_slide_factor: f32,
    /// Speed after recovering, as a fraction of base speed
    pub recovery_speed_factor: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 48.0,
            height: 48.0,
            base_speed: 200.0,
            boost_speed: 500.0,
            speed_blend_rate: 3.0,
            jump_velocity: -350.0,
            ramp_launch_velocity: -450.0,
            gravity: 600.0,
            air_control: 0.7,
            stall_forward_factor: 0.15,
            stall_lateral_factor: 0.9,
            flip_rate: 360.0 * 1.5,
            spin_rate: 360.0 * 1.2,
            flip_points: 200,
            spin_points: 150,
            crash_duration: 1.0,
            invincible_duration: 1.5,
            crash_decel_rate: 5.0,
            crash_slide_factor: 0.3,
            recovery_speed_factor: 0.5,
        }
    }
}

/// Procedural terrain streaming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// Height of one generation band (pixels)
    pub band_height: f32,
    /// Bands generated by `generate_initial`
    pub initial_bands: u32,
    /// Generate while the frontier is closer than this past the camera bottom
    pub lookahead: f32,
    /// Lane width as a multiple of the canvas width
    pub lane_width_factor: f32,
    /// Obstacle count per band is `floor(range(min, max) * difficulty)`
    pub obstacles_min: f32,
    pub obstacles_max: f32,
    pub collectible_density: f32,
    pub ramp_density: f32,
    pub npc_density: f32,
    /// Chance per band of a token line formation
    pub line_chance: f32,
    pub line_min: u32,
    pub line_max: u32,
    pub line_step_y: f32,
    /// Chance a single collectible is the rare kind
    pub rare_token_chance: f32,
    /// Minimum distance between any two placements (pixels)
    pub min_spawn_distance: f32,
    /// Distance above the camera top edge where content is despawned
    pub despawn_margin: f32,
    /// Difficulty gain per meter traveled
    pub difficulty_per_meter: f32,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            band_height: 100.0,
            initial_bands: 8,
            lookahead: 300.0,
            lane_width_factor: 2.0,
            obstacles_min: 1.0,
            obstacles_max: 4.0,
            collectible_density: 0.008,
            ramp_density: 0.002,
            npc_density: 0.003,
            line_chance: 0.03,
            line_min: 3,
            line_max: 6,
            line_step_y: 25.0,
            rare_token_chance: 0.15,
            min_spawn_distance: 60.0,
            despawn_margin: 200.0,
            // 50% harder at 2000m
            difficulty_per_meter: 0.5 / 2000.0,
        }
    }
}

/// Points and combo rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub distance_per_meter: f64,
    pub common_token: u64,
    pub rare_token: u64,
    /// Subtracted from token score on a crash (floored at zero)
    pub crash_penalty: u64,
    pub boss_escape_bonus: u64,
    pub max_combo: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            distance_per_meter: 1.0,
            common_token: 100,
            rare_token: 500,
            crash_penalty: 50,
            boss_escape_bonus: 5000,
            max_combo: 5,
        }
    }
}

/// Slalom course layout and timing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlalomTuning {
    pub gate_count: u32,
    /// Distance between the two flags
    pub gate_width: f32,
    pub gate_height: f32,
    /// Vertical distance between consecutive gates
    pub gate_spacing: f32,
    /// Course starts this far below the initial camera top
    pub course_start_offset: f32,
    /// Obstacle-free stretch past the first gate slot
    pub safe_zone_extra: f32,
    /// Amplitude of the deterministic `sin(i * frequency)` weave
    pub weave_amplitude: f32,
    pub weave_frequency: f32,
    /// Total width of the random jitter added to each gate
    pub jitter: f32,
    /// Player must be this far below a gate before it resolves
    pub resolve_offset: f32,
    /// Seconds added per missed gate
    pub miss_penalty: f32,
    /// Fraction of the clock removed on a clean run
    pub clean_run_bonus: f32,
}

impl Default for SlalomTuning {
    fn default() -> Self {
        Self {
            gate_count: 20,
            gate_width: 120.0,
            gate_height: 40.0,
            gate_spacing: 200.0,
            course_start_offset: 200.0,
            safe_zone_extra: 50.0,
            weave_amplitude: 80.0,
            weave_frequency: 0.7,
            jitter: 40.0,
            resolve_offset: 20.0,
            miss_penalty: 5.0,
            clean_run_bonus: 0.10,
        }
    }
}

/// The pursuing boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Meters traveled before the boss appears (freerun only)
    pub trigger_distance: f32,
    /// Meters of lead needed to shake the boss off
    pub escape_distance: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Vertical pursuit multiplier
    pub vertical_pursuit: f32,
    /// Approaching switches to chasing inside this distance (pixels)
    pub chase_radius: f32,
    /// Hitbox scale for the capture test
    pub catch_scale: f32,
    /// Spawn this many canvas heights above the player
    pub spawn_offset: f32,
    /// Seconds between capture and the end of the session
    pub game_over_delay: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            trigger_distance: 2000.0,
            escape_distance: 2000.0,
            width: 80.0,
            height: 80.0,
            speed: 300.0,
            vertical_pursuit: 1.1,
            chase_radius: 400.0,
            catch_scale: 0.6,
            spawn_offset: 0.8,
            game_over_delay: 2.0,
        }
    }
}

/// Camera and collision presentation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    /// Player is kept this fraction of the view height from the top
    pub player_screen_y: f32,
    /// Visibility test margin (pixels)
    pub cull_margin: f32,
    /// Hitbox shrink applied before collision tests
    pub fairness_scale: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            player_screen_y: 0.30,
            cull_margin: 50.0,
            fairness_scale: 0.75,
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub terrain: TerrainTuning,
    pub score: ScoreTuning,
    pub slalom: SlalomTuning,
    pub boss: BossTuning,
    pub view: ViewTuning,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json(r#"{ "terrain": { "min_spawn_distance": 5.0 } }"#).unwrap();
        assert_eq!(config.terrain.min_spawn_distance, 5.0);
        assert_eq!(config.terrain.band_height, 100.0);
        assert_eq!(config.score, ScoreTuning::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
    }
}
