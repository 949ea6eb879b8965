//! Gameplay simulation
//!
//! Everything that decides what happens on the slope lives here:
//! - Caller-driven timestep (`PlaySession::tick(input, dt)`)
//! - Seeded RNG only
//! - Pool-owned entities, released only between iterations
//! - No platform dependencies; rendering goes through the `Canvas` trait

pub mod boss;
pub mod camera;
pub mod collision;
pub mod entity;
pub mod play;
pub mod player;
pub mod pool;
pub mod rng;
pub mod score;
pub mod terrain;

pub use boss::{Boss, BossState};
pub use camera::Camera;
pub use collision::CollisionManager;
pub use entity::{
    Body, Bounds, Collectible, Entity, Gate, GateStatus, Npc, NpcKind, Obstacle, ObstacleKind,
    Ramp, TokenKind,
};
pub use play::{
    GameMode, PlaySession, Popup, PopupTone, SessionSummary, Swipe, TickInput, TickOutcome,
};
pub use player::{Direction, Player, PlayerState};
pub use pool::{ObjectPool, PoolHandle, Poolable};
pub use rng::{GameRng, RandomSource};
pub use score::ScoreBoard;
pub use terrain::TerrainGenerator;
