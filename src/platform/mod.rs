//! Platform abstraction layer
//!
//! Turns browser events into the per-frame [`TickInput`](crate::sim::TickInput)
//! snapshot. Event capture itself lives in the wasm driver.

pub mod input;

pub use input::{InputState, SWIPE_DEAD_ZONE, is_game_key};
