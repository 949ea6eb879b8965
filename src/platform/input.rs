//! Keyboard and touch mapping
//!
//! Keys are tracked by `KeyboardEvent.code` so the layout does not matter.
//! Held keys drive steering and boost; jump, pause and confirm fire once per
//! press until [`InputState::end_frame`] clears them.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{Swipe, TickInput};

/// Touch travel (px) before a drag counts as a swipe
pub const SWIPE_DEAD_ZONE: f32 = 20.0;

const LEFT: &[&str] = &["ArrowLeft", "KeyA"];
const RIGHT: &[&str] = &["ArrowRight", "KeyD"];
const UP: &[&str] = &["ArrowUp", "KeyW"];
const DOWN: &[&str] = &["ArrowDown", "KeyS"];
const JUMP: &[&str] = &["Space", "Insert"];
const BOOST: &[&str] = &["KeyF"];
const PAUSE: &[&str] = &["Escape", "KeyP"];
const CONFIRM: &[&str] = &["Enter", "Space"];

/// Keys whose browser default (scrolling, etc.) should be suppressed
pub fn is_game_key(code: &str) -> bool {
    [LEFT, RIGHT, UP, DOWN, JUMP, BOOST, PAUSE, CONFIRM]
        .iter()
        .any(|set| set.contains(&code))
}

#[derive(Debug, Clone, Copy)]
struct TouchTrack {
    start: Vec2,
    current: Vec2,
    /// Left the dead zone at some point; such a touch is never a tap
    dragged: bool,
}

/// Accumulated device state between frames
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<String>,
    just_pressed: HashSet<String>,
    touch: Option<TouchTrack>,
    tapped: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        // Auto-repeat keydowns do not count as new presses
        if self.held.insert(code.to_string()) {
            self.just_pressed.insert(code.to_string());
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
    }

    pub fn touch_start(&mut self, at: Vec2) {
        self.touch = Some(TouchTrack {
            start: at,
            current: at,
            dragged: false,
        });
    }

    pub fn touch_move(&mut self, at: Vec2) {
        if let Some(touch) = self.touch.as_mut() {
            touch.current = at;
            let d = at - touch.start;
            if d.x.abs() >= SWIPE_DEAD_ZONE || d.y.abs() >= SWIPE_DEAD_ZONE {
                touch.dragged = true;
            }
        }
    }

    /// A touch released without leaving the dead zone is a tap (confirm)
    pub fn touch_end(&mut self) {
        if let Some(touch) = self.touch.take() {
            self.tapped |= !touch.dragged;
        }
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn held_any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.held.contains(*c))
    }

    fn pressed_any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.just_pressed.contains(*c))
    }

    /// Dominant axis of the active drag, once it leaves the dead zone
    pub fn swipe(&self) -> Option<Swipe> {
        let touch = self.touch?;
        let d = touch.current - touch.start;
        if d.x.abs() < SWIPE_DEAD_ZONE && d.y.abs() < SWIPE_DEAD_ZONE {
            return None;
        }
        Some(if d.x.abs() > d.y.abs() {
            if d.x > 0.0 { Swipe::Right } else { Swipe::Left }
        } else if d.y > 0.0 {
            Swipe::Down
        } else {
            Swipe::Up
        })
    }

    /// Snapshot for this frame
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.held_any(LEFT),
            right: self.held_any(RIGHT),
            up: self.held_any(UP),
            down: self.held_any(DOWN),
            jump: self.pressed_any(JUMP),
            boost: self.held_any(BOOST),
            pause: self.pressed_any(PAUSE),
            confirm: self.pressed_any(CONFIRM) || self.tapped,
            swipe: self.swipe(),
        }
    }

    /// Clear edge-triggered state after the frame consumed it
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.tapped = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_and_edge_keys() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        input.key_down("Space");
        let frame = input.snapshot();
        assert!(frame.left);
        assert!(frame.jump);
        assert!(frame.confirm);

        input.end_frame();
        let frame = input.snapshot();
        assert!(frame.left, "held keys persist");
        assert!(!frame.jump, "presses fire once");

        // Auto-repeat while held
        input.key_down("Space");
        assert!(!input.snapshot().jump);

        input.key_up("Space");
        input.key_down("Space");
        assert!(input.snapshot().jump);
    }

    #[test]
    fn test_key_aliases() {
        let mut input = InputState::new();
        for code in ["ArrowRight", "KeyW", "KeyS", "KeyF", "KeyP", "Insert"] {
            input.key_down(code);
        }
        let frame = input.snapshot();
        assert!(frame.right && frame.up && frame.down && frame.boost);
        assert!(frame.pause && frame.jump);
        assert!(!frame.confirm);
    }

    #[test]
    fn test_swipe_dead_zone() {
        let mut input = InputState::new();
        input.touch_start(Vec2::new(100.0, 100.0));
        input.touch_move(Vec2::new(115.0, 110.0));
        assert_eq!(input.swipe(), None);

        input.touch_move(Vec2::new(130.0, 110.0));
        assert_eq!(input.swipe(), Some(Swipe::Right));

        input.touch_move(Vec2::new(90.0, 40.0));
        assert_eq!(input.swipe(), Some(Swipe::Up));

        input.touch_end();
        assert_eq!(input.swipe(), None);
    }

    #[test]
    fn test_tap_confirms_once_on_release() {
        let mut input = InputState::new();
        input.touch_start(Vec2::ZERO);
        assert!(!input.snapshot().confirm, "not before the finger lifts");
        input.touch_move(Vec2::new(5.0, 5.0));
        input.touch_end();
        assert!(input.snapshot().confirm);
        input.end_frame();
        assert!(!input.snapshot().confirm);
    }

    #[test]
    fn test_swipe_is_not_a_tap() {
        let mut input = InputState::new();
        input.touch_start(Vec2::new(100.0, 100.0));
        input.touch_move(Vec2::new(150.0, 100.0));
        assert_eq!(input.snapshot().swipe, Some(Swipe::Right));
        assert!(!input.snapshot().confirm);

        // Dragging back inside the dead zone does not turn it into a tap
        input.touch_move(Vec2::new(105.0, 100.0));
        input.touch_end();
        assert!(!input.snapshot().confirm);
    }

    #[test]
    fn test_game_keys() {
        assert!(is_game_key("ArrowDown"));
        assert!(is_game_key("Escape"));
        assert!(!is_game_key("KeyQ"));
    }
}
