//! Forgiving box collision between entities
//!
//! Sprites have transparent corners and players judge hits by eye, so both
//! boxes are shrunk about their centers before the overlap test. Touching
//! edges never count.

use super::entity::{Body, Bounds, Entity};

/// Overlap test with a shrink factor applied to both boxes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionManager {
    pub scale: f32,
}

impl CollisionManager {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// True when both entities are live and their scaled boxes overlap
    pub fn check<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: Entity + ?Sized,
        B: Entity + ?Sized,
    {
        self.check_bodies(a.body(), b.body())
    }

    pub fn check_bodies(&self, a: &Body, b: &Body) -> bool {
        if !(a.active && a.collidable && b.active && b.collidable) {
            return false;
        }
        fair_overlap(&a.bounds(), &b.bounds(), self.scale)
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new(0.75)
    }
}

/// Overlap of `a` and `b` after both are scaled by `scale`
pub fn fair_overlap(a: &Bounds, b: &Bounds, scale: f32) -> bool {
    a.scaled(scale).overlaps(&b.scaled(scale))
}
