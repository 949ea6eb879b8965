//! Drawing surface used by entities and the scene
//!
//! All coordinates are screen pixels in the 800x600 logical canvas.

use glam::Vec2;

use super::shapes;
use super::vertex::{Color, Vertex};
use crate::assets::Sprite;

const CIRCLE_SEGMENTS: u32 = 24;

/// Immediate-mode 2D drawing
pub trait Canvas {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Draw `sprite` centered at `center`, scaled to `size`.
    ///
    /// Returns false when this surface cannot texture the sprite; the caller
    /// then draws its placeholder instead.
    fn draw_sprite(&mut self, sprite: &Sprite, center: Vec2, size: Vec2) -> bool;
}

/// Canvas that tessellates into a triangle list for [`super::RenderState`]
#[derive(Debug, Default)]
pub struct VertexCanvas {
    vertices: Vec<Vertex>,
}

impl VertexCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Reset for the next frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Canvas for VertexCanvas {
    fn fill_rect(&mut self, center: Vec2, size: Vec2, color: Color) {
        self.vertices.extend(shapes::rect(center, size, color));
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.vertices.extend(shapes::triangle(a, b, c, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let half = width * 0.5;
        self.vertices.extend(shapes::ring(
            center,
            (radius - half).max(0.0),
            radius + half,
            color,
            CIRCLE_SEGMENTS,
        ));
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        self.vertices
            .extend(shapes::ellipse(center, radii, color, CIRCLE_SEGMENTS));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    /// Flat-colored triangles only: every sprite falls back to its placeholder
    fn draw_sprite(&mut self, _sprite: &Sprite, _center: Vec2, _size: Vec2) -> bool {
        false
    }
}
