//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// RGBA in 0..1
pub type Color = [f32; 4];

/// Colors for slope elements
pub mod colors {
    use super::Color;

    /// Letterbox bars
    pub const BACKDROP: Color = [0.05, 0.07, 0.1, 1.0];
    pub const SNOW_WHITE: Color = [0.94, 0.96, 0.98, 1.0];
    pub const SNOW_SHADOW: Color = [0.80, 0.86, 0.91, 1.0];
    pub const TRACK: Color = [0.71, 0.78, 0.84, 0.4];
    pub const SHADOW: Color = [0.0, 0.0, 0.0, 0.2];

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const DARK: Color = [0.2, 0.2, 0.2, 1.0];
    pub const MUTED: Color = [0.4, 0.4, 0.4, 1.0];
    pub const ACCENT_RED: Color = [0.91, 0.255, 0.259, 1.0];
    pub const GOLD: Color = [1.0, 0.843, 0.0, 1.0];
    pub const SUCCESS: Color = [0.0, 0.8, 0.4, 1.0];
    pub const ALERT: Color = [1.0, 0.0, 0.0, 1.0];
    pub const CRASH_ORANGE: Color = [1.0, 0.4, 0.0, 1.0];
    pub const SKIN: Color = [1.0, 0.88, 0.74, 1.0];

    pub const TREE_TRUNK: Color = [0.36, 0.25, 0.2, 1.0];
    pub const TREE_TOP: Color = [0.15, 0.4, 0.25, 1.0];
    pub const BLACK_HOLE: Color = [0.05, 0.0, 0.1, 1.0];
    pub const BLACK_HOLE_GLOW: Color = [0.48, 0.25, 0.89, 0.35];
    pub const RAMP_SIDE: Color = [0.55, 0.65, 0.75, 1.0];
    pub const RAMP_TOP: Color = [0.85, 0.9, 0.95, 1.0];

    pub const BOSS_SUIT: Color = [0.1, 0.1, 0.18, 1.0];
    pub const BOSS_ACCENT: Color = [0.48, 0.25, 0.89, 1.0];

    pub const WARNING_TINT: Color = [1.0, 0.0, 0.0, 0.1];
    pub const CAUGHT_OVERLAY: Color = [0.0, 0.0, 0.0, 0.5];
}
