//! Rendering
//!
//! Entities and the scene draw through the [`Canvas`] trait in logical
//! 800x600 pixels. [`VertexCanvas`] tessellates those calls into a triangle
//! list and [`RenderState`] maps it onto the WebGPU surface.

pub mod canvas;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::{Canvas, VertexCanvas};
pub use pipeline::RenderState;
pub use scene::draw_session;
pub use vertex::{Color, Vertex, colors};
