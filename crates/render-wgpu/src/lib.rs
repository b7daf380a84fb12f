//! wgpu render backend for the nyanchu engine.
//!
//! Draws one hardcoded colored triangle per frame over a flat clear color.
//! Shader sources are WGSL files found through [`nyanchu_render::ShaderLoader`].
//!
//! # Invariants
//! - GPU handles exist only between `initialize` and `shutdown`.
//! - A failed surface acquire skips the frame; it never panics.

mod gpu;
mod shaders;

pub use gpu::{CLEAR_COLOR, PosColorVertex, TRIANGLE_VERTICES, WgpuRenderer, rgba_to_color};
pub use shaders::{FRAGMENT_SHADER, TriangleShaders, VERTEX_SHADER};
