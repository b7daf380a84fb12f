//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - GPU handles are valid only between a successful `initialize` and `shutdown`.
//! - Every `draw_mesh` call yields exactly one log line and one recorded request.
//! - Backends are chosen at build time; consumers only see the [`Renderer`] trait.

mod metal;
mod renderer;
mod shader;

pub use metal::MetalRenderer;
pub use renderer::{MeshRequests, RenderError, RenderTarget, Renderer};
pub use shader::{DEFAULT_SHADER_ROOTS, ShaderError, ShaderFile, ShaderLoader};

pub fn crate_info() -> &'static str {
    "nyanchu-render v0.1.0"
}
