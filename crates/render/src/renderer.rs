use crate::shader::{DEFAULT_SHADER_ROOTS, ShaderError};
use nyanchu_common::{NativeWindow, WindowSize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Errors raised while bringing a renderer up.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render target has no native window")]
    NoWindow,
    #[error("renderer already initialized")]
    AlreadyInitialized,
    #[error("failed to create surface: {0}")]
    Surface(String),
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(String),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("failed to build render pipeline: {0}")]
    Pipeline(String),
    #[error(transparent)]
    Shader(#[from] ShaderError),
}

/// Everything a backend needs to attach to a window.
#[derive(Clone)]
pub struct RenderTarget {
    /// The OS window, if any. Placeholder backends accept `None`.
    pub window: Option<Arc<dyn NativeWindow>>,
    /// Initial drawable size.
    pub size: WindowSize,
    /// Directories searched, in order, for shader files.
    pub shader_roots: Vec<PathBuf>,
}

impl RenderTarget {
    /// A target without an OS window, for placeholder backends.
    pub fn headless(size: WindowSize) -> Self {
        Self {
            window: None,
            size,
            shader_roots: DEFAULT_SHADER_ROOTS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTarget")
            .field("window", &self.window.is_some())
            .field("size", &self.size)
            .field("shader_roots", &self.shader_roots)
            .finish()
    }
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// The engine owns exactly one renderer, picked at compile time for the
/// target platform. Calls made before a successful `initialize` or after
/// `shutdown` are ignored by the backend.
pub trait Renderer: Default {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    /// Attach to the target window and create backend resources.
    fn initialize(&mut self, target: RenderTarget) -> Result<(), RenderError>;

    /// Submit and present one frame.
    fn render(&mut self);

    /// Release backend resources. Safe to call more than once.
    fn shutdown(&mut self);

    /// Request that the named mesh be drawn this frame.
    ///
    /// Mesh loading is not implemented; the name is logged and recorded
    /// verbatim.
    fn draw_mesh(&mut self, name: &str);

    /// Mesh names requested since the last `render`.
    fn mesh_requests(&self) -> &[String];

    /// True between a successful `initialize` and `shutdown`.
    fn is_ready(&self) -> bool;

    /// React to a change of the drawable size.
    fn resize(&mut self, _size: WindowSize) {}
}

/// Per-frame record of `draw_mesh` calls, shared by the backends.
#[derive(Debug, Clone, Default)]
pub struct MeshRequests {
    names: Vec<String>,
}

impl MeshRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and remember one request. The name is stored unmodified.
    pub fn record(&mut self, backend: &str, name: &str) {
        tracing::info!(backend, "drawing mesh: {name}");
        self.names.push(name.to_owned());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
