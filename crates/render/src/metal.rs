use crate::renderer::{MeshRequests, RenderError, RenderTarget, Renderer};
use nyanchu_common::WindowSize;

/// Placeholder Metal backend.
///
/// Submits no GPU work. It tracks lifecycle and frame count so the frame
/// loop behaves the same as with a real backend, and it is what headless runs
/// use on every platform.
#[derive(Debug, Default)]
pub struct MetalRenderer {
    ready: bool,
    size: WindowSize,
    frames: u64,
    requests: MeshRequests,
}

impl MetalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered since `initialize`.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn size(&self) -> WindowSize {
        self.size
    }
}

impl Renderer for MetalRenderer {
    fn backend_name(&self) -> &'static str {
        "metal"
    }

    fn initialize(&mut self, target: RenderTarget) -> Result<(), RenderError> {
        if self.ready {
            return Err(RenderError::AlreadyInitialized);
        }
        tracing::warn!(
            "metal renderer is a placeholder; no GPU work will be submitted (window attached: {})",
            target.window.is_some()
        );
        self.size = target.size;
        self.frames = 0;
        self.ready = true;
        Ok(())
    }

    fn render(&mut self) {
        self.requests.clear();
        if self.ready {
            self.frames += 1;
        }
    }

    fn shutdown(&mut self) {
        if !self.ready {
            return;
        }
        self.ready = false;
        self.requests.clear();
        tracing::debug!("metal renderer shut down after {} frames", self.frames);
    }

    fn draw_mesh(&mut self, name: &str) {
        let backend = self.backend_name();
        self.requests.record(backend, name);
    }

    fn mesh_requests(&self) -> &[String] {
        self.requests.as_slice()
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn resize(&mut self, size: WindowSize) {
        self.size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_renderer() -> MetalRenderer {
        let mut r = MetalRenderer::new();
        r.initialize(RenderTarget::headless(WindowSize::default()))
            .unwrap();
        r
    }

    #[test]
    fn initialize_without_window() {
        let r = ready_renderer();
        assert!(r.is_ready());
        assert_eq!(r.size(), WindowSize::new(800, 600));
    }

    #[test]
    fn double_initialize_is_rejected() {
        let mut r = ready_renderer();
        let err = r
            .initialize(RenderTarget::headless(WindowSize::default()))
            .unwrap_err();
        assert!(matches!(err, RenderError::AlreadyInitialized));
    }

    #[test]
    fn draw_mesh_records_one_request_per_call() {
        let mut r = ready_renderer();
        r.draw_mesh("x.obj");
        assert_eq!(r.mesh_requests(), ["x.obj"]);

        r.draw_mesh("x.obj");
        assert_eq!(r.mesh_requests().len(), 2);
    }

    #[test]
    fn render_counts_frames_and_clears_requests() {
        let mut r = ready_renderer();
        r.draw_mesh("cube.obj");
        r.render();
        r.render();
        assert_eq!(r.frames(), 2);
        assert!(r.mesh_requests().is_empty());
    }

    #[test]
    fn render_before_initialize_is_ignored() {
        let mut r = MetalRenderer::new();
        r.render();
        assert_eq!(r.frames(), 0);
        assert!(!r.is_ready());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let mut r = ready_renderer();
        r.shutdown();
        r.shutdown();
        assert!(!r.is_ready());
        r.render();
        assert_eq!(r.frames(), 0);
    }

    #[test]
    fn resize_tracks_size() {
        let mut r = ready_renderer();
        r.resize(WindowSize::new(320, 240));
        assert_eq!(r.size(), WindowSize::new(320, 240));
    }
}
