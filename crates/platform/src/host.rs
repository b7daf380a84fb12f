use crate::event::PlatformEvent;
use crate::native::NativeHandle;
use nyanchu_common::{NativeWindow, WindowConfig, WindowSize};
use std::sync::Arc;

/// Errors from window/platform operations.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("event loop exited before the window was created (code {0})")]
    ExitedEarly(i32),
}

/// The window/platform capability the engine drives.
///
/// A host owns exactly one window. The engine creates it in `init` through
/// [`WindowHost::open`] and releases it in `shutdown` through
/// [`WindowHost::close`].
pub trait WindowHost: Sized {
    /// Create the window described by `config`.
    fn open(config: &WindowConfig) -> Result<Self, PlatformError>;

    /// Drain the OS event queue without blocking.
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    /// True once the OS (or the user) asked the window to close.
    fn close_requested(&self) -> bool;

    /// Flag the window as closing, as if the OS had asked.
    fn request_close(&mut self);

    /// Current drawable size.
    fn size(&self) -> WindowSize;

    /// Shared handle for renderers. `None` when there is no OS window.
    fn native_window(&self) -> Option<Arc<dyn NativeWindow>>;

    /// Platform-specific raw handle of the window.
    fn native_handle(&self) -> NativeHandle;

    /// Destroy the window. Further calls are no-ops.
    fn close(&mut self);
}
