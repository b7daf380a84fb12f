use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::fmt;

/// Default window width in physical pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default window height in physical pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default window title.
pub const DEFAULT_TITLE: &str = "Nyanthu Engine";

/// Anything that can hand out raw window and display handles.
///
/// Renderers receive windows through this trait so they never depend on the
/// windowing library directly.
pub trait NativeWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {}

impl<T> NativeWindow for T where T: HasWindowHandle + HasDisplayHandle + Send + Sync {}

/// Window dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (minimized windows report this).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size with both dimensions clamped to at least 1.
    pub fn clamped(&self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
        }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Window creation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub size: WindowSize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: WindowSize::default(),
        }
    }
}
