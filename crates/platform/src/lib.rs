//! Window/Platform layer: owns the single OS window and drains its event queue.
//!
//! # Invariants
//! - A host owns at most one window, created in `open` and released in `close`.
//! - `poll_events` never blocks.
//! - Once a close has been requested it stays requested.

mod event;
mod headless;
mod host;
mod native;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod desktop;

pub use event::{KeyCode, PlatformEvent};
pub use headless::HeadlessHost;
pub use host::{PlatformError, WindowHost};
pub use native::{NativeHandle, native_handle};

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use desktop::DesktopHost;

pub fn crate_info() -> &'static str {
    "nyanchu-platform v0.1.0"
}
