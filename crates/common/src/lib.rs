//! Shared types used across the nyanchu crates.
//!
//! # Invariants
//! - Window sizes are never zero in either dimension once clamped for GPU use.

pub mod types;

pub use types::{
    DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH, NativeWindow, WindowConfig, WindowSize,
};

pub fn crate_info() -> &'static str {
    "nyanchu-common v0.1.0"
}
