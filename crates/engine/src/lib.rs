//! Engine: owns the window host, the renderer, the audio stub and the ECS
//! world, and drives them through a pull-style frame loop.
//!
//! ```text
//! init -> while is_running { poll_events -> begin_frame -> .. -> end_frame } -> shutdown
//! ```
//!
//! # Invariants
//! - State moves only forward: `Uninitialized -> Running -> ShuttingDown -> Terminated`
//!   (or straight from `Uninitialized` to `Terminated`).
//! - The window is created once in `init` and released once in `shutdown`.
//! - Frame operations outside `Running` are ignored and logged.

mod backend;
mod engine;
mod state;
mod time;

pub use backend::{PlatformHost, PlatformRenderer};
pub use engine::{Engine, EngineConfig, EngineError, InitReport};
pub use state::EngineState;
pub use time::{FrameClock, FrameTime};

pub fn crate_info() -> &'static str {
    "nyanchu-engine v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_info_works() {
        assert!(crate_info().contains("nyanchu-engine"));
    }
}
