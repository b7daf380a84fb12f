//! Audio subsystem.
//!
//! There is no playback backend. Requests are counted per path and logged so
//! callers can wire sound calls into the frame loop ahead of a real mixer.
//!
//! # Invariants
//! - `play_sound` never fails and never blocks.
//! - The missing-backend warning is emitted at most once per `Audio`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct Audio {
    requests: HashMap<PathBuf, u64>,
    warned: bool,
}

impl Audio {
    pub fn new() -> Self {
        tracing::debug!("audio stub created");
        Self::default()
    }

    /// Request playback of the sound at `path`.
    ///
    /// The file is not opened; the path is recorded as given.
    pub fn play_sound(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();

        if !self.warned {
            tracing::warn!("no audio backend available; sound requests are ignored");
            self.warned = true;
        }

        let count = self.requests.entry(path.to_path_buf()).or_insert(0);
        if *count == 0 {
            tracing::debug!("play_sound: {}", path.display());
        }
        *count += 1;
    }

    /// How many times `path` has been requested.
    pub fn request_count(&self, path: impl AsRef<Path>) -> u64 {
        self.requests.get(path.as_ref()).copied().unwrap_or(0)
    }

    /// Requests across all paths.
    pub fn total_requests(&self) -> u64 {
        self.requests.values().sum()
    }
}

pub fn crate_info() -> &'static str {
    "nyanchu-audio v0.1.0"
}
