use std::time::{Duration, Instant};

/// Shortest step a frame may report.
const DT_MIN: Duration = Duration::from_micros(100);
/// Longest step a frame may report, after a stall or a paused debugger.
const DT_MAX: Duration = Duration::from_millis(250);

/// Timing of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped to [100 us, 250 ms].
    pub dt: f32,
    /// Zero-based frame counter.
    pub frame_index: u64,
}

/// Produces one [`FrameTime`] per `tick`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
        }
    }

    /// Restart the delta baseline without touching the frame counter.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).clamp(DT_MIN, DT_MAX);
        self.last = now;

        let time = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index += 1;
        time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_from_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        clock.reset();
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn back_to_back_ticks_report_minimum_step() {
        let mut clock = FrameClock::new();
        clock.last = Instant::now() + Duration::from_secs(1);
        assert_eq!(clock.tick().dt, DT_MIN.as_secs_f32());
    }

    #[test]
    fn long_stall_is_clamped_to_max() {
        let mut clock = FrameClock::new();
        clock.last = Instant::now().checked_sub(Duration::from_secs(5)).unwrap();
        assert_eq!(clock.tick().dt, DT_MAX.as_secs_f32());
    }
}
