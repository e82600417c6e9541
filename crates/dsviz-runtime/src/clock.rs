#![forbid(unsafe_code)]

//! Wall-clock source for driving the logical clock in real time.

use web_time::{Duration, Instant};

/// Measures time between successive laps.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous lap (or since [`start`](Self::start)).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::start()
    }
}
