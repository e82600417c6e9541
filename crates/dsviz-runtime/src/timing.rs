#![forbid(unsafe_code)]

//! Per-page pacing of animation steps.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use dsviz_core::{OperationKind, Structure};

/// How long each step and the post-animation pause last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingProfile {
    /// Delay between successive steps.
    pub tick_interval_ms: u64,
    /// Pause after the final step before returning to idle.
    pub settle_delay_ms: u64,
    /// Extra pause after a peek so the inspected element stays flagged.
    pub peek_linger_ms: u64,
}

impl TimingProfile {
    /// Pacing each page used before any configuration is applied.
    #[must_use]
    pub const fn for_structure(structure: Structure) -> Self {
        match structure {
            Structure::Array => Self::new(1200, 1000, 0),
            Structure::LinkedList => Self::new(1500, 1500, 0),
            Structure::Stack => Self::new(1000, 800, 1500),
            Structure::Queue => Self::new(1500, 1500, 2000),
        }
    }

    #[must_use]
    pub const fn new(tick_interval_ms: u64, settle_delay_ms: u64, peek_linger_ms: u64) -> Self {
        Self {
            tick_interval_ms,
            settle_delay_ms,
            peek_linger_ms,
        }
    }

    /// Step interval. A zero interval is clamped to 1ms.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Settle pause for an operation of `kind`.
    #[must_use]
    pub fn settle_for(&self, kind: OperationKind) -> Duration {
        let linger = if kind == OperationKind::Peek {
            self.peek_linger_ms
        } else {
            0
        };
        Duration::from_millis(self.settle_delay_ms.saturating_add(linger))
    }

    /// Wall time from start to idle for an operation with `steps` steps.
    #[must_use]
    pub fn total_for(&self, kind: OperationKind, steps: usize) -> Duration {
        self.tick_interval() * steps as u32 + self.settle_for(kind)
    }
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::for_structure(Structure::Array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_lingers() {
        let t = TimingProfile::for_structure(Structure::Stack);
        assert_eq!(t.settle_for(OperationKind::Pop), Duration::from_millis(800));
        assert_eq!(t.settle_for(OperationKind::Peek), Duration::from_millis(2300));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let t = TimingProfile::new(0, 0, 0);
        assert_eq!(t.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn total_covers_every_step() {
        let t = TimingProfile::for_structure(Structure::LinkedList);
        assert_eq!(
            t.total_for(OperationKind::Insert, 4),
            Duration::from_millis(4 * 1500 + 1500)
        );
    }
}
