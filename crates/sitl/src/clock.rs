//! Simulated millisecond clock

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use corner_pilot_core::traits::TimeSource;

/// Lockstep clock shared between the control loop and the motion
/// controller. Time only moves when the simulation advances it.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now_ms: Arc<AtomicU64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl TimeSource for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let clock = SimClock::new();
        let other = clock.clone();
        clock.advance(25);
        assert_eq!(other.now_ms(), 25);
        assert_eq!(other.elapsed_since(5), 20);
    }
}
