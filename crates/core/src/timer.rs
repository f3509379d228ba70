//! Pausable countdown timer
//!
//! A [`Timer`] is a plain value: it never reads a clock. Every transition
//! takes the current time in milliseconds, which makes the lift macros and
//! the ejection chain deterministic under test (advance a [`MockTime`] and
//! call `update` again).
//!
//! Elapsed time accrues only while the timer is running. `reset` clears the
//! accumulated time but leaves the paused/running state untouched.
//!
//! [`MockTime`]: crate::traits::MockTime

/// Countdown timer with pause/resume and injected time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Countdown length in milliseconds
    duration_ms: u32,
    /// Time the current running span started (`None` while paused)
    started_at_ms: Option<u64>,
    /// Time accumulated by previous running spans
    accumulated_ms: u64,
}

impl Timer {
    /// Create a timer that starts running at `now_ms`.
    pub const fn started(duration_ms: u32, now_ms: u64) -> Self {
        Self {
            duration_ms,
            started_at_ms: Some(now_ms),
            accumulated_ms: 0,
        }
    }

    /// Create a paused timer with zero elapsed time.
    pub const fn paused(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            started_at_ms: None,
            accumulated_ms: 0,
        }
    }

    /// Countdown length in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// True while time is not accruing.
    pub fn is_paused(&self) -> bool {
        self.started_at_ms.is_none()
    }

    /// Start accruing time. No effect if already running.
    pub fn resume(&mut self, now_ms: u64) {
        if self.started_at_ms.is_none() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Stop accruing time, keeping what has elapsed so far.
    pub fn pause(&mut self, now_ms: u64) {
        if let Some(start) = self.started_at_ms.take() {
            self.accumulated_ms += now_ms.saturating_sub(start);
        }
    }

    /// Clear elapsed time. A running timer keeps running from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.accumulated_ms = 0;
        if self.started_at_ms.is_some() {
            self.started_at_ms = Some(now_ms);
        }
    }

    /// Total time accrued while running.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let running = match self.started_at_ms {
            Some(start) => now_ms.saturating_sub(start),
            None => 0,
        };
        self.accumulated_ms + running
    }

    /// Time left before the countdown completes (zero once done).
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        (self.duration_ms as u64).saturating_sub(self.elapsed_ms(now_ms))
    }

    /// True once elapsed time reaches the duration.
    pub fn is_done(&self, now_ms: u64) -> bool {
        self.elapsed_ms(now_ms) >= self.duration_ms as u64
    }
}
