//! Millisecond time source abstraction.
//!
//! Every timed state machine in this crate takes `now_ms` as an argument
//! instead of reading a clock. The control loop reads a [`TimeSource`] once
//! per tick and passes the value down, so a tick sees one consistent time.

use core::cell::Cell;

/// Platform-agnostic millisecond clock for the control loop.
///
/// # Example
///
/// ```
/// use corner_pilot_core::traits::{MockTime, TimeSource};
///
/// fn tick_due<T: TimeSource>(time: &T, last_tick_ms: &mut u64, period_ms: u64) -> bool {
///     if time.elapsed_since(*last_tick_ms) >= period_ms {
///         *last_tick_ms = time.now_ms();
///         return true;
///     }
///     false
/// }
///
/// let time = MockTime::new();
/// let mut last = 0;
/// assert!(!tick_due(&time, &mut last, 10));
/// time.advance(10);
/// assert!(tick_due(&time, &mut last, 10));
/// ```
pub trait TimeSource: Clone {
    /// Returns current time in milliseconds since program start.
    fn now_ms(&self) -> u64;

    /// Returns elapsed milliseconds since a reference point.
    ///
    /// Saturates to zero if the reference lies in the future.
    fn elapsed_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with manually advanced time.
///
/// ```
/// use corner_pilot_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance(170);
/// assert_eq!(time.now_ms(), 170);
/// ```
#[derive(Clone, Default, Debug)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get() + ms);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}
