//! Wall-clock source for the windowed driver.
//!
//! The renderer core only consumes millisecond timestamps, so tests drive
//! it with synthetic time; this clock is the one real-time source, used by
//! the window loop.

use std::time::Instant;

/// Monotonic millisecond clock.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
