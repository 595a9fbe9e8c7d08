//! Fixed-rate display scheduler.
//!
//! Real hosts schedule ticks from the display's own refresh callback.
//! Headless runs have no display, so this scheduler fakes a steady
//! cadence by sleeping out the remainder of each frame budget. It never
//! tries to catch up: a blown frame just starts the next budget late,
//! which is exactly how a dropped vsync behaves.

use std::time::{Duration, Instant};

use mosaic_core::DisplayScheduler;

/// Sleeps out the remainder of a fixed per-frame budget.
#[derive(Debug)]
pub struct FixedRateScheduler {
    budget: Duration,
    frame_start: Instant,
}

impl FixedRateScheduler {
    /// Creates a scheduler targeting `fps` frames per second.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            frame_start: Instant::now(),
        }
    }
}

impl DisplayScheduler for FixedRateScheduler {
    fn await_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.budget {
            std::thread::sleep(self.budget - elapsed);
        }
        self.frame_start = Instant::now();
    }
}
