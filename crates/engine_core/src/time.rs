//! Time management for the frame loop.

use std::time::{Duration, Instant};

/// Tracks frame timing for the event loop. Elapsed time is the clock the
/// scheduler runs on.
#[derive(Debug)]
pub struct Time {
    /// Time when the screen started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Target interval between redraws.
    frame_interval: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager targeting 30 redraws per second.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            elapsed: Duration::ZERO,
            frame_interval: Duration::from_secs_f64(1.0 / 30.0),
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_frame = now;
        self.elapsed = now - self.start_time;
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Instant at which the next redraw is due.
    pub fn next_frame_at(&self) -> Instant {
        self.last_frame + self.frame_interval
    }
}
