//! Fixed-rate stepping for the backdrop.
//!
//! Backdrop motion is tuned per loop invocation at 60 invocations per second.
//! [`FrameClock`] turns measured wall-clock time into a whole number of
//! invocations with an accumulator, so a 144 Hz display and a 30 Hz one
//! both see stars drift at the same speed.

use std::time::Instant;
use tracing::warn;

/// Fixed step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time credited to the accumulator. Longer stalls (window
/// drags, suspended laptops) are dropped rather than replayed.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulates elapsed time and hands out fixed steps.
pub struct FrameClock {
    previous_time: Instant,
    accumulator: f64,
    frame_count: u64,
    step_count: u64,
}

impl FrameClock {
    /// A clock starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
            step_count: 0,
        }
    }

    /// Measure time since the previous call and return the steps to run.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time)
    }

    /// Credit `frame_time` seconds and return the whole steps now due.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            steps += 1;
        }

        self.frame_count += 1;
        self.step_count += u64::from(steps);
        steps
    }

    /// Number of `tick`/`advance` calls so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total steps handed out.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
