//! Lightweight wall-clock timing for run summaries.
//!
//! Timers always measure; reporting goes through `tracing` so it is silent
//! unless a subscriber is listening at debug level.

use std::time::Instant;

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    /// Elapsed time so far, in seconds.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer, log the result and return elapsed seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::debug!(label = self.label, elapsed_s = elapsed, "timer stopped");
        elapsed
    }
}

/// Wall-clock breakdown of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunTiming {
    /// Project definitions to runtime parameters
    pub compile_time_s: f64,
    /// Integration, sweep or design computation
    pub solve_time_s: f64,
}

impl RunTiming {
    pub fn total_time_s(&self) -> f64 {
        self.compile_time_s + self.solve_time_s
    }
}
