//! Tick timing utilities

use std::time::{Duration, Instant};

/// Accumulating timer for measuring the cost of repeated simulation ticks
///
/// Wrap each measured region in [`begin`](Self::begin) / [`end`](Self::end);
/// the timer keeps the total, peak and sample count.
#[derive(Debug, Default)]
pub struct TickTimer {
    started: Option<Instant>,
    total: Duration,
    peak: Duration,
    samples: u64,
}

impl TickTimer {
    /// Create a new idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring a tick
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Finish measuring the current tick and return its duration
    ///
    /// Returns `None` when no tick was started.
    pub fn end(&mut self) -> Option<Duration> {
        let elapsed = self.started.take()?.elapsed();
        self.total += elapsed;
        self.peak = self.peak.max(elapsed);
        self.samples += 1;
        Some(elapsed)
    }

    /// Run `f` as one measured tick
    pub fn measure<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.begin();
        let result = f();
        self.end();
        result
    }

    /// Number of completed ticks
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Total time spent in measured ticks
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Longest single tick
    pub fn peak(&self) -> Duration {
        self.peak
    }

    /// Average tick duration in microseconds
    pub fn average_micros(&self) -> f32 {
        if self.samples == 0 {
            0.0
        } else {
            self.total.as_secs_f32() * 1_000_000.0 / self.samples as f32
        }
    }

    /// Check if a tick is currently being measured
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut timer = TickTimer::new();
        assert!(timer.end().is_none());
        assert_eq!(timer.samples(), 0);
        assert_eq!(timer.average_micros(), 0.0);
    }

    #[test]
    fn test_measure_accumulates_samples() {
        let mut timer = TickTimer::new();
        let value = timer.measure(|| 21 * 2);
        timer.measure(|| ());

        assert_eq!(value, 42);
        assert_eq!(timer.samples(), 2);
        assert!(timer.peak() <= timer.total());
        assert!(!timer.is_running());
    }
}
