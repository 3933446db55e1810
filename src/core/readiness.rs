//! Readiness tracker: time spent ready vs. time observed
//!
//! Each observation closes the interval since the previous one and
//! attributes it to the readiness value that held during it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct ReadinessTracker {
    /// Previous observation and whether the subject was ready then
    last: Option<(Instant, bool)>,
    ready: Duration,
    total: Duration,
}

impl ReadinessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, now: Instant, ready: bool) {
        if let Some((then, was_ready)) = self.last {
            let elapsed = now.saturating_duration_since(then);
            self.total += elapsed;
            if was_ready {
                self.ready += elapsed;
            }
        }
        self.last = Some((now, ready));
    }

    pub fn ready_ms(&self) -> u64 {
        self.ready.as_millis() as u64
    }

    pub fn total_ms(&self) -> u64 {
        self.total.as_millis() as u64
    }

    /// 0-100; 0 until some time has been observed
    pub fn percentage(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.ready.as_secs_f64() / self.total.as_secs_f64() * 100.0
    }
}
