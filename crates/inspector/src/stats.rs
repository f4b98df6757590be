//! Wall-clock cost of physics steps, reported alongside the world stats.

use std::time::{Duration, Instant};

/// Times individual physics steps and averages them over a reporting window.
#[derive(Debug, Default)]
pub struct StepTimer {
    last: Duration,
    window_total: Duration,
    window_steps: u32,
}

impl StepTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `step` and record how long it took.
    pub fn time<R>(&mut self, step: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let out = step();
        self.record(start.elapsed());
        out
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.last = elapsed;
        self.window_total += elapsed;
        self.window_steps += 1;
    }

    /// Duration of the most recent step in milliseconds.
    pub fn last_ms(&self) -> f64 {
        self.last.as_secs_f64() * 1000.0
    }

    /// Mean step duration in milliseconds since the previous call; starts a new window.
    pub fn take_mean_ms(&mut self) -> f64 {
        let mean = if self.window_steps == 0 {
            0.0
        } else {
            self.window_total.as_secs_f64() * 1000.0 / f64::from(self.window_steps)
        };
        self.window_total = Duration::ZERO;
        self.window_steps = 0;
        mean
    }
}
