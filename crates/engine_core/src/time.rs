//! Time management for the fixed-step simulation loop.

use std::time::{Duration, Instant};

/// Longest frame the accumulator will accept; anything slower is clamped so a
/// stall cannot queue up an unbounded number of physics ticks.
pub const MAX_FRAME_TIME: Duration = Duration::from_millis(100);

/// Upper bound for [`Time::set_time_scale`].
pub const MAX_TIME_SCALE: f64 = 4.0;

/// Manages frame timing and the fixed-timestep accumulator.
#[derive(Debug)]
pub struct Time {
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame, after clamping.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Fixed timestep for physics (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
    /// Multiplier applied to frame time before it is accumulated.
    time_scale: f64,
    /// Simulated time consumed by fixed updates.
    simulation_time: Duration,
    /// Fixed updates run since start.
    fixed_steps: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta: Duration::ZERO,
            frame_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
            time_scale: 1.0,
            simulation_time: Duration::ZERO,
            fixed_steps: 0,
        }
    }

    /// Update timing from the wall clock at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        let frame = now - self.last_frame;
        self.last_frame = now;
        self.advance(frame);
    }

    /// Feed an externally measured frame duration into the accumulator.
    pub fn advance(&mut self, frame: Duration) {
        if frame > MAX_FRAME_TIME {
            log::debug!("Clamping {:?} frame to {:?}", frame, MAX_FRAME_TIME);
        }
        self.delta = frame.min(MAX_FRAME_TIME);
        self.frame_count += 1;
        self.accumulator += self.delta.mul_f64(self.time_scale);
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get the number of frames fed in so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the fixed timestep in seconds.
    pub fn fixed_timestep_seconds(&self) -> f32 {
        self.fixed_timestep.as_secs_f32()
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            self.simulation_time += self.fixed_timestep;
            self.fixed_steps += 1;
            true
        } else {
            false
        }
    }

    /// Simulated seconds consumed by fixed updates so far.
    pub fn simulation_seconds(&self) -> f64 {
        self.simulation_time.as_secs_f64()
    }

    /// Number of fixed updates run so far.
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    /// Set the fixed timestep rate in Hz. Non-finite or non-positive rates are ignored.
    pub fn set_fixed_rate(&mut self, hz: f64) {
        if !hz.is_finite() || hz <= 0.0 {
            log::warn!("Ignoring fixed rate of {} Hz", hz);
            return;
        }
        match Duration::try_from_secs_f64(1.0 / hz) {
            Ok(step) if !step.is_zero() => self.fixed_timestep = step,
            _ => log::warn!("Ignoring fixed rate of {} Hz", hz),
        }
    }

    /// Scale applied to incoming frame time, clamped to `0..=MAX_TIME_SCALE`.
    /// NaN is ignored.
    pub fn set_time_scale(&mut self, scale: f64) {
        if scale.is_nan() {
            log::warn!("Ignoring time scale of {}", scale);
            return;
        }
        self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}
