//! Inspector settings. Loaded from inspector.ron at startup.

use glam::Vec3;
use physics::WorldSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Bounds for the simulated frame rate of the headless loop, in Hz.
const FRAME_RATE_RANGE: (f64, f64) = (1.0, 1000.0);
/// Longest run the headless loop will simulate, in seconds.
const MAX_DURATION: f64 = 3600.0;

/// Scene and loop settings. Loaded from `inspector.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectorConfig {
    /// Vertical gravity in m/s².
    #[serde(default = "default_gravity_y")]
    pub gravity_y: f32,
    /// Restitution given to every body.
    #[serde(default = "default_restitution")]
    pub restitution: f32,
    /// Friction given to every body.
    #[serde(default = "default_friction")]
    pub friction: f32,
    /// Height new bodies are dropped from.
    #[serde(default = "default_spawn_height")]
    pub spawn_height: f32,
    /// Number of random bodies in the initial scene.
    #[serde(default = "default_initial_bodies")]
    pub initial_bodies: usize,
    /// Multiplier on frame time fed to the fixed-step accumulator.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Simulated frame rate of the headless loop, in Hz.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Length of the run, in seconds of frame time.
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,
    /// RNG seed; random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_gravity_y() -> f32 {
    -9.8
}
fn default_restitution() -> f32 {
    0.6
}
fn default_friction() -> f32 {
    0.3
}
fn default_spawn_height() -> f32 {
    8.0
}
fn default_initial_bodies() -> usize {
    5
}
fn default_time_scale() -> f64 {
    1.0
}
fn default_frame_rate() -> f64 {
    144.0
}
fn default_duration() -> f64 {
    10.0
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            gravity_y: default_gravity_y(),
            restitution: default_restitution(),
            friction: default_friction(),
            spawn_height: default_spawn_height(),
            initial_bodies: default_initial_bodies(),
            time_scale: default_time_scale(),
            frame_rate: default_frame_rate(),
            duration_seconds: default_duration(),
            seed: None,
        }
    }
}

impl InspectorConfig {
    /// Load config from `inspector.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Frame length and frame count for the headless loop. Out-of-range or
    /// non-finite values fall back to the nearest usable setting.
    pub fn loop_frames(&self) -> (Duration, u64) {
        let frame_rate = if self.frame_rate.is_finite() {
            self.frame_rate.clamp(FRAME_RATE_RANGE.0, FRAME_RATE_RANGE.1)
        } else {
            default_frame_rate()
        };
        let duration = if self.duration_seconds.is_finite() {
            self.duration_seconds.clamp(0.0, MAX_DURATION)
        } else {
            default_duration()
        };
        let frames = (duration * frame_rate).ceil() as u64;
        (Duration::from_secs_f64(1.0 / frame_rate), frames)
    }

    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            gravity: Vec3::new(0.0, self.gravity_y, 0.0),
            default_restitution: self.restitution,
            default_friction: self.friction,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("inspector.ron")
}
