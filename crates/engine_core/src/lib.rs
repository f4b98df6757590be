//! Core engine types and utilities shared by the physics inspector.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Fixed-step time management
//! - Presentation components read by the physics visual sync

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Quat, Vec3};
pub use hecs::{Entity, World};
