//! Errors raised when bodies are created with invalid parameters.

use crate::shape::ShapeKind;
use hecs::Entity;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("mass must be finite and non-negative, got {0}")]
    InvalidMass(f32),

    #[error("{property} must be finite and within [0, 1], got {value}")]
    InvalidMaterial { property: &'static str, value: f32 },

    #[error("shape dimension {name} must be finite and non-negative, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("visual entity {0:?} has no transform or geometry")]
    MissingVisual(Entity),

    #[error("{kind:?} collider requested but visual geometry is a {found}")]
    GeometryMismatch {
        kind: ShapeKind,
        found: &'static str,
    },
}
