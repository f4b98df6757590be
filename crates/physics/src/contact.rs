//! Per-step contact records.

use crate::body::BodyId;
use glam::Vec3;

/// A single contact between two bodies found during the current step.
///
/// `normal` points from `body_a` towards `body_b`'s side of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub body_a: BodyId,
    pub body_b: BodyId,
    /// Approximate world-space contact location.
    pub point: Vec3,
    pub normal: Vec3,
    /// Penetration along `normal`, never negative.
    pub depth: f32,
}

impl Contact {
    /// Swap the two bodies and flip the normal so it still points from the
    /// new `body_a` towards the new `body_b`.
    pub fn flipped(self) -> Self {
        Self {
            body_a: self.body_b,
            body_b: self.body_a,
            normal: -self.normal,
            ..self
        }
    }
}
