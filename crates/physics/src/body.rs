//! Rigid body state.

use crate::shape::{Aabb, Shape};
use glam::Vec3;
use hecs::Entity;
use std::fmt;

/// Stable body identifier, assigned monotonically by the world.
///
/// Ids are never reused and stay valid while other bodies are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Per-body values used instead of the world defaults at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyOverrides {
    pub restitution: Option<f32>,
    pub friction: Option<f32>,
    pub velocity: Option<Vec3>,
    pub angular_velocity: Option<Vec3>,
}

impl BodyOverrides {
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = Some(angular_velocity);
        self
    }
}

/// A simulated body.
///
/// A body with zero mass is static: it is never moved by integration or
/// contact resolution and its inverse mass is 0.
#[derive(Debug, Clone)]
pub struct RigidBody {
    id: BodyId,
    shape: Shape,
    mass: f32,
    is_static: bool,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub force: Vec3,
    pub torque: Vec3,
    pub restitution: f32,
    pub friction: f32,
    /// Presentation-only orientation (XYZ Euler, radians). Never used for
    /// collision; written to the visual on sync.
    pub rotation: Vec3,
    visual: Option<Entity>,
}

impl RigidBody {
    pub(crate) fn new(
        id: BodyId,
        shape: Shape,
        position: Vec3,
        mass: f32,
        restitution: f32,
        friction: f32,
        visual: Option<Entity>,
    ) -> Self {
        Self {
            id,
            shape,
            mass,
            is_static: mass == 0.0,
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            restitution,
            friction,
            rotation: Vec3::ZERO,
            visual,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Mass counted in positional correction; 0 for static bodies.
    pub fn effective_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            self.mass
        }
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Handle of the presentation entity this body publishes to, if any.
    pub fn visual(&self) -> Option<Entity> {
        self.visual
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn aabb(&self) -> Option<Aabb> {
        self.shape.aabb(self.position)
    }

    /// Accumulate a force for the next integration pass. Ignored on static bodies.
    pub fn apply_force(&mut self, force: Vec3) {
        if !self.is_static {
            self.force += force;
        }
    }

    /// Accumulate a torque for the next integration pass. Ignored on static bodies.
    pub fn apply_torque(&mut self, torque: Vec3) {
        if !self.is_static {
            self.torque += torque;
        }
    }

    /// Change velocity immediately by `impulse / mass`. Ignored on static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if !self.is_static {
            self.velocity += impulse / self.mass;
        }
    }
}
