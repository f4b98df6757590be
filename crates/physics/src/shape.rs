//! Collider shapes.

use crate::error::PhysicsError;
use engine_core::{Geometry, Transform};
use glam::Vec3;

/// Collider type tag, chosen by the caller when a body is created.
///
/// Dimensions are resolved from the visual body's geometry at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Box,
    Cylinder,
    Plane,
}

/// Collider shape with its dimensions. Fixed for the lifetime of a body.
///
/// Boxes and cylinders are treated as axis aligned for contact purposes no
/// matter how the visual body is rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Cylinder { radius: f32, height: f32 },
    /// Infinite horizontal surface at `height_y`.
    Plane { height_y: f32 },
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Shape {
    /// Resolve a shape from visual geometry. Planes take their height from the
    /// visual transform since plane geometry carries no vertical information.
    pub fn from_geometry(
        kind: ShapeKind,
        geometry: &Geometry,
        transform: &Transform,
    ) -> Result<Self, PhysicsError> {
        let shape = match (kind, *geometry) {
            (ShapeKind::Sphere, Geometry::Sphere { radius }) => Shape::Sphere { radius },
            (ShapeKind::Box, Geometry::Box { width, height, depth }) => Shape::Box {
                half_extents: Vec3::new(width, height, depth) * 0.5,
            },
            // Colliders are straight; the top radius wins for tapered meshes.
            (ShapeKind::Cylinder, Geometry::Cylinder { radius_top, height, .. }) => {
                Shape::Cylinder {
                    radius: radius_top,
                    height,
                }
            }
            (ShapeKind::Plane, Geometry::Plane { .. }) => Shape::Plane {
                height_y: transform.position.y,
            },
            (kind, other) => {
                return Err(PhysicsError::GeometryMismatch {
                    kind,
                    found: other.label(),
                })
            }
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Reject NaN, infinite or negative dimensions.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let check = |name: &'static str, value: f32| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(PhysicsError::InvalidDimension { name, value })
            }
        };
        match *self {
            Shape::Sphere { radius } => check("radius", radius),
            Shape::Box { half_extents } => {
                check("half_extents.x", half_extents.x)?;
                check("half_extents.y", half_extents.y)?;
                check("half_extents.z", half_extents.z)
            }
            Shape::Cylinder { radius, height } => {
                check("radius", radius)?;
                check("height", height)
            }
            Shape::Plane { height_y } if height_y.is_finite() => Ok(()),
            Shape::Plane { height_y } => Err(PhysicsError::InvalidDimension {
                name: "height_y",
                value: height_y,
            }),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
            Shape::Plane { .. } => ShapeKind::Plane,
        }
    }

    /// Distance from the body centre down to its lowest point, as used by the
    /// plane tests. `None` for planes.
    pub fn half_height(&self) -> Option<f32> {
        match *self {
            Shape::Sphere { radius } => Some(radius),
            Shape::Box { half_extents } => Some(half_extents.y),
            Shape::Cylinder { height, .. } => Some(height * 0.5),
            Shape::Plane { .. } => None,
        }
    }

    /// World-space bounds at `position`. Planes are unbounded and return `None`.
    pub fn aabb(&self, position: Vec3) -> Option<Aabb> {
        let half = match *self {
            Shape::Sphere { radius } => Vec3::splat(radius),
            Shape::Box { half_extents } => half_extents,
            Shape::Cylinder { radius, height } => Vec3::new(radius, height * 0.5, radius),
            Shape::Plane { .. } => return None,
        };
        Some(Aabb::from_center_half_extents(position, half))
    }
}
