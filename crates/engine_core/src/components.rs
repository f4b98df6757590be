//! Presentation components attached to visual bodies.

/// Geometry parameters of a visual body's mesh.
///
/// Mirrors the construction parameters a renderer would use; the physics side
/// reads them exactly once when it creates a collider for the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    /// Flat ground quad; only its transform height matters for collision.
    Plane {
        width: f32,
        depth: f32,
    },
}

impl Geometry {
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    pub fn cube(size: f32) -> Self {
        Self::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    pub fn cylinder(radius: f32, height: f32) -> Self {
        Self::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height,
        }
    }

    pub fn plane(width: f32, depth: f32) -> Self {
        Self::Plane { width, depth }
    }

    /// Short lowercase label, used in logs and stats output.
    pub fn label(&self) -> &'static str {
        match self {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Box { .. } => "box",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Plane { .. } => "plane",
        }
    }
}

/// Display name of a visual body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
