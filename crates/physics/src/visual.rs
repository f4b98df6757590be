//! One-way link from simulated bodies to their presentation entities.

use engine_core::{Geometry, Transform};
use glam::{Quat, Vec3};
use hecs::Entity;

/// Presentation side of the physics/visual link.
///
/// The world reads `transform` and `geometry` once when a body is created and
/// afterwards only calls `write_transform`.
pub trait VisualStore {
    fn transform(&self, visual: Entity) -> Option<Transform>;

    fn geometry(&self, visual: Entity) -> Option<Geometry>;

    /// Publish a body's position and presentation rotation. Scale is untouched.
    fn write_transform(&mut self, visual: Entity, position: Vec3, rotation: Quat);
}

impl VisualStore for hecs::World {
    fn transform(&self, visual: Entity) -> Option<Transform> {
        self.get::<&Transform>(visual).ok().map(|t| *t)
    }

    fn geometry(&self, visual: Entity) -> Option<Geometry> {
        self.get::<&Geometry>(visual).ok().map(|g| *g)
    }

    fn write_transform(&mut self, visual: Entity, position: Vec3, rotation: Quat) {
        // Entities despawned by the caller are skipped.
        if let Ok(mut transform) = self.get::<&mut Transform>(visual) {
            transform.position = position;
            transform.rotation = rotation;
        }
    }
}
