//! Inspector scene: ground plus randomly spawned primitives.

use anyhow::{Context, Result};
use engine_core::{Geometry, Name, Transform};
use glam::Vec3;
use hecs::Entity;
use physics::{BodyId, BodyOverrides, PhysicsWorld, ShapeKind, WorldSettings};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Half width of the square area new bodies are dropped over.
const SPAWN_SPREAD: f32 = 3.0;
const GROUND_SIZE: f32 = 30.0;

/// Visual entities and their physics bodies, kept in step with each other.
pub struct Scene {
    pub visuals: hecs::World,
    pub physics: PhysicsWorld,
    pub spawn_height: f32,
    rng: StdRng,
    spawned: u32,
}

impl Scene {
    pub fn new(settings: &WorldSettings, spawn_height: f32, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut scene = Self {
            visuals: hecs::World::new(),
            physics: PhysicsWorld::from_settings(settings),
            spawn_height,
            rng,
            spawned: 0,
        };
        scene.spawn_ground()?;
        Ok(scene)
    }

    fn spawn_ground(&mut self) -> Result<BodyId> {
        let entity = self.visuals.spawn((
            Name::new("Ground"),
            Transform::default(),
            Geometry::plane(GROUND_SIZE, GROUND_SIZE),
        ));
        self.attach(entity, ShapeKind::Plane, 0.0)
    }

    fn drop_point(&mut self) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
            self.spawn_height,
            self.rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
        )
    }

    fn spawn_visual(&mut self, label: &str, geometry: Geometry, position: Vec3) -> Entity {
        let name = Name::new(format!("{}_{}", label, self.spawned));
        self.spawned += 1;
        self.visuals
            .spawn((name, Transform::from_position(position), geometry))
    }

    fn attach(&mut self, entity: Entity, kind: ShapeKind, mass: f32) -> Result<BodyId> {
        self.physics
            .create_body(&self.visuals, entity, kind, mass, BodyOverrides::default())
            .with_context(|| format!("attaching {:?} collider to {:?}", kind, entity))
    }

    pub fn spawn_sphere(&mut self) -> Result<BodyId> {
        let radius = self.rng.gen_range(0.3..0.7);
        let position = self.drop_point();
        let entity = self.spawn_visual("Sphere", Geometry::sphere(radius), position);
        self.attach(entity, ShapeKind::Sphere, 1.0)
    }

    pub fn spawn_box(&mut self) -> Result<BodyId> {
        let size = self.rng.gen_range(0.4..0.8);
        let position = self.drop_point();
        let entity = self.spawn_visual("Box", Geometry::cube(size), position);
        self.attach(entity, ShapeKind::Box, 1.0)
    }

    pub fn spawn_cylinder(&mut self) -> Result<BodyId> {
        let radius = self.rng.gen_range(0.2..0.5);
        let height = self.rng.gen_range(0.5..1.0);
        let position = self.drop_point();
        let entity = self.spawn_visual("Cylinder", Geometry::cylinder(radius, height), position);
        self.attach(entity, ShapeKind::Cylinder, 1.0)
    }

    pub fn spawn_random(&mut self) -> Result<BodyId> {
        match self.rng.gen_range(0..3) {
            0 => self.spawn_sphere(),
            1 => self.spawn_box(),
            _ => self.spawn_cylinder(),
        }
    }

    /// Remove every dynamic body and despawn its visual.
    pub fn clear_dynamic(&mut self) {
        for body in self.physics.clear_dynamic_bodies() {
            if let Some(entity) = body.visual() {
                // Already gone if the caller despawned it first.
                let _ = self.visuals.despawn(entity);
            }
        }
    }

    /// Clear the dynamic bodies and drop `count` new random ones.
    pub fn reset(&mut self, count: usize) -> Result<()> {
        self.clear_dynamic();
        for _ in 0..count {
            self.spawn_random()?;
        }
        Ok(())
    }

    /// Name of the visual a body publishes to.
    pub fn name_of(&self, id: BodyId) -> Option<String> {
        let entity = self.physics.body(id)?.visual()?;
        self.visuals.get::<&Name>(entity).ok().map(|n| n.0.clone())
    }
}
