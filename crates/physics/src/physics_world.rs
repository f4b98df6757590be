//! Physics world: body storage and the fixed-size simulation step.

use crate::body::{BodyId, BodyOverrides, RigidBody};
use crate::collision;
use crate::contact::Contact;
use crate::error::PhysicsError;
use crate::shape::{Shape, ShapeKind};
use crate::solver;
use crate::visual::VisualStore;
use glam::Vec3;
use hecs::Entity;
use std::collections::HashMap;

pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);
pub const DEFAULT_RESTITUTION: f32 = 0.6;
pub const DEFAULT_FRICTION: f32 = 0.3;

/// Per-step velocity retention for linear motion.
pub const LINEAR_DAMPING: f32 = 0.999;
/// Per-step velocity retention for angular motion.
pub const ANGULAR_DAMPING: f32 = 0.99;

/// Global parameters a world starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    pub gravity: Vec3,
    pub default_restitution: f32,
    pub default_friction: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            default_restitution: DEFAULT_RESTITUTION,
            default_friction: DEFAULT_FRICTION,
        }
    }
}

/// Snapshot of body and contact counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub total_bodies: usize,
    pub dynamic_bodies: usize,
    pub static_bodies: usize,
    pub contacts: usize,
}

/// Owns every rigid body and the contacts of the most recent step.
///
/// Bodies are kept densely in creation order. External code refers to them
/// by [`BodyId`]; removal compacts the storage without invalidating ids.
#[derive(Debug)]
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    index: HashMap<BodyId, usize>,
    gravity: Vec3,
    contacts: Vec<Contact>,
    default_restitution: f32,
    default_friction: f32,
    next_id: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world with default gravity and materials.
    pub fn new() -> Self {
        Self::from_settings(&WorldSettings::default())
    }

    pub fn from_settings(settings: &WorldSettings) -> Self {
        Self {
            bodies: Vec::new(),
            index: HashMap::new(),
            gravity: settings.gravity,
            contacts: Vec::new(),
            default_restitution: settings.default_restitution.clamp(0.0, 1.0),
            default_friction: settings.default_friction.clamp(0.0, 1.0),
            next_id: 0,
        }
    }

    /// Create a body for a visual entity.
    ///
    /// The entity's transform and geometry are read once here: position and
    /// rotation seed the body, geometry fixes the collider dimensions for
    /// the body's whole lifetime.
    pub fn create_body(
        &mut self,
        visuals: &impl VisualStore,
        visual: Entity,
        kind: ShapeKind,
        mass: f32,
        overrides: BodyOverrides,
    ) -> Result<BodyId, PhysicsError> {
        let (transform, geometry) = visuals
            .transform(visual)
            .zip(visuals.geometry(visual))
            .ok_or(PhysicsError::MissingVisual(visual))?;
        let shape = Shape::from_geometry(kind, &geometry, &transform)?;

        let id = self.spawn(shape, transform.position, mass, overrides, Some(visual))?;
        if let Some(body) = self.body_mut(id) {
            body.rotation = transform.euler();
        }
        Ok(id)
    }

    /// Create a body with an explicit shape and position and no visual.
    pub fn insert_body(
        &mut self,
        shape: Shape,
        position: Vec3,
        mass: f32,
        overrides: BodyOverrides,
    ) -> Result<BodyId, PhysicsError> {
        shape.validate()?;
        self.spawn(shape, position, mass, overrides, None)
    }

    fn spawn(
        &mut self,
        shape: Shape,
        position: Vec3,
        mass: f32,
        overrides: BodyOverrides,
        visual: Option<Entity>,
    ) -> Result<BodyId, PhysicsError> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(PhysicsError::InvalidMass(mass));
        }
        let restitution = material(
            "restitution",
            overrides.restitution.unwrap_or(self.default_restitution),
        )?;
        let friction = material("friction", overrides.friction.unwrap_or(self.default_friction))?;

        let id = BodyId(self.next_id);
        self.next_id += 1;

        let mut body = RigidBody::new(id, shape, position, mass, restitution, friction, visual);
        if !body.is_static() {
            body.velocity = overrides.velocity.unwrap_or(Vec3::ZERO);
            body.angular_velocity = overrides.angular_velocity.unwrap_or(Vec3::ZERO);
        }

        log::debug!(
            "Created {} ({:?}, mass {}) at {:?}",
            id,
            shape.kind(),
            mass,
            position
        );
        self.index.insert(id, self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Remove a body from the simulation. The visual entity is left alone;
    /// the returned body carries its handle so the caller can dispose of it.
    pub fn remove_body(&mut self, id: BodyId) -> Option<RigidBody> {
        let idx = self.index.remove(&id)?;
        let body = self.bodies.remove(idx);
        for (i, b) in self.bodies.iter().enumerate().skip(idx) {
            self.index.insert(b.id(), i);
        }
        log::debug!("Removed {}", id);
        Some(body)
    }

    /// Remove every dynamic body, keeping static scenery.
    pub fn clear_dynamic_bodies(&mut self) -> Vec<RigidBody> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.bodies.drain(..).partition(|b| !b.is_static());
        self.bodies = kept;
        self.rebuild_index();
        log::debug!("Cleared {} dynamic bodies", removed.len());
        removed
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id(), i))
            .collect();
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.index.get(&id).map(|&i| &mut self.bodies[i])
    }

    /// All bodies in creation order.
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Contacts found by the most recent step.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn default_restitution(&self) -> f32 {
        self.default_restitution
    }

    pub fn default_friction(&self) -> f32 {
        self.default_friction
    }

    /// Change the restitution given to new bodies, clamped to [0, 1].
    /// With `cascade` every existing body is updated as well.
    pub fn set_default_restitution(&mut self, restitution: f32, cascade: bool) {
        if restitution.is_nan() {
            log::warn!("Ignoring NaN default restitution");
            return;
        }
        self.default_restitution = restitution.clamp(0.0, 1.0);
        if cascade {
            for body in &mut self.bodies {
                body.restitution = self.default_restitution;
            }
        }
    }

    /// Change the friction given to new bodies, clamped to [0, 1].
    /// With `cascade` every existing body is updated as well.
    pub fn set_default_friction(&mut self, friction: f32, cascade: bool) {
        if friction.is_nan() {
            log::warn!("Ignoring NaN default friction");
            return;
        }
        self.default_friction = friction.clamp(0.0, 1.0);
        if cascade {
            for body in &mut self.bodies {
                body.friction = self.default_friction;
            }
        }
    }

    pub fn stats(&self) -> WorldStats {
        let static_bodies = self.bodies.iter().filter(|b| b.is_static()).count();
        WorldStats {
            total_bodies: self.bodies.len(),
            dynamic_bodies: self.bodies.len() - static_bodies,
            static_bodies,
            contacts: self.contacts.len(),
        }
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Integrates every dynamic body, tests every pair of bodies that are not
    /// both static, and resolves contacts as they are found. Visuals are not
    /// touched; call [`PhysicsWorld::sync_to_visuals`] afterwards.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            log::warn!("Ignoring physics step with dt = {}", dt);
            return;
        }

        self.contacts.clear();

        for body in &mut self.bodies {
            integrate(body, self.gravity, dt);
        }

        // Exhaustive O(n^2) pairing; no spatial acceleration.
        let n = self.bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if a.is_static() && b.is_static() {
                    continue;
                }
                if let Some(contact) = collision::dispatch(a, b) {
                    self.contacts.push(contact);
                    solver::resolve_contact(a, b, &contact);
                }
            }
        }

        log::trace!("Physics step: {} contacts", self.contacts.len());
    }

    /// Resolve a single contact by body id. Unknown ids are ignored.
    pub fn resolve(&mut self, contact: &Contact) {
        let (Some(&ia), Some(&ib)) = (
            self.index.get(&contact.body_a),
            self.index.get(&contact.body_b),
        ) else {
            return;
        };
        if ia == ib {
            return;
        }
        let (a, b) = if ia < ib {
            pair_mut(&mut self.bodies, ia, ib)
        } else {
            let (b, a) = pair_mut(&mut self.bodies, ib, ia);
            (a, b)
        };
        solver::resolve_contact(a, b, contact);
    }

    /// Copy every body's position and presentation rotation into its visual.
    pub fn sync_to_visuals(&self, visuals: &mut impl VisualStore) {
        for body in &self.bodies {
            if let Some(visual) = body.visual() {
                let rotation = engine_core::quat_from_euler(body.rotation);
                visuals.write_transform(visual, body.position, rotation);
            }
        }
    }

    /// [`PhysicsWorld::step`] followed by [`PhysicsWorld::sync_to_visuals`].
    pub fn step_and_sync(&mut self, dt: f32, visuals: &mut impl VisualStore) {
        self.step(dt);
        self.sync_to_visuals(visuals);
    }
}

/// Semi-implicit Euler for one dynamic body; static bodies are left alone.
fn integrate(body: &mut RigidBody, gravity: Vec3, dt: f32) {
    if body.is_static() {
        return;
    }

    body.force += gravity * body.mass();
    body.velocity += body.force / body.mass() * dt;
    body.position += body.velocity * dt;

    // Orientation is presentation-only; colliders stay axis aligned.
    body.rotation += body.angular_velocity * dt;

    body.velocity *= LINEAR_DAMPING;
    body.angular_velocity *= ANGULAR_DAMPING;

    body.force = Vec3::ZERO;
    body.torque = Vec3::ZERO;
}

fn pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

fn material(property: &'static str, value: f32) -> Result<f32, PhysicsError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidMaterial { property, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Geometry, Transform};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const DT: f32 = 1.0 / 60.0;

    fn sphere(world: &mut PhysicsWorld, radius: f32, position: Vec3, mass: f32) -> BodyId {
        world
            .insert_body(Shape::Sphere { radius }, position, mass, BodyOverrides::default())
            .unwrap()
    }

    fn ground(world: &mut PhysicsWorld, height_y: f32) -> BodyId {
        world
            .insert_body(
                Shape::Plane { height_y },
                Vec3::new(0.0, height_y, 0.0),
                0.0,
                BodyOverrides::default(),
            )
            .unwrap()
    }

    #[test]
    fn world_free_body_extrapolates_linearly() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let v0 = Vec3::new(1.0, 2.0, -3.0);
        let p0 = Vec3::new(0.5, 10.0, 0.0);
        let id = world
            .insert_body(
                Shape::Sphere { radius: 0.5 },
                p0,
                2.0,
                BodyOverrides::default().with_velocity(v0),
            )
            .unwrap();

        let steps = 120;
        let mut expected_pos = p0;
        let mut expected_vel = v0;
        for _ in 0..steps {
            world.step(DT);
            expected_pos += expected_vel * DT;
            expected_vel *= LINEAR_DAMPING;
        }

        let body = world.body(id).unwrap();
        assert!((body.position - expected_pos).length() < 1e-4);
        assert!((body.velocity - v0 * LINEAR_DAMPING.powi(steps)).length() < 1e-4);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn world_forces_are_cleared_after_step() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let id = sphere(&mut world, 0.5, Vec3::ZERO, 2.0);
        world.body_mut(id).unwrap().apply_force(Vec3::new(4.0, 0.0, 0.0));
        world.body_mut(id).unwrap().apply_torque(Vec3::Y);

        world.step(DT);
        let body = world.body(id).unwrap();
        assert_eq!(body.force, Vec3::ZERO);
        assert_eq!(body.torque, Vec3::ZERO);
        assert!((body.velocity.x - 2.0 * DT * LINEAR_DAMPING).abs() < 1e-6);

        world.step(DT);
        let body = world.body(id).unwrap();
        assert!((body.velocity.x - 2.0 * DT * LINEAR_DAMPING * LINEAR_DAMPING).abs() < 1e-6);
    }

    #[test]
    fn world_angular_velocity_only_rotates_presentation() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let id = world
            .insert_body(
                Shape::Box {
                    half_extents: Vec3::splat(0.5),
                },
                Vec3::ZERO,
                1.0,
                BodyOverrides::default().with_angular_velocity(Vec3::new(0.0, 6.0, 0.0)),
            )
            .unwrap();
        world.step(DT);
        let body = world.body(id).unwrap();
        assert!((body.rotation.y - 0.1).abs() < 1e-6);
        assert!((body.angular_velocity.y - 6.0 * ANGULAR_DAMPING).abs() < 1e-6);
        assert_eq!(
            *body.shape(),
            Shape::Box {
                half_extents: Vec3::splat(0.5)
            }
        );
    }

    #[test]
    fn world_static_bodies_never_move() {
        let mut world = PhysicsWorld::new();
        let floor = ground(&mut world, 0.0);
        let post = sphere(&mut world, 1.0, Vec3::new(0.0, 1.0, 0.0), 0.0);
        for i in 0..6 {
            sphere(
                &mut world,
                0.4,
                Vec3::new(i as f32 * 0.3 - 0.9, 3.0 + i as f32, 0.2),
                1.0 + i as f32,
            );
        }
        let before: Vec<_> = [floor, post]
            .iter()
            .map(|id| {
                let b = world.body(*id).unwrap();
                (b.position, b.velocity, b.angular_velocity)
            })
            .collect();

        for _ in 0..300 {
            world.step(DT);
        }

        for (id, (p, v, w)) in [floor, post].iter().zip(before) {
            let b = world.body(*id).unwrap();
            assert_eq!(b.position.to_array().map(f32::to_bits), p.to_array().map(f32::to_bits));
            assert_eq!(b.velocity.to_array().map(f32::to_bits), v.to_array().map(f32::to_bits));
            assert_eq!(
                b.angular_velocity.to_array().map(f32::to_bits),
                w.to_array().map(f32::to_bits)
            );
        }
    }

    #[test]
    fn world_spheres_pushed_together_settle_at_touching_distance() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        world.set_default_restitution(0.0, false);
        let a = world
            .insert_body(
                Shape::Sphere { radius: 0.5 },
                Vec3::new(-1.0, 0.0, 0.0),
                1.0,
                BodyOverrides::default().with_velocity(Vec3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();
        let b = world
            .insert_body(
                Shape::Sphere { radius: 0.5 },
                Vec3::new(1.0, 0.0, 0.0),
                1.0,
                BodyOverrides::default().with_velocity(Vec3::new(-1.0, 0.0, 0.0)),
            )
            .unwrap();

        let distance = |w: &PhysicsWorld| {
            (w.body(b).unwrap().position - w.body(a).unwrap().position).length()
        };

        for _ in 0..120 {
            world.step(DT);
        }
        for _ in 0..120 {
            world.step(DT);
            assert!(distance(&world) >= 1.0 - 1e-4);
            assert!(distance(&world) <= 1.0 + 1e-4);
        }
    }

    fn drop_sphere_on_ground(plane_first: bool) -> (f32, f32) {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::new(0.0, -9.8, 0.0));
        world.set_default_restitution(0.6, false);
        let ball = if plane_first {
            ground(&mut world, 0.0);
            sphere(&mut world, 0.5, Vec3::new(0.0, 5.0, 0.0), 1.0)
        } else {
            let ball = sphere(&mut world, 0.5, Vec3::new(0.0, 5.0, 0.0), 1.0);
            ground(&mut world, 0.0);
            ball
        };

        let mut first_contact = None;
        for step in 0..300 {
            world.step(DT);
            if !world.contacts().is_empty() {
                first_contact = Some(step);
                break;
            }
        }
        assert!(first_contact.is_some(), "sphere never reached the ground");

        let mut min_y = f32::MAX;
        let mut peak_y = f32::MIN;
        let mut rising = false;
        for _ in 0..120 {
            world.step(DT);
            let body = world.body(ball).unwrap();
            min_y = min_y.min(body.position.y);
            if body.velocity.y > 0.0 {
                rising = true;
                peak_y = peak_y.max(body.position.y);
            } else if rising {
                break;
            }
        }
        assert!(rising, "sphere never rebounded");
        (min_y, peak_y)
    }

    #[test]
    fn world_dropped_sphere_bounces_lower_without_tunneling() {
        for plane_first in [false, true] {
            let (min_y, peak_y) = drop_sphere_on_ground(plane_first);
            assert!(min_y > -1e-3, "tunneled: min y {min_y}");
            assert!(peak_y < 5.0, "rebound {peak_y} not below drop height");
            assert!(peak_y > 0.5);
        }
    }

    #[test]
    fn world_static_planes_never_collide() {
        let mut world = PhysicsWorld::new();
        ground(&mut world, 0.0);
        ground(&mut world, 0.0);
        ground(&mut world, 0.5);
        world.step(DT);
        assert!(world.contacts().is_empty());
        assert_eq!(world.stats().static_bodies, 3);
    }

    #[test]
    fn world_sphere_box_contact_uses_inscribed_radius() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let s = sphere(&mut world, 0.5, Vec3::ZERO, 1.0);
        let b = world
            .insert_body(
                Shape::Box {
                    half_extents: Vec3::new(2.0, 2.0, 2.0),
                },
                Vec3::new(0.0, 0.0, 2.3),
                1.0,
                BodyOverrides::default(),
            )
            .unwrap();

        world.step(DT);
        let contacts = world.contacts();
        assert_eq!(contacts.len(), 1);
        let c = contacts[0];
        assert_eq!(c.body_a, s);
        assert_eq!(c.body_b, b);
        assert!((c.normal - Vec3::Z).length() < 1e-6);
        assert!((c.depth - (0.5 + 2.0 - 2.3)).abs() < 1e-5);
        assert!((c.point - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn world_unsupported_pair_is_left_overlapping() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let half_extents = Vec3::ONE;
        world
            .insert_body(Shape::Box { half_extents }, Vec3::ZERO, 1.0, BodyOverrides::default())
            .unwrap();
        world
            .insert_body(
                Shape::Cylinder {
                    radius: 1.0,
                    height: 2.0,
                },
                Vec3::new(0.5, 0.0, 0.0),
                1.0,
                BodyOverrides::default(),
            )
            .unwrap();
        world.step(DT);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn world_ids_survive_removal() {
        let mut world = PhysicsWorld::new();
        let a = sphere(&mut world, 0.5, Vec3::ZERO, 1.0);
        let b = sphere(&mut world, 0.5, Vec3::new(5.0, 0.0, 0.0), 1.0);
        let c = sphere(&mut world, 0.5, Vec3::new(10.0, 0.0, 0.0), 1.0);

        let removed = world.remove_body(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(world.remove_body(a).is_none());
        assert!(world.body(a).is_none());
        assert_eq!(world.len(), 2);
        assert_eq!(world.body(b).unwrap().position.x, 5.0);
        assert_eq!(world.body(c).unwrap().position.x, 10.0);

        let d = sphere(&mut world, 0.5, Vec3::ZERO, 1.0);
        assert!(d > c);
        assert_eq!(world.bodies().last().unwrap().id(), d);
    }

    #[test]
    fn world_clear_dynamic_keeps_scenery() {
        let mut world = PhysicsWorld::new();
        let floor = ground(&mut world, 0.0);
        let a = sphere(&mut world, 0.5, Vec3::Y, 1.0);
        let wall = sphere(&mut world, 1.0, Vec3::X * 4.0, 0.0);
        sphere(&mut world, 0.5, Vec3::Y * 3.0, 1.0);

        let removed = world.clear_dynamic_bodies();
        assert_eq!(removed.len(), 2);
        assert!(world.body(a).is_none());
        assert!(world.body(floor).is_some());
        assert_eq!(world.body(wall).unwrap().position, Vec3::X * 4.0);
        assert_eq!(
            world.stats(),
            WorldStats {
                total_bodies: 2,
                dynamic_bodies: 0,
                static_bodies: 2,
                contacts: 0,
            }
        );
    }

    #[test]
    fn world_rejects_invalid_parameters() {
        let mut world = PhysicsWorld::new();
        let shape = Shape::Sphere { radius: 0.5 };
        assert_eq!(
            world.insert_body(shape, Vec3::ZERO, -1.0, BodyOverrides::default()),
            Err(PhysicsError::InvalidMass(-1.0))
        );
        assert!(matches!(
            world.insert_body(shape, Vec3::ZERO, f32::NAN, BodyOverrides::default()),
            Err(PhysicsError::InvalidMass(_))
        ));
        assert_eq!(
            world.insert_body(
                shape,
                Vec3::ZERO,
                1.0,
                BodyOverrides::default().with_friction(1.5)
            ),
            Err(PhysicsError::InvalidMaterial {
                property: "friction",
                value: 1.5
            })
        );
        assert!(world.is_empty());
    }

    #[test]
    fn world_rejects_non_positive_dt() {
        let mut world = PhysicsWorld::new();
        let id = sphere(&mut world, 0.5, Vec3::Y * 3.0, 1.0);
        world.step(0.0);
        world.step(-DT);
        world.step(f32::NAN);
        assert_eq!(world.body(id).unwrap().position, Vec3::Y * 3.0);
        assert_eq!(world.body(id).unwrap().velocity, Vec3::ZERO);
    }

    #[test]
    fn world_material_defaults_and_cascade() {
        let mut world = PhysicsWorld::new();
        let a = sphere(&mut world, 0.5, Vec3::ZERO, 1.0);
        let b = world
            .insert_body(
                Shape::Sphere { radius: 0.5 },
                Vec3::X * 3.0,
                1.0,
                BodyOverrides::default().with_restitution(0.9),
            )
            .unwrap();
        assert_eq!(world.body(a).unwrap().restitution, DEFAULT_RESTITUTION);
        assert_eq!(world.body(a).unwrap().friction, DEFAULT_FRICTION);
        assert_eq!(world.body(b).unwrap().restitution, 0.9);

        world.set_default_restitution(0.2, false);
        assert_eq!(world.body(b).unwrap().restitution, 0.9);
        let c = sphere(&mut world, 0.5, Vec3::X * 6.0, 1.0);
        assert_eq!(world.body(c).unwrap().restitution, 0.2);

        world.set_default_friction(2.0, true);
        assert_eq!(world.default_friction(), 1.0);
        assert!(world.bodies().iter().all(|body| body.friction == 1.0));

        world.set_default_restitution(0.4, true);
        assert!(world.bodies().iter().all(|body| body.restitution == 0.4));
    }

    #[test]
    fn world_resolve_by_id_skips_separating_contacts() {
        let mut world = PhysicsWorld::new();
        world.set_gravity(Vec3::ZERO);
        let floor = ground(&mut world, 0.0);
        let ball = world
            .insert_body(
                Shape::Sphere { radius: 0.5 },
                Vec3::new(0.0, 0.4, 0.0),
                1.0,
                BodyOverrides::default().with_velocity(Vec3::new(0.0, 1.0, 0.0)),
            )
            .unwrap();
        let contact = collision::dispatch(world.body(floor).unwrap(), world.body(ball).unwrap())
            .unwrap();

        world.resolve(&contact);
        let once = world.body(ball).unwrap().velocity;
        world.resolve(&contact);
        assert_eq!(world.body(ball).unwrap().velocity, once);
        assert_eq!(once, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn world_create_body_reads_visual_once_and_syncs_back() {
        let mut visuals = hecs::World::new();
        let mut transform = Transform::from_position(Vec3::new(1.0, 4.0, -2.0));
        transform.set_euler(Vec3::new(0.0, 0.5, 0.0));
        let mesh = visuals.spawn((transform, Geometry::sphere(0.25)));
        let floor_mesh = visuals.spawn((
            Transform::from_position(Vec3::new(0.0, -1.0, 0.0)),
            Geometry::plane(30.0, 30.0),
        ));

        let mut world = PhysicsWorld::new();
        let floor = world
            .create_body(&visuals, floor_mesh, ShapeKind::Plane, 0.0, BodyOverrides::default())
            .unwrap();
        let ball = world
            .create_body(&visuals, mesh, ShapeKind::Sphere, 1.0, BodyOverrides::default())
            .unwrap();
        assert_eq!(
            *world.body(floor).unwrap().shape(),
            Shape::Plane { height_y: -1.0 }
        );
        assert!((world.body(ball).unwrap().rotation.y - 0.5).abs() < 1e-5);

        // Later geometry edits do not reach the collider.
        *visuals.get::<&mut Geometry>(mesh).unwrap() = Geometry::sphere(3.0);

        world.step_and_sync(DT, &mut visuals);
        let body = world.body(ball).unwrap();
        assert_eq!(*body.shape(), Shape::Sphere { radius: 0.25 });
        let synced = *visuals.get::<&Transform>(mesh).unwrap();
        assert_eq!(synced.position, body.position);
        assert!(synced.position.y < 4.0);
        assert_eq!(synced.scale, Vec3::ONE);
        assert_eq!(synced.rotation, engine_core::quat_from_euler(body.rotation));
        assert!((synced.euler().y - 0.5).abs() < 1e-5);

        let removed = world.remove_body(ball).unwrap();
        assert_eq!(removed.visual(), Some(mesh));
        assert!(visuals.contains(mesh));
    }

    #[test]
    fn world_create_body_errors() {
        let mut visuals = hecs::World::new();
        let bare = visuals.spawn((Transform::default(),));
        let cube = visuals.spawn((Transform::default(), Geometry::cube(1.0)));
        let mut world = PhysicsWorld::new();

        assert_eq!(
            world.create_body(&visuals, bare, ShapeKind::Sphere, 1.0, BodyOverrides::default()),
            Err(PhysicsError::MissingVisual(bare))
        );
        assert_eq!(
            world.create_body(&visuals, cube, ShapeKind::Cylinder, 1.0, BodyOverrides::default()),
            Err(PhysicsError::GeometryMismatch {
                kind: ShapeKind::Cylinder,
                found: "box"
            })
        );
        assert!(world.is_empty());
    }

    #[derive(Clone, Copy)]
    struct BodySeed {
        shape: Shape,
        position: Vec3,
        mass: f32,
        velocity: Vec3,
    }

    fn random_pair(rng: &mut StdRng) -> [BodySeed; 2] {
        let dynamic_shape = |rng: &mut StdRng| match rng.gen_range(0..3) {
            0 => Shape::Sphere {
                radius: rng.gen_range(0.3..0.7),
            },
            1 => Shape::Box {
                half_extents: Vec3::splat(rng.gen_range(0.2..0.4)),
            },
            _ => Shape::Cylinder {
                radius: rng.gen_range(0.2..0.5),
                height: rng.gen_range(0.5..1.0),
            },
        };
        let mut velocity = || {
            Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            )
        };
        let first = BodySeed {
            shape: Shape::Sphere { radius: 0.5 },
            position: Vec3::new(0.0, 1.0, 0.0),
            mass: 1.0,
            velocity: velocity(),
        };
        let v = velocity();
        let second = if rng.gen_bool(0.5) {
            BodySeed {
                shape: Shape::Plane { height_y: 0.0 },
                position: Vec3::ZERO,
                mass: 0.0,
                velocity: Vec3::ZERO,
            }
        } else {
            BodySeed {
                shape: Shape::Sphere {
                    radius: rng.gen_range(0.3..0.7),
                },
                position: Vec3::new(
                    rng.gen_range(-0.6..0.6),
                    rng.gen_range(0.5..1.5),
                    rng.gen_range(-0.6..0.6),
                ),
                mass: rng.gen_range(0.5..3.0),
                velocity: v,
            }
        };
        let first = if rng.gen_bool(0.5) {
            BodySeed {
                shape: dynamic_shape(rng),
                ..first
            }
        } else {
            first
        };
        [first, second]
    }

    fn simulate(seeds: &[BodySeed], order: &[usize]) -> Vec<(Vec3, Vec3)> {
        let mut world = PhysicsWorld::new();
        let mut ids = vec![BodyId(0); seeds.len()];
        for &k in order {
            let s = seeds[k];
            ids[k] = world
                .insert_body(
                    s.shape,
                    s.position,
                    s.mass,
                    BodyOverrides::default().with_velocity(s.velocity),
                )
                .unwrap();
        }
        for _ in 0..90 {
            world.step(DT);
            for c in world.contacts() {
                let a = world.body(c.body_a).unwrap();
                let b = world.body(c.body_b).unwrap();
                if matches!(a.shape(), Shape::Plane { .. }) {
                    assert!(c.normal.y < 0.0);
                } else if matches!(b.shape(), Shape::Plane { .. }) {
                    assert!(c.normal.y > 0.0);
                }
            }
        }
        ids.iter()
            .map(|id| {
                let b = world.body(*id).unwrap();
                (b.position, b.velocity)
            })
            .collect()
    }

    #[test]
    fn world_outcome_independent_of_insertion_order() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..64 {
            let seeds = random_pair(&mut rng);
            let forward = simulate(&seeds, &[0, 1]);
            let reverse = simulate(&seeds, &[1, 0]);
            for ((pf, vf), (pr, vr)) in forward.iter().zip(&reverse) {
                assert!((*pf - *pr).length() < 1e-3, "{pf:?} vs {pr:?}");
                assert!((*vf - *vr).length() < 1e-3, "{vf:?} vs {vr:?}");
            }
        }
    }
}
