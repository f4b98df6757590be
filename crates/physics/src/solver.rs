//! Impulse-based contact resolution.

use crate::body::RigidBody;
use crate::contact::Contact;

/// Scale applied to `r x impulse` when kicking angular velocity. Not derived
/// from an inertia tensor.
pub const ANGULAR_IMPULSE_SCALE: f32 = 0.1;
/// Fraction of the tangential relative velocity removed by friction.
pub const FRICTION_SCALE: f32 = 0.5;
/// Tangents shorter than this are treated as no sliding.
pub const MIN_TANGENT_LENGTH: f32 = 0.001;

/// Resolve one contact between `a` (the contact's `body_a`) and `b`.
///
/// Positions are corrected first, then the normal impulse, angular kick and
/// friction impulse are applied. Separating pairs only get the positional
/// correction. Static bodies are never modified.
pub fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    debug_assert_eq!(a.id(), contact.body_a);
    debug_assert_eq!(b.id(), contact.body_b);

    let normal = contact.normal;

    let total_mass = a.effective_mass() + b.effective_mass();
    if total_mass == 0.0 {
        return;
    }

    // Each body moves by the other body's share of the mass.
    let ratio_a = a.effective_mass() / total_mass;
    let ratio_b = b.effective_mass() / total_mass;
    if !a.is_static() {
        a.position -= normal * contact.depth * (1.0 - ratio_a);
    }
    if !b.is_static() {
        b.position += normal * contact.depth * (1.0 - ratio_b);
    }

    let rel_vel = a.velocity - b.velocity;
    let vel_along_normal = rel_vel.dot(normal);
    if vel_along_normal > 0.0 {
        return;
    }

    let e = a.restitution.min(b.restitution);
    let j = -(1.0 + e) * vel_along_normal / (a.inverse_mass() + b.inverse_mass());
    let impulse = normal * j;

    if !a.is_static() {
        a.velocity += impulse / a.mass();
        let r = contact.point - a.position;
        a.angular_velocity += r.cross(impulse) * ANGULAR_IMPULSE_SCALE;
    }
    if !b.is_static() {
        b.velocity -= impulse / b.mass();
        let r = contact.point - b.position;
        b.angular_velocity -= r.cross(impulse) * ANGULAR_IMPULSE_SCALE;
    }

    let tangent = (rel_vel - normal * vel_along_normal).normalize_or_zero();
    if tangent.length() > MIN_TANGENT_LENGTH {
        let friction = (a.friction * b.friction).sqrt();
        let friction_impulse = tangent * (-rel_vel.dot(tangent) * friction * FRICTION_SCALE);
        if !a.is_static() {
            a.velocity += friction_impulse / a.mass();
        }
        if !b.is_static() {
            b.velocity -= friction_impulse / b.mass();
        }
    }
}
