//! Narrow-phase shape-pair tests.
//!
//! Supported pairs:
//!
//! | a \ b    | Sphere | Box | Cylinder | Plane |
//! |----------|--------|-----|----------|-------|
//! | Sphere   | yes    | yes | -        | yes   |
//! | Box      | yes    | -   | -        | yes   |
//! | Cylinder | -      | -   | -        | yes   |
//! | Plane    | yes    | yes | yes      | -     |
//!
//! Every other combination yields no contact. Boxes are approximated by their
//! inscribed sphere when tested against spheres.

use crate::body::RigidBody;
use crate::contact::Contact;
use crate::shape::Shape;
use glam::Vec3;

/// Test an ordered pair of bodies. The returned contact always names `a` as
/// `body_a`, with the normal oriented for that order.
pub fn dispatch(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    match (a.shape(), b.shape()) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            sphere_sphere(a, *ra, b, *rb)
        }

        (Shape::Sphere { radius }, Shape::Plane { height_y }) => {
            resting_on_plane(a, *radius, b, *height_y)
        }
        (Shape::Box { half_extents }, Shape::Plane { height_y }) => {
            resting_on_plane(a, half_extents.y, b, *height_y)
        }
        (Shape::Cylinder { height, .. }, Shape::Plane { height_y }) => {
            resting_on_plane(a, height * 0.5, b, *height_y)
        }
        (Shape::Plane { .. }, Shape::Sphere { .. } | Shape::Box { .. } | Shape::Cylinder { .. }) => {
            dispatch(b, a).map(Contact::flipped)
        }

        (Shape::Sphere { radius }, Shape::Box { half_extents }) => {
            sphere_box(a, *radius, b, *half_extents)
        }
        (Shape::Box { .. }, Shape::Sphere { .. }) => dispatch(b, a).map(Contact::flipped),

        (Shape::Plane { .. }, Shape::Plane { .. })
        | (Shape::Box { .. }, Shape::Box { .. } | Shape::Cylinder { .. })
        | (Shape::Cylinder { .. }, Shape::Sphere { .. } | Shape::Box { .. } | Shape::Cylinder { .. })
        | (Shape::Sphere { .. }, Shape::Cylinder { .. }) => None,
    }
}

/// Overlap of two spheres centred on the bodies' positions.
pub fn sphere_sphere(a: &RigidBody, ra: f32, b: &RigidBody, rb: f32) -> Option<Contact> {
    let diff = b.position - a.position;
    let dist = diff.length();
    let min_dist = ra + rb;
    if dist >= min_dist {
        return None;
    }

    // Coincident centres give a zero normal; the resolver then applies no
    // normal impulse.
    let normal = diff.normalize_or_zero();
    Some(Contact {
        body_a: a.id(),
        body_b: b.id(),
        point: a.position + normal * ra,
        normal,
        depth: min_dist - dist,
    })
}

/// Sphere against a box treated as its inscribed sphere.
pub fn sphere_box(
    sphere: &RigidBody,
    radius: f32,
    boxed: &RigidBody,
    half_extents: Vec3,
) -> Option<Contact> {
    let box_radius = half_extents.min_element();
    sphere_sphere(sphere, radius, boxed, box_radius)
}

/// Shared plane test: the body's lowest point sits `half_height` below its
/// centre. Works for spheres (radius), boxes (half y extent) and cylinders
/// (half height).
pub fn resting_on_plane(
    body: &RigidBody,
    half_height: f32,
    plane: &RigidBody,
    plane_y: f32,
) -> Option<Contact> {
    let bottom = body.position.y - half_height;
    if bottom >= plane_y {
        return None;
    }

    Some(Contact {
        body_a: body.id(),
        body_b: plane.id(),
        point: Vec3::new(body.position.x, plane_y, body.position.z),
        normal: Vec3::Y,
        depth: plane_y - bottom,
    })
}
