//! Minimal rigid-body dynamics for the physics inspector.
//!
//! Bodies are integrated with semi-implicit Euler, paired exhaustively, tested
//! against a small fixed set of primitive shape pairs and resolved with
//! impulses. Positions are published to presentation entities through
//! [`VisualStore`] in a separate pass after each step.

pub mod body;
pub mod collision;
pub mod contact;
pub mod error;
pub mod physics_world;
pub mod shape;
pub mod solver;
pub mod visual;

pub use body::*;
pub use contact::*;
pub use error::*;
pub use physics_world::*;
pub use shape::*;
pub use visual::*;
