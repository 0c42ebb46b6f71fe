//! Rigid Body - bodies the collision world moves as single units
//!
//! A body stores one shape positioned by its centre, plus velocity, mass
//! and an optional material.

mod vec2;
mod body;
mod material;
mod shape;

pub use vec2::Vector2;
pub use body::{boundary_walls, BodyId, BodyPatch, CollisionBody, DEFAULT_MASS};
pub use material::{material_or_default, Material, DEFAULT_FRICTION, DEFAULT_RESTITUTION};
pub use shape::{Shape, ShapeKind, DEFAULT_POINT_TOLERANCE};
