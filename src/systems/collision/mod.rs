//! Collision - narrow phase, impulse response and the body registry
//!
//! - detection:  shape-pair tests producing a [`Contact`]
//! - resolution: restitution, friction and positional correction
//! - world:      owns bodies, derives active pairs, runs both each tick

mod detection;
mod resolution;
mod stats;
mod world;

pub use detection::{detect, CollisionResult, Contact};
pub use resolution::{resolve_collision, POSITION_CORRECTION_FACTOR};
pub use stats::TickStats;
pub use world::CollisionWorld;
