//! Systems - the physics itself
//!
//! - rigid_body: vector math and the body model
//! - spring:     damped oscillators for animated values
//! - collision:  detection, resolution and the body registry

pub mod rigid_body;
pub mod spring;
pub mod collision;
