//! Spring - damped harmonic oscillators for UI motion
//!
//! - config:     validated parameters and partial updates
//! - integrator: single-axis spring stepped at a fixed timestep
//! - multi_axis: one integrator per named axis, shared config
//! - analytic:   closed-form solution of the same oscillator

mod config;
mod integrator;
mod multi_axis;
pub mod analytic;

pub use config::{SpringConfig, SpringConfigPatch, DEFAULT_REST_THRESHOLD, DEFAULT_TIMESTEP};
pub use integrator::{integrate, Spring, SpringState, SpringTarget};
pub use multi_axis::{AxisValues, MultiAxisSpring, MultiTarget};
