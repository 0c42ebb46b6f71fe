//! Closed-form solution of the spring oscillator
//!
//! The integrator approximates
//! ```text
//! m x'' + c x' + k x = 0        (x = position - target)
//! ```
//! which, with ω₀ = √(k/m) and ζ = c / (2√(km)), has an exact solution for
//! each damping regime. Useful for previewing a config and for checking the
//! integrator against.

use super::config::SpringConfig;

/// ζ this close to 1 is treated as critically damped
pub const CRITICAL_DAMPING_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DampingRegime {
    /// ζ < 1, oscillates around the target
    Underdamped,
    /// ζ = 1, fastest approach without overshoot
    Critical,
    /// ζ > 1, creeps in without overshoot
    Overdamped,
}

/// ω₀ in rad/s
#[inline]
pub fn natural_frequency(config: &SpringConfig) -> f64 {
    (config.tension / config.mass).sqrt()
}

/// ζ, dimensionless
#[inline]
pub fn damping_ratio(config: &SpringConfig) -> f64 {
    config.friction / (2.0 * (config.tension * config.mass).sqrt())
}

pub fn regime(config: &SpringConfig) -> DampingRegime {
    let zeta = damping_ratio(config);
    if (zeta - 1.0).abs() < CRITICAL_DAMPING_TOLERANCE {
        DampingRegime::Critical
    } else if zeta < 1.0 {
        DampingRegime::Underdamped
    } else {
        DampingRegime::Overdamped
    }
}

/// Displacement from the target `t` seconds after starting at `x0` with velocity `v0`
pub fn displacement_at(config: &SpringConfig, x0: f64, v0: f64, t: f64) -> f64 {
    let omega = natural_frequency(config);
    let zeta = damping_ratio(config);

    match regime(config) {
        DampingRegime::Underdamped => {
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let decay = (-zeta * omega * t).exp();
            let b = (v0 + zeta * omega * x0) / omega_d;
            decay * (x0 * (omega_d * t).cos() + b * (omega_d * t).sin())
        }
        DampingRegime::Critical => {
            let decay = (-omega * t).exp();
            decay * (x0 + (v0 + omega * x0) * t)
        }
        DampingRegime::Overdamped => {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c1 = (v0 - r2 * x0) / (r1 - r2);
            let c2 = x0 - c1;
            c1 * (r1 * t).exp() + c2 * (r2 * t).exp()
        }
    }
}

/// Absolute position at `t` for a spring released at `from` toward `to`
pub fn position_at(config: &SpringConfig, from: f64, to: f64, velocity: f64, t: f64) -> f64 {
    to + displacement_at(config, from - to, velocity, t)
}

/// Seconds until the decay envelope of a `distance` offset drops under
/// `config.rest_threshold`.
///
/// Uses the slowest decay rate of the regime, so it is an estimate rather
/// than a bound. Undamped springs never settle and give `f64::INFINITY`.
pub fn estimate_settle_time(config: &SpringConfig, distance: f64) -> f64 {
    let distance = distance.abs();
    if distance <= config.rest_threshold {
        return 0.0;
    }

    let omega = natural_frequency(config);
    let zeta = damping_ratio(config);
    let decay_rate = match regime(config) {
        DampingRegime::Underdamped => zeta * omega,
        DampingRegime::Critical => omega,
        DampingRegime::Overdamped => omega * (zeta - (zeta * zeta - 1.0).sqrt()),
    };
    if decay_rate <= 0.0 {
        return f64::INFINITY;
    }

    (distance / config.rest_threshold).ln() / decay_rate
}
