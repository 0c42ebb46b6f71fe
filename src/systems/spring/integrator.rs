use serde::{Deserialize, Serialize};

use crate::core::error::ConfigurationError;

use super::config::{SpringConfig, SpringConfigPatch, DEFAULT_TIMESTEP};

/// Position, velocity and rest flag of one spring
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
    pub at_rest: bool,
}

/// Optional reseed values for [`Spring::set_target`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringTarget {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub velocity: Option<f64>,
}

impl SpringTarget {
    pub fn starting_from(position: f64) -> Self {
        Self { from: Some(position), velocity: None }
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

/// Single-axis damped harmonic oscillator
///
/// Advanced by semi-implicit Euler at a fixed timestep: the new velocity is
/// computed first and then used to move the position. Once at rest, further
/// updates are no-ops until the target changes or the spring is reset.
///
/// The damping term only decays while `friction * dt / mass < 2`; heavier
/// damping at 60 Hz flips the velocity sign every step and never settles.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    state: SpringState,
    target: f64,
    dt: f64,
}

impl Spring {
    /// Spring resting at 0 with target 0
    pub fn new(config: SpringConfig) -> Result<Self, ConfigurationError> {
        Self::starting_at(0.0, config)
    }

    /// Spring at `position` with the target on top of it.
    ///
    /// `config.initial_velocity` is applied here and nowhere else; a
    /// non-zero value leaves the spring moving.
    pub fn starting_at(position: f64, config: SpringConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let velocity = config.initial_velocity;
        Ok(Self {
            config,
            state: SpringState {
                position,
                velocity,
                at_rest: velocity.abs() < config.rest_threshold,
            },
            target: position,
            dt: DEFAULT_TIMESTEP,
        })
    }

    /// Builder form of [`Spring::set_timestep`]
    pub fn with_timestep(mut self, dt: f64) -> Self {
        self.set_timestep(dt);
        self
    }

    /// Replace the fixed step used by [`Spring::update`]; non-positive values are ignored
    pub fn set_timestep(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.dt = dt;
        } else {
            debug_warn!("ignoring spring timestep {}", dt);
        }
    }

    /// Aim at a new target, optionally reseeding position/velocity
    pub fn set_target(&mut self, to: f64, options: SpringTarget) {
        self.target = to;
        if let Some(from) = options.from {
            self.state.position = from;
        }
        if let Some(velocity) = options.velocity {
            self.state.velocity = velocity;
        }
        self.state.at_rest = false;
    }

    /// Advance one fixed step
    pub fn update(&mut self) -> SpringState {
        self.step(self.dt)
    }

    /// Advance by an explicit `dt`; not capped
    pub fn step(&mut self, dt: f64) -> SpringState {
        if self.state.at_rest {
            return self.state;
        }
        self.state = integrate(&self.config, self.state, self.target, dt);
        self.state
    }

    /// Teleport to `position` and treat it as the new target
    pub fn reset(&mut self, position: f64, velocity: f64) {
        self.target = position;
        self.state = SpringState {
            position,
            velocity,
            at_rest: velocity.abs() < self.config.rest_threshold,
        };
    }

    /// Merge a partial config; the spring is untouched if the result is invalid
    pub fn update_config(&mut self, patch: &SpringConfigPatch) -> Result<(), ConfigurationError> {
        self.config = self.config.merged(patch)?;
        Ok(())
    }

    /// Install an already-validated config
    pub(crate) fn replace_config(&mut self, config: SpringConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    pub fn state(&self) -> SpringState {
        self.state
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn position(&self) -> f64 {
        self.state.position
    }

    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        self.state.at_rest
    }

    pub fn timestep(&self) -> f64 {
        self.dt
    }
}

/// One semi-implicit Euler step toward `target`
pub fn integrate(config: &SpringConfig, state: SpringState, target: f64, dt: f64) -> SpringState {
    let displacement = state.position - target;
    let spring_force = -config.tension * displacement;
    let damping_force = -config.friction * state.velocity;
    let acceleration = (spring_force + damping_force) / config.mass;

    let velocity = state.velocity + acceleration * dt;
    let mut position = state.position + velocity * dt;

    if config.clamp {
        // Range is anchored at 0, not at the start position
        position = position.max(target.min(0.0)).min(target.max(0.0));
    }

    let at_rest = velocity.abs() < config.rest_threshold && (position - target).abs() < config.rest_threshold;

    SpringState { position, velocity, at_rest }
}
