use serde::{Deserialize, Serialize};

use crate::core::error::{ensure_finite, ConfigurationError};

/// Velocity and displacement below this count as settled
pub const DEFAULT_REST_THRESHOLD: f64 = 0.01;

/// Fixed integration step used by `update()`: one 60 Hz frame
pub const DEFAULT_TIMESTEP: f64 = 1.0 / 60.0;

/// Physical parameters of a damped spring
///
/// Missing JSON fields fall back to the `default` preset (170 / 26 / 1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    /// Stiffness, > 0
    pub tension: f64,
    /// Damping coefficient, >= 0
    pub friction: f64,
    /// > 0
    pub mass: f64,
    pub rest_threshold: f64,
    /// Velocity a freshly built spring starts with
    pub initial_velocity: f64,
    /// Keep position within `[min(0, target), max(0, target)]`
    pub clamp: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::unchecked(170.0, 26.0, 1.0)
    }
}

impl SpringConfig {
    /// Build and validate a config with default threshold, velocity and clamp
    pub fn new(tension: f64, friction: f64, mass: f64) -> Result<Self, ConfigurationError> {
        let config = Self::unchecked(tension, friction, mass);
        config.validate()?;
        Ok(config)
    }

    /// Const constructor for preset tables; not validated
    pub const fn unchecked(tension: f64, friction: f64, mass: f64) -> Self {
        Self {
            tension,
            friction,
            mass,
            rest_threshold: DEFAULT_REST_THRESHOLD,
            initial_velocity: 0.0,
            clamp: false,
        }
    }

    pub fn with_rest_threshold(mut self, rest_threshold: f64) -> Self {
        self.rest_threshold = rest_threshold;
        self
    }

    pub fn with_initial_velocity(mut self, initial_velocity: f64) -> Self {
        self.initial_velocity = initial_velocity;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_finite("tension", self.tension)?;
        ensure_finite("friction", self.friction)?;
        ensure_finite("mass", self.mass)?;
        ensure_finite("restThreshold", self.rest_threshold)?;
        ensure_finite("initialVelocity", self.initial_velocity)?;

        if self.tension <= 0.0 {
            return Err(ConfigurationError::NonPositiveTension(self.tension));
        }
        if self.friction < 0.0 {
            return Err(ConfigurationError::NegativeFriction(self.friction));
        }
        if self.mass <= 0.0 {
            return Err(ConfigurationError::NonPositiveMass(self.mass));
        }
        if self.rest_threshold <= 0.0 {
            return Err(ConfigurationError::NonPositiveRestThreshold(self.rest_threshold));
        }
        Ok(())
    }

    /// Copy of `self` with the patch applied, validated as a whole
    pub fn merged(&self, patch: &SpringConfigPatch) -> Result<Self, ConfigurationError> {
        let mut next = *self;
        if let Some(tension) = patch.tension {
            next.tension = tension;
        }
        if let Some(friction) = patch.friction {
            next.friction = friction;
        }
        if let Some(mass) = patch.mass {
            next.mass = mass;
        }
        if let Some(rest_threshold) = patch.rest_threshold {
            next.rest_threshold = rest_threshold;
        }
        if let Some(initial_velocity) = patch.initial_velocity {
            next.initial_velocity = initial_velocity;
        }
        if let Some(clamp) = patch.clamp {
            next.clamp = clamp;
        }
        next.validate()?;
        Ok(next)
    }
}

/// Partial config for `update_config`; absent fields keep their value
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpringConfigPatch {
    pub tension: Option<f64>,
    pub friction: Option<f64>,
    pub mass: Option<f64>,
    pub rest_threshold: Option<f64>,
    pub initial_velocity: Option<f64>,
    pub clamp: Option<bool>,
}
