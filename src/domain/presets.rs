//! Presets - named spring configs and surface materials
//!
//! Plain constant tables; callers pick one by name and pass it by value.

use std::fmt;
use std::str::FromStr;

use crate::core::error::ConfigurationError;
use crate::rigid_body::{Material, DEFAULT_FRICTION, DEFAULT_RESTITUTION};
use crate::spring::SpringConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringPreset {
    Default,
    Gentle,
    Wobbly,
    Stiff,
    Slow,
    Molasses,
    Bouncy,
    Snappy,
}

impl SpringPreset {
    pub const ALL: [SpringPreset; 8] = [
        SpringPreset::Default,
        SpringPreset::Gentle,
        SpringPreset::Wobbly,
        SpringPreset::Stiff,
        SpringPreset::Slow,
        SpringPreset::Molasses,
        SpringPreset::Bouncy,
        SpringPreset::Snappy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpringPreset::Default => "default",
            SpringPreset::Gentle => "gentle",
            SpringPreset::Wobbly => "wobbly",
            SpringPreset::Stiff => "stiff",
            SpringPreset::Slow => "slow",
            SpringPreset::Molasses => "molasses",
            SpringPreset::Bouncy => "bouncy",
            SpringPreset::Snappy => "snappy",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigurationError::UnknownPreset(name.to_string()))
    }

    /// (tension, friction, mass)
    pub const fn params(self) -> (f64, f64, f64) {
        match self {
            SpringPreset::Default => (170.0, 26.0, 1.0),
            SpringPreset::Gentle => (120.0, 14.0, 1.0),
            SpringPreset::Wobbly => (180.0, 12.0, 1.0),
            SpringPreset::Stiff => (210.0, 20.0, 1.0),
            SpringPreset::Slow => (280.0, 60.0, 1.0),
            SpringPreset::Molasses => (120.0, 50.0, 1.0),
            SpringPreset::Bouncy => (400.0, 10.0, 1.0),
            SpringPreset::Snappy => (500.0, 40.0, 1.0),
        }
    }

    pub const fn config(self) -> SpringConfig {
        let (tension, friction, mass) = self.params();
        SpringConfig::unchecked(tension, friction, mass)
    }
}

impl fmt::Display for SpringPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpringPreset {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// (name, material) pairs for common surfaces
pub const MATERIALS: [(&str, Material); 7] = [
    ("rubber", Material::new(0.8, 0.9)),
    ("metal", Material::new(0.3, 0.4)),
    ("wood", Material::new(0.4, 0.5)),
    ("glass", Material::new(0.6, 0.2)),
    ("ice", Material::new(0.1, 0.02)),
    ("bouncy_ball", Material::new(0.95, 0.3)),
    ("default", Material::new(DEFAULT_RESTITUTION, DEFAULT_FRICTION)),
];

/// Look up a material by name (case-insensitive)
pub fn material(name: &str) -> Result<Material, ConfigurationError> {
    MATERIALS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, material)| material)
        .ok_or_else(|| ConfigurationError::UnknownPreset(name.to_string()))
}
