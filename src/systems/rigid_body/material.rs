use serde::{Deserialize, Serialize};

/// Restitution used for a body without a material
pub const DEFAULT_RESTITUTION: f64 = 0.2;
/// Friction used for a body without a material
pub const DEFAULT_FRICTION: f64 = 0.1;

/// Surface response of a body
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f64,
    /// Tangential grip
    pub friction: f64,
}

impl Material {
    pub const fn new(restitution: f64, friction: f64) -> Self {
        Self { restitution, friction }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(DEFAULT_RESTITUTION, DEFAULT_FRICTION)
    }
}

/// Material of an optional slot, falling back to the engine defaults
#[inline]
pub fn material_or_default(material: Option<&Material>) -> Material {
    material.copied().unwrap_or_default()
}
