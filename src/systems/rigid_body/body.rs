use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{ensure_finite, ConfigurationError};

use super::material::Material;
use super::shape::{Shape, DEFAULT_POINT_TOLERANCE};
use super::vec2::Vector2;

/// Caller-chosen body identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BodyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Collision Body - one physical entity in a [`CollisionWorld`]
///
/// [`CollisionWorld`]: crate::systems::collision::CollisionWorld
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionBody {
    pub id: BodyId,
    /// Centre of the shape
    pub position: Vector2,
    /// Units per second
    #[serde(default)]
    pub velocity: Vector2,
    /// `f64::INFINITY` means immovable
    #[serde(with = "mass_serde", default = "unit_mass")]
    pub mass: f64,
    pub shape: Shape,
    #[serde(default)]
    pub material: Option<Material>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default = "enabled_by_default")]
    pub collision_enabled: bool,
    /// Bodies only collide within the same layer; `None` is layer 0
    #[serde(default)]
    pub collision_layer: Option<u32>,
    /// Stored for consumers, ignored by detection
    #[serde(default)]
    pub rotation: Option<f64>,
}

fn enabled_by_default() -> bool {
    true
}

/// Mass of a fresh dynamic body, and of a static body once unpinned
pub const DEFAULT_MASS: f64 = 1.0;

fn unit_mass() -> f64 {
    DEFAULT_MASS
}

impl CollisionBody {
    fn with_shape(id: impl Into<BodyId>, position: Vector2, shape: Shape) -> Self {
        Self {
            id: id.into(),
            position,
            velocity: Vector2::ZERO,
            mass: DEFAULT_MASS,
            shape,
            material: None,
            is_static: false,
            collision_enabled: true,
            collision_layer: None,
            rotation: None,
        }
    }

    /// Create a circular body centred at `position`
    pub fn circle(id: impl Into<BodyId>, position: Vector2, radius: f64) -> Self {
        Self::with_shape(id, position, Shape::Circle { radius })
    }

    /// Create an axis-aligned rectangle centred at `position`
    pub fn rectangle(id: impl Into<BodyId>, position: Vector2, width: f64, height: f64) -> Self {
        Self::with_shape(id, position, Shape::Rectangle { width, height })
    }

    /// Create a polygon; `vertices` are offsets from `position`
    pub fn polygon(id: impl Into<BodyId>, position: Vector2, vertices: Vec<Vector2>) -> Self {
        Self::with_shape(id, position, Shape::Polygon { vertices })
    }

    /// Create a point with the default tolerance radius
    pub fn point(id: impl Into<BodyId>, position: Vector2) -> Self {
        Self::point_with_tolerance(id, position, DEFAULT_POINT_TOLERANCE)
    }

    pub fn point_with_tolerance(id: impl Into<BodyId>, position: Vector2, tolerance: f64) -> Self {
        Self::with_shape(id, position, Shape::Point { tolerance })
    }

    // === Builder options ===

    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Pin the body in place (infinite mass)
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self.mass = f64::INFINITY;
        self
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.collision_layer = Some(layer);
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_collision_enabled(mut self, enabled: bool) -> Self {
        self.collision_enabled = enabled;
        self
    }

    // === Queries ===

    /// Static flag or infinite mass; such a body is never moved by the solver
    #[inline]
    pub fn is_immovable(&self) -> bool {
        self.is_static || self.mass.is_infinite()
    }

    /// A static body always carries infinite mass
    pub(crate) fn pin_static_mass(&mut self) {
        if self.is_static {
            self.mass = f64::INFINITY;
        }
    }

    #[inline]
    pub fn layer(&self) -> u32 {
        self.collision_layer.unwrap_or(0)
    }

    /// Reject data that would turn into NaN once the solver touches it
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_finite("position.x", self.position.x)?;
        ensure_finite("position.y", self.position.y)?;
        ensure_finite("velocity.x", self.velocity.x)?;
        ensure_finite("velocity.y", self.velocity.y)?;
        validate_mass(self.mass)?;
        if let Some(material) = &self.material {
            validate_material(material)?;
        }
        if let Some(rotation) = self.rotation {
            ensure_finite("rotation", rotation)?;
        }
        self.shape.validate()
    }
}

fn validate_mass(mass: f64) -> Result<(), ConfigurationError> {
    if mass.is_nan() || mass <= 0.0 {
        return Err(ConfigurationError::NonPositiveMass(mass));
    }
    Ok(())
}

fn validate_material(material: &Material) -> Result<(), ConfigurationError> {
    ensure_finite("restitution", material.restitution)?;
    ensure_finite("friction", material.friction)?;
    if material.restitution < 0.0 {
        return Err(ConfigurationError::NegativeDimension {
            field: "restitution",
            value: material.restitution,
        });
    }
    if material.friction < 0.0 {
        return Err(ConfigurationError::NegativeDimension {
            field: "friction",
            value: material.friction,
        });
    }
    Ok(())
}

/// Partial update for a body already in a world
///
/// The shape is deliberately absent: it is fixed at creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BodyPatch {
    pub position: Option<Vector2>,
    pub velocity: Option<Vector2>,
    pub mass: Option<f64>,
    pub material: Option<Material>,
    pub is_static: Option<bool>,
    pub collision_enabled: Option<bool>,
    pub collision_layer: Option<u32>,
    pub rotation: Option<f64>,
}

impl BodyPatch {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(p) = self.position {
            ensure_finite("position.x", p.x)?;
            ensure_finite("position.y", p.y)?;
        }
        if let Some(v) = self.velocity {
            ensure_finite("velocity.x", v.x)?;
            ensure_finite("velocity.y", v.y)?;
        }
        if let Some(mass) = self.mass {
            validate_mass(mass)?;
        }
        if let Some(material) = &self.material {
            validate_material(material)?;
        }
        if let Some(rotation) = self.rotation {
            ensure_finite("rotation", rotation)?;
        }
        Ok(())
    }

    /// Field-by-field merge; call [`BodyPatch::validate`] first
    ///
    /// `isStatic` drags the mass along with it: pinning sets it infinite,
    /// unpinning an infinite-mass body without a `mass` of its own falls back
    /// to [`DEFAULT_MASS`]. A mass patch on a body that stays static is
    /// overridden.
    pub fn apply_to(&self, body: &mut CollisionBody) {
        if let Some(p) = self.position {
            body.position = p;
        }
        if let Some(v) = self.velocity {
            body.velocity = v;
        }
        if let Some(mass) = self.mass {
            body.mass = mass;
        }
        if let Some(material) = self.material {
            body.material = Some(material);
        }
        if let Some(is_static) = self.is_static {
            body.is_static = is_static;
            if !is_static && self.mass.is_none() && body.mass.is_infinite() {
                body.mass = DEFAULT_MASS;
            }
        }
        body.pin_static_mass();
        if let Some(enabled) = self.collision_enabled {
            body.collision_enabled = enabled;
        }
        if let Some(layer) = self.collision_layer {
            body.collision_layer = Some(layer);
        }
        if let Some(rotation) = self.rotation {
            body.rotation = Some(rotation);
        }
    }

    /// Does this patch change which pairs are active?
    pub fn touches_pairing(&self) -> bool {
        self.is_static.is_some()
            || self.collision_enabled.is_some()
            || self.collision_layer.is_some()
            || self.mass.is_some()
    }
}

/// Four static rectangles framing the region `[x, x+width] x [y, y+height]`
///
/// The walls sit just outside the region so its full interior stays free.
/// Top and bottom span the corners.
pub fn boundary_walls(x: f64, y: f64, width: f64, height: f64, thickness: f64) -> [CollisionBody; 4] {
    let half_t = thickness * 0.5;
    let cx = x + width * 0.5;
    let cy = y + height * 0.5;
    let span = width + 2.0 * thickness;

    [
        CollisionBody::rectangle("boundary-top", Vector2::new(cx, y - half_t), span, thickness).as_static(),
        CollisionBody::rectangle("boundary-bottom", Vector2::new(cx, y + height + half_t), span, thickness)
            .as_static(),
        CollisionBody::rectangle("boundary-left", Vector2::new(x - half_t, cy), thickness, height).as_static(),
        CollisionBody::rectangle("boundary-right", Vector2::new(x + width + half_t, cy), thickness, height)
            .as_static(),
    ]
}

/// JSON has no infinity: static mass round-trips as `null`
mod mass_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mass: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if mass.is_finite() {
            serializer.serialize_f64(*mass)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
