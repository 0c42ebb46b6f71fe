use serde::{Deserialize, Serialize};

use crate::core::error::{ensure_finite, ConfigurationError};

use super::vec2::Vector2;

/// Tolerance radius of a point body when none is given
pub const DEFAULT_POINT_TOLERANCE: f64 = 1.0;

/// Collision shape; the tag and its data travel together
///
/// Every shape is positioned by its centre. Rectangles are axis-aligned,
/// polygon vertices are offsets from the body position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
    Polygon { vertices: Vec<Vector2> },
    Point {
        #[serde(default = "default_point_tolerance")]
        tolerance: f64,
    },
}

fn default_point_tolerance() -> f64 {
    DEFAULT_POINT_TOLERANCE
}

/// Shape tag without data, for dispatch tables and diagnostics
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
    Point,
}

impl ShapeKind {
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Point => "point",
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Rectangle { .. } => ShapeKind::Rectangle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
            Shape::Point { .. } => ShapeKind::Point,
        }
    }

    /// Radius used when the shape is treated as a circle (circles and points)
    pub fn circle_radius(&self) -> Option<f64> {
        match *self {
            Shape::Circle { radius } => Some(radius),
            Shape::Point { tolerance } => Some(tolerance),
            _ => None,
        }
    }

    /// Half extents of the axis-aligned bounds around the centre
    pub fn half_extents(&self) -> Vector2 {
        match self {
            Shape::Circle { radius } => Vector2::new(*radius, *radius),
            Shape::Point { tolerance } => Vector2::new(*tolerance, *tolerance),
            Shape::Rectangle { width, height } => Vector2::new(width * 0.5, height * 0.5),
            Shape::Polygon { vertices } => {
                let mut half = Vector2::ZERO;
                for v in vertices {
                    half.x = half.x.max(v.x.abs());
                    half.y = half.y.max(v.y.abs());
                }
                half
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Shape::Circle { radius } => non_negative("radius", *radius),
            Shape::Point { tolerance } => non_negative("tolerance", *tolerance),
            Shape::Rectangle { width, height } => {
                non_negative("width", *width)?;
                non_negative("height", *height)
            }
            Shape::Polygon { vertices } => {
                if vertices.len() < 3 {
                    return Err(ConfigurationError::DegeneratePolygon(vertices.len()));
                }
                for v in vertices {
                    ensure_finite("vertex.x", v.x)?;
                    ensure_finite("vertex.y", v.y)?;
                }
                Ok(())
            }
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigurationError::NegativeDimension { field, value });
    }
    Ok(())
}
