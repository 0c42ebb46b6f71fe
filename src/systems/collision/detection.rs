//! Narrow-phase tests between body pairs.
//!
//! Dispatch is on the ordered shape pair. Mirrored pairs (rectangle vs circle)
//! swap their arguments, run the canonical routine and flip the normal, so
//! `detect(a, b)` and `detect(b, a)` always agree up to the normal's sign.
//! Polygons are carried by the body model but no routine handles them yet;
//! any pair involving one reports no collision.

use serde::Serialize;

use crate::rigid_body::{BodyId, CollisionBody, ShapeKind, Vector2};

/// Manifold of a touching pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unit normal pointing from body A toward body B
    pub normal: Vector2,
    pub contact_point: Vector2,
    /// Overlap depth, never negative
    pub penetration: f64,
    /// Velocity of B relative to A at detection time
    pub relative_velocity: Vector2,
}

/// Outcome of testing one pair
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionResult {
    pub body_a: BodyId,
    pub body_b: BodyId,
    #[serde(flatten)]
    pub contact: Option<Contact>,
}

impl CollisionResult {
    #[inline]
    pub fn collision(&self) -> bool {
        self.contact.is_some()
    }
}

/// Shape-only hit, before body identities and velocities are attached
#[derive(Clone, Copy, Debug, PartialEq)]
struct Hit {
    normal: Vector2,
    point: Vector2,
    penetration: f64,
}

impl Hit {
    #[inline]
    fn flip(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Test a pair of bodies, in the given order.
pub fn detect(a: &CollisionBody, b: &CollisionBody) -> CollisionResult {
    let contact = detect_shapes(a, b).map(|hit| Contact {
        normal: hit.normal,
        contact_point: hit.point,
        penetration: hit.penetration,
        relative_velocity: b.velocity - a.velocity,
    });

    CollisionResult {
        body_a: a.id.clone(),
        body_b: b.id.clone(),
        contact,
    }
}

fn detect_shapes(a: &CollisionBody, b: &CollisionBody) -> Option<Hit> {
    use ShapeKind::*;

    match (a.shape.kind(), b.shape.kind()) {
        (Circle | Point, Circle | Point) => {
            let ra = a.shape.circle_radius()?;
            let rb = b.shape.circle_radius()?;
            circle_circle(a.position, ra, b.position, rb)
        }
        // A zero offset on the separating axis carries no sign; fix the
        // order by id so both argument orders agree
        (Rectangle, Rectangle) if b.id < a.id => {
            aabb_aabb(b.position, b.shape.half_extents(), a.position, a.shape.half_extents()).map(Hit::flip)
        }
        (Rectangle, Rectangle) => {
            aabb_aabb(a.position, a.shape.half_extents(), b.position, b.shape.half_extents())
        }
        (Circle | Point, Rectangle) => {
            let r = a.shape.circle_radius()?;
            circle_rect(a.position, r, b.position, b.shape.half_extents())
        }
        (Rectangle, Circle | Point) => {
            let r = b.shape.circle_radius()?;
            circle_rect(b.position, r, a.position, a.shape.half_extents()).map(Hit::flip)
        }
        (ka, kb) => {
            debug_warn!(
                "collision pair {} vs {} is not supported ({} / {}), reporting no collision",
                ka.name(),
                kb.name(),
                a.id,
                b.id
            );
            None
        }
    }
}

/// Circle vs circle; points arrive here with their tolerance as radius.
fn circle_circle(pos_a: Vector2, radius_a: f64, pos_b: Vector2, radius_b: f64) -> Option<Hit> {
    let dist = pos_a.distance(pos_b);
    let radius_sum = radius_a + radius_b;

    if dist >= radius_sum {
        return None;
    }

    // Coincident centres give a zero normal
    let normal = (pos_b - pos_a).normalize();
    Some(Hit {
        normal,
        point: pos_a + normal * radius_a,
        penetration: radius_sum - dist,
    })
}

/// Axis-aligned box vs box. The minimum-overlap axis separates; X wins ties.
/// A zero offset on that axis points the normal along +X / +Y.
fn aabb_aabb(pos_a: Vector2, half_a: Vector2, pos_b: Vector2, half_b: Vector2) -> Option<Hit> {
    let d = pos_b - pos_a;
    let overlap_x = (half_a.x + half_b.x) - d.x.abs();
    let overlap_y = (half_a.y + half_b.y) - d.y.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let (normal, penetration) = if overlap_x <= overlap_y {
        (Vector2::new(d.x.signum(), 0.0), overlap_x)
    } else {
        (Vector2::new(0.0, d.y.signum()), overlap_y)
    };

    // Centre of the intersection rectangle
    let min_x = (pos_a.x - half_a.x).max(pos_b.x - half_b.x);
    let max_x = (pos_a.x + half_a.x).min(pos_b.x + half_b.x);
    let min_y = (pos_a.y - half_a.y).max(pos_b.y - half_b.y);
    let max_y = (pos_a.y + half_a.y).min(pos_b.y + half_b.y);

    Some(Hit {
        normal,
        point: Vector2::new((min_x + max_x) * 0.5, (min_y + max_y) * 0.5),
        penetration,
    })
}

/// Circle (A) vs axis-aligned box (B).
fn circle_rect(center: Vector2, radius: f64, rect_pos: Vector2, half: Vector2) -> Option<Hit> {
    let closest = Vector2::new(
        center.x.max(rect_pos.x - half.x).min(rect_pos.x + half.x),
        center.y.max(rect_pos.y - half.y).min(rect_pos.y + half.y),
    );
    let diff = closest - center;
    let dist_sq = diff.magnitude_squared();

    if dist_sq >= radius * radius {
        return None;
    }

    if dist_sq > 0.0 {
        let dist = dist_sq.sqrt();
        return Some(Hit {
            normal: diff * (1.0 / dist),
            point: closest,
            penetration: radius - dist,
        });
    }

    // Centre inside the box: leave through the nearer face
    let local = center - rect_pos;
    let depth_x = half.x - local.x.abs();
    let depth_y = half.y - local.y.abs();

    if depth_x <= depth_y {
        let side = local.x.signum();
        Some(Hit {
            normal: Vector2::new(-side, 0.0),
            point: Vector2::new(rect_pos.x + side * half.x, center.y),
            penetration: radius + depth_x,
        })
    } else {
        let side = local.y.signum();
        Some(Hit {
            normal: Vector2::new(0.0, -side),
            point: Vector2::new(center.x, rect_pos.y + side * half.y),
            penetration: radius + depth_y,
        })
    }
}
