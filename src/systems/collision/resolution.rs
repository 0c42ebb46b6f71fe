//! Impulse response for a detected contact.
//!
//! One pair at a time: normal impulse with restitution, a tangential
//! friction impulse, then a soft positional push apart. Static bodies
//! (static flag or infinite mass) are read but never written.

use crate::rigid_body::{material_or_default, CollisionBody};

use super::detection::Contact;

/// Fraction of the penetration removed per resolution
pub const POSITION_CORRECTION_FACTOR: f64 = 0.2;

/// Share of an impulse each body absorbs: each side takes the other's mass
/// fraction, a lone dynamic body takes all of it.
#[inline]
fn mass_shares(a: &CollisionBody, b: &CollisionBody) -> (f64, f64) {
    match (a.is_immovable(), b.is_immovable()) {
        (true, _) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (false, false) => {
            let total = a.mass + b.mass;
            (b.mass / total, a.mass / total)
        }
    }
}

/// Apply restitution, friction and positional correction to a touching pair.
///
/// Returns `false` when nothing was applied: both bodies static, or the
/// bodies already separating along the normal.
pub fn resolve_collision(a: &mut CollisionBody, b: &mut CollisionBody, contact: &Contact) -> bool {
    let a_static = a.is_immovable();
    let b_static = b.is_immovable();
    if a_static && b_static {
        return false;
    }

    let normal = contact.normal;
    let relative = b.velocity - a.velocity;
    let vel_along_normal = relative.dot(normal);
    if vel_along_normal > 0.0 {
        return false;
    }

    let mat_a = material_or_default(a.material.as_ref());
    let mat_b = material_or_default(b.material.as_ref());
    let restitution = mat_a.restitution.max(mat_b.restitution);
    let friction = (mat_a.friction + mat_b.friction) * 0.5;

    let (share_a, share_b) = mass_shares(a, b);

    // === Normal impulse ===
    let j = -(1.0 + restitution) * vel_along_normal;
    if !a_static {
        a.velocity -= normal * (j * share_a);
    }
    if !b_static {
        b.velocity += normal * (j * share_b);
    }

    // === Friction ===
    let relative = b.velocity - a.velocity;
    let tangent = (relative - normal * relative.dot(normal)).normalize();
    let jt = -relative.dot(tangent) * friction;
    if !a_static {
        a.velocity -= tangent * (jt * share_a);
    }
    if !b_static {
        b.velocity += tangent * (jt * share_b);
    }

    // === Positional correction (dynamic pairs only) ===
    if !a_static && !b_static {
        let correction = normal * (contact.penetration * POSITION_CORRECTION_FACTOR);
        a.position -= correction * share_a;
        b.position += correction * share_b;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect;
    use crate::rigid_body::{Material, Vector2};
    use approx::assert_relative_eq;

    fn elastic() -> Material {
        Material::new(1.0, 0.0)
    }

    #[test]
    fn elastic_head_on_swaps_velocities() {
        let v = 3.0;
        let mut a = CollisionBody::circle("a", Vector2::new(0.0, 0.0), 5.0)
            .with_velocity(Vector2::new(v, 0.0))
            .with_material(elastic());
        let mut b = CollisionBody::circle("b", Vector2::new(8.0, 0.0), 5.0)
            .with_velocity(Vector2::new(-v, 0.0))
            .with_material(elastic());

        let momentum_before = a.velocity * a.mass + b.velocity * b.mass;
        let contact = detect(&a, &b).contact.unwrap();
        assert!(resolve_collision(&mut a, &mut b, &contact));

        assert_relative_eq!(a.velocity.x, -v, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, v, epsilon = 1e-12);
        assert_relative_eq!(a.velocity.y, 0.0);
        let momentum_after = a.velocity * a.mass + b.velocity * b.mass;
        assert_relative_eq!(momentum_before.x, momentum_after.x, epsilon = 1e-12);
    }

    #[test]
    fn default_materials_use_restitution_point_two() {
        let mut a = CollisionBody::circle("a", Vector2::ZERO, 5.0).with_velocity(Vector2::new(10.0, 0.0));
        let mut b = CollisionBody::circle("b", Vector2::new(8.0, 0.0), 5.0);

        let contact = detect(&a, &b).contact.unwrap();
        resolve_collision(&mut a, &mut b, &contact);

        // j = 1.2 * 10, split evenly
        assert_relative_eq!(a.velocity.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(b.velocity.x, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut a = CollisionBody::circle("a", Vector2::ZERO, 5.0).with_velocity(Vector2::new(-1.0, 0.0));
        let mut b = CollisionBody::circle("b", Vector2::new(8.0, 0.0), 5.0).with_velocity(Vector2::new(1.0, 0.0));
        let before = (a.clone(), b.clone());

        let contact = detect(&a, &b).contact.unwrap();
        assert!(!resolve_collision(&mut a, &mut b, &contact));
        assert_eq!((a, b), before);
    }

    #[test]
    fn static_body_is_never_mutated() {
        let mut ball = CollisionBody::circle("ball", Vector2::new(0.0, -5.5), 1.0)
            .with_velocity(Vector2::new(2.0, 4.0))
            .with_material(Material::new(0.5, 0.3));
        let mut floor = CollisionBody::rectangle("floor", Vector2::ZERO, 20.0, 10.0).as_static();
        let floor_before = floor.clone();

        let contact = detect(&ball, &floor).contact.unwrap();
        assert!(resolve_collision(&mut ball, &mut floor, &contact));

        assert_eq!(floor, floor_before);
        // Bounced upward at restitution 0.5
        assert_relative_eq!(ball.velocity.y, -2.0, epsilon = 1e-12);
        // Friction slowed the slide
        assert!(ball.velocity.x < 2.0 && ball.velocity.x > 0.0);
        // No positional correction against a static body
        assert_eq!(ball.position, Vector2::new(0.0, -5.5));
    }

    #[test]
    fn static_body_on_side_a_is_never_mutated() {
        let mut wall = CollisionBody::rectangle("wall", Vector2::ZERO, 10.0, 10.0).as_static();
        let mut ball = CollisionBody::circle("ball", Vector2::new(5.5, 0.0), 1.0).with_velocity(Vector2::new(-3.0, 0.0));
        let wall_before = wall.clone();

        let contact = detect(&wall, &ball).contact.unwrap();
        assert!(resolve_collision(&mut wall, &mut ball, &contact));
        assert_eq!(wall, wall_before);
        assert!(ball.velocity.x > 0.0);
    }

    #[test]
    fn both_static_is_skipped() {
        let mut a = CollisionBody::rectangle("a", Vector2::ZERO, 10.0, 10.0).as_static();
        let mut b = CollisionBody::rectangle("b", Vector2::new(9.0, 0.0), 10.0, 10.0).as_static();
        let contact = detect(&a, &b).contact.unwrap();
        assert!(!resolve_collision(&mut a, &mut b, &contact));
    }

    #[test]
    fn positional_correction_splits_by_mass() {
        let mut light = CollisionBody::circle("light", Vector2::ZERO, 5.0).with_mass(1.0);
        let mut heavy = CollisionBody::circle("heavy", Vector2::new(8.0, 0.0), 5.0).with_mass(3.0);

        let contact = detect(&light, &heavy).contact.unwrap();
        resolve_collision(&mut light, &mut heavy, &contact);

        // 2 * 0.2 = 0.4 total push, the light body takes 3/4 of it
        assert_relative_eq!(light.position.x, -0.3, epsilon = 1e-12);
        assert_relative_eq!(heavy.position.x, 8.1, epsilon = 1e-12);
    }

    #[test]
    fn friction_reduces_tangential_slip() {
        let mut a = CollisionBody::circle("a", Vector2::ZERO, 5.0)
            .with_velocity(Vector2::new(1.0, 4.0))
            .with_material(Material::new(0.0, 0.5));
        let mut b = CollisionBody::circle("b", Vector2::new(8.0, 0.0), 5.0).with_material(Material::new(0.0, 0.5));

        let contact = detect(&a, &b).contact.unwrap();
        resolve_collision(&mut a, &mut b, &contact);

        let slip_after = (b.velocity - a.velocity).y.abs();
        assert_relative_eq!(slip_after, 4.0 * 0.5, epsilon = 1e-12);
    }
}
