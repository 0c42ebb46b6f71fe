use crate::core::error::ConfigurationError;
use crate::rigid_body::{BodyId, BodyPatch, CollisionBody, Vector2};

use super::detection::{detect, CollisionResult};
use super::resolution::resolve_collision;
use super::stats::TickStats;

/// Owns a set of bodies and runs detection + resolution over them
///
/// Bodies keep insertion order. The active pair list is rebuilt on every
/// structural change, so a tick never sees stale pairs. Pairs are resolved
/// one after another: an impulse applied to pair N is visible to pair N+1
/// within the same tick.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    bodies: Vec<CollisionBody>,
    /// Index pairs `(i, j)` with `i < j`, in insertion-derived order
    pairs: Vec<(usize, usize)>,
    gravity: Vector2,
    stats: TickStats,
}

/// Can these two bodies ever collide?
fn is_active_pair(a: &CollisionBody, b: &CollisionBody) -> bool {
    a.collision_enabled
        && b.collision_enabled
        && !(a.is_immovable() && b.is_immovable())
        && a.layer() == b.layer()
}

fn derive_pairs(bodies: &[CollisionBody]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if is_active_pair(&bodies[i], &bodies[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Two distinct mutable elements, `i < j`
fn pair_mut(bodies: &mut [CollisionBody], i: usize, j: usize) -> (&mut CollisionBody, &mut CollisionBody) {
    debug_assert!(i < j);
    let (left, right) = bodies.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body after validating it.
    ///
    /// A body whose id is already present replaces the old one in place
    /// (keeping its slot in the pair order). A static body is stored with
    /// infinite mass whatever mass it arrived with.
    pub fn add_body(&mut self, mut body: CollisionBody) -> Result<(), ConfigurationError> {
        body.validate()?;
        body.pin_static_mass();

        match self.index_of(body.id.as_str()) {
            Some(idx) => {
                debug_warn!("body '{}' already present, replacing it", body.id);
                self.bodies[idx] = body;
            }
            None => self.bodies.push(body),
        }
        self.rebuild_pairs();
        Ok(())
    }

    /// Add several bodies; stops at the first invalid one.
    pub fn add_bodies<I>(&mut self, bodies: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = CollisionBody>,
    {
        for body in bodies {
            self.add_body(body)?;
        }
        Ok(())
    }

    /// Remove a body by ID. Unknown IDs are a no-op returning `false`.
    pub fn remove_body(&mut self, id: &str) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.bodies.remove(idx);
        self.rebuild_pairs();
        true
    }

    /// Merge a patch into a body.
    ///
    /// `Ok(false)` for an unknown ID; an invalid patch is rejected before
    /// anything is written.
    pub fn update_body(&mut self, id: &str, patch: &BodyPatch) -> Result<bool, ConfigurationError> {
        let Some(idx) = self.index_of(id) else {
            return Ok(false);
        };
        patch.validate()?;
        patch.apply_to(&mut self.bodies[idx]);
        if patch.touches_pairing() {
            self.rebuild_pairs();
        }
        Ok(true)
    }

    /// Remove all bodies and pairs
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.pairs.clear();
        self.stats = TickStats::default();
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn body(&self, id: &str) -> Option<&CollisionBody> {
        self.bodies.iter().find(|b| b.id.as_str() == id)
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[CollisionBody] {
        &self.bodies
    }

    /// Active pairs as ID pairs, in processing order
    pub fn active_pairs(&self) -> impl Iterator<Item = (&BodyId, &BodyId)> + '_ {
        self.pairs
            .iter()
            .map(move |&(i, j)| (&self.bodies[i].id, &self.bodies[j].id))
    }

    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
    }

    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    pub fn last_tick_stats(&self) -> TickStats {
        self.stats
    }

    /// Advance dynamic bodies by `dt` seconds: gravity, then position.
    ///
    /// `dt` is used as given; callers that want to avoid tunneling clamp it.
    pub fn integrate(&mut self, dt: f64) {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut() {
            if body.is_immovable() {
                continue;
            }
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;
        }
    }

    /// Detect and resolve every active pair once, in order.
    ///
    /// Returns the manifolds of the pairs that were touching.
    pub fn tick(&mut self) -> Vec<CollisionResult> {
        let pairs = &self.pairs;
        let bodies = &mut self.bodies;

        let (stats, results) = TickStats::timed(|stats| {
            let mut results = Vec::new();
            for &(i, j) in pairs.iter() {
                stats.pairs_checked += 1;

                let result = detect(&bodies[i], &bodies[j]);
                let Some(contact) = result.contact else {
                    continue;
                };

                stats.collisions += 1;
                let (a, b) = pair_mut(bodies, i, j);
                if resolve_collision(a, b, &contact) {
                    stats.resolved += 1;
                }
                results.push(result);
            }
            results
        });

        self.stats = stats;
        results
    }

    /// `integrate(dt)` followed by `tick()`
    pub fn step(&mut self, dt: f64) -> Vec<CollisionResult> {
        self.integrate(dt);
        self.tick()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.id.as_str() == id)
    }

    fn rebuild_pairs(&mut self) {
        self.pairs = derive_pairs(&self.bodies);
    }
}
