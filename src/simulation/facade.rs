use wasm_bindgen::prelude::*;

use crate::collision::{CollisionWorld, TickStats};
use crate::domain::presets::SpringPreset;
use crate::rigid_body::{boundary_walls, BodyPatch, CollisionBody, Vector2};
use crate::spring::{AxisValues, MultiAxisSpring, MultiTarget, Spring, SpringConfig, SpringConfigPatch, SpringTarget};

use super::codec::{parse, render, to_js};

// === SPRING ===

/// Scalar spring driven from a JS animation frame loop
#[wasm_bindgen]
pub struct SpringHandle {
    spring: Spring,
}

#[wasm_bindgen]
impl SpringHandle {
    /// Create a spring from a named preset ("default", "wobbly", ...)
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str) -> Result<SpringHandle, JsValue> {
        let preset = SpringPreset::from_name(preset).map_err(to_js)?;
        let spring = Spring::new(preset.config()).map_err(to_js)?;
        Ok(Self { spring })
    }

    /// Create a spring from explicit parameters
    pub fn custom(
        tension: f64,
        friction: f64,
        mass: f64,
        rest_threshold: Option<f64>,
        initial_velocity: Option<f64>,
        clamp: Option<bool>,
    ) -> Result<SpringHandle, JsValue> {
        let mut config = SpringConfig::unchecked(tension, friction, mass);
        if let Some(threshold) = rest_threshold {
            config = config.with_rest_threshold(threshold);
        }
        if let Some(velocity) = initial_velocity {
            config = config.with_initial_velocity(velocity);
        }
        if let Some(clamp) = clamp {
            config = config.with_clamp(clamp);
        }
        let spring = Spring::new(config).map_err(to_js)?;
        Ok(Self { spring })
    }

    /// Create a spring from a `SpringConfig` JSON object
    pub fn from_config_json(json: &str) -> Result<SpringHandle, JsValue> {
        let config: SpringConfig = parse(json).map_err(to_js)?;
        let spring = Spring::new(config).map_err(to_js)?;
        Ok(Self { spring })
    }

    pub fn set_target(&mut self, to: f64, from: Option<f64>, velocity: Option<f64>) {
        self.spring.set_target(to, SpringTarget { from, velocity });
    }

    /// Advance one fixed step; returns the new position
    pub fn update(&mut self) -> f64 {
        self.spring.update().position
    }

    /// Advance by `dt` seconds; returns the new position
    pub fn step(&mut self, dt: f64) -> f64 {
        self.spring.step(dt).position
    }

    pub fn reset(&mut self, position: f64, velocity: Option<f64>) {
        self.spring.reset(position, velocity.unwrap_or(0.0));
    }

    pub fn set_timestep(&mut self, dt: f64) {
        self.spring.set_timestep(dt);
    }

    pub fn update_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let patch: SpringConfigPatch = parse(json).map_err(to_js)?;
        self.spring.update_config(&patch).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn position(&self) -> f64 { self.spring.position() }

    #[wasm_bindgen(getter)]
    pub fn velocity(&self) -> f64 { self.spring.velocity() }

    #[wasm_bindgen(getter)]
    pub fn target(&self) -> f64 { self.spring.target() }

    #[wasm_bindgen(getter)]
    pub fn at_rest(&self) -> bool { self.spring.is_at_rest() }

    /// `{"position":..,"velocity":..,"atRest":..}`
    pub fn state_json(&self) -> String {
        render(&self.spring.state())
    }

    pub fn config_json(&self) -> String {
        render(self.spring.config())
    }
}

/// Spring over a named-field vector (`{"x":0,"y":0,"scale":1}`)
#[wasm_bindgen]
pub struct MultiSpringHandle {
    springs: MultiAxisSpring,
}

impl MultiSpringHandle {
    fn build(initial_json: &str, config: SpringConfig) -> Result<MultiSpringHandle, JsValue> {
        let initial: AxisValues = parse(initial_json).map_err(to_js)?;
        let springs = MultiAxisSpring::new(initial, config).map_err(to_js)?;
        Ok(Self { springs })
    }
}

#[wasm_bindgen]
impl MultiSpringHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(initial_json: &str, preset: &str) -> Result<MultiSpringHandle, JsValue> {
        let preset = SpringPreset::from_name(preset).map_err(to_js)?;
        Self::build(initial_json, preset.config())
    }

    pub fn with_config_json(initial_json: &str, config_json: &str) -> Result<MultiSpringHandle, JsValue> {
        let config: SpringConfig = parse(config_json).map_err(to_js)?;
        Self::build(initial_json, config)
    }

    /// `{"to":{..}, "from"?:{..}, "velocity"?:{..}}`
    pub fn set_target_json(&mut self, json: &str) -> Result<(), JsValue> {
        let target: MultiTarget = parse(json).map_err(to_js)?;
        self.springs.set_target(&target);
        Ok(())
    }

    /// Advance every axis one step; returns the merged values as JSON
    pub fn update_json(&mut self) -> String {
        render(&self.springs.update())
    }

    /// Reset to the given values (JSON), or in place when `None`
    pub fn reset_json(&mut self, json: Option<String>) -> Result<(), JsValue> {
        let values: Option<AxisValues> = match json {
            Some(json) => Some(parse(&json).map_err(to_js)?),
            None => None,
        };
        self.springs.reset(values.as_ref());
        Ok(())
    }

    pub fn update_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let patch: SpringConfigPatch = parse(json).map_err(to_js)?;
        self.springs.update_config(&patch).map_err(to_js)
    }

    pub fn set_timestep(&mut self, dt: f64) {
        self.springs.set_timestep(dt);
    }

    pub fn values_json(&self) -> String {
        render(&self.springs.values())
    }

    pub fn velocities_json(&self) -> String {
        render(&self.springs.velocities())
    }

    #[wasm_bindgen(getter)]
    pub fn at_rest(&self) -> bool { self.springs.is_at_rest() }
}

// === COLLISION ===

/// Collision world owned by the JS side
#[wasm_bindgen]
pub struct CollisionSystem {
    world: CollisionWorld,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSystem {
    /// Shared tail of the typed adders: optional mass, optional pin
    fn insert(&mut self, mut body: CollisionBody, mass: Option<f64>, is_static: Option<bool>) -> Result<(), JsValue> {
        if let Some(mass) = mass {
            body = body.with_mass(mass);
        }
        if is_static.unwrap_or(false) {
            body = body.as_static();
        }
        self.world.add_body(body).map_err(to_js)
    }
}

// Typed adders take optional `mass` and `is_static`; material, layer and
// rotation go through `add_body_json`.
#[wasm_bindgen]
impl CollisionSystem {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { world: CollisionWorld::new() }
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.world.set_gravity(Vector2::new(x, y));
    }

    pub fn add_circle(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        radius: f64,
        mass: Option<f64>,
        is_static: Option<bool>,
    ) -> Result<(), JsValue> {
        self.insert(CollisionBody::circle(id, Vector2::new(x, y), radius), mass, is_static)
    }

    pub fn add_rectangle(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        mass: Option<f64>,
        is_static: Option<bool>,
    ) -> Result<(), JsValue> {
        self.insert(CollisionBody::rectangle(id, Vector2::new(x, y), width, height), mass, is_static)
    }

    /// `vertices_json` is an array of `{"x":..,"y":..}` offsets from `(x, y)`
    pub fn add_polygon(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        vertices_json: &str,
        mass: Option<f64>,
        is_static: Option<bool>,
    ) -> Result<(), JsValue> {
        let vertices: Vec<Vector2> = parse(vertices_json).map_err(to_js)?;
        self.insert(CollisionBody::polygon(id, Vector2::new(x, y), vertices), mass, is_static)
    }

    pub fn add_point(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        tolerance: Option<f64>,
        mass: Option<f64>,
        is_static: Option<bool>,
    ) -> Result<(), JsValue> {
        let body = match tolerance {
            Some(tolerance) => CollisionBody::point_with_tolerance(id, Vector2::new(x, y), tolerance),
            None => CollisionBody::point(id, Vector2::new(x, y)),
        };
        self.insert(body, mass, is_static)
    }

    /// Frame `[x, x+width] x [y, y+height]` with four static walls
    pub fn add_boundary_walls(&mut self, x: f64, y: f64, width: f64, height: f64, thickness: f64) -> Result<(), JsValue> {
        self.world
            .add_bodies(boundary_walls(x, y, width, height, thickness))
            .map_err(to_js)
    }

    /// Add a full `CollisionBody` JSON object
    pub fn add_body_json(&mut self, json: &str) -> Result<(), JsValue> {
        let body: CollisionBody = parse(json).map_err(to_js)?;
        self.world.add_body(body).map_err(to_js)
    }

    /// Patch a body; `false` when the ID is unknown
    pub fn update_body_json(&mut self, id: &str, json: &str) -> Result<bool, JsValue> {
        let patch: BodyPatch = parse(json).map_err(to_js)?;
        self.world.update_body(id, &patch).map_err(to_js)
    }

    pub fn remove_body(&mut self, id: &str) -> bool {
        self.world.remove_body(id)
    }

    /// Run detection + resolution once; returns the contacts as a JSON array
    pub fn tick_json(&mut self) -> String {
        render(&self.world.tick())
    }

    /// Integrate by `dt` seconds then tick
    pub fn step_json(&mut self, dt: f64) -> String {
        render(&self.world.step(dt))
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.world.body_count() }

    #[wasm_bindgen(getter)]
    pub fn pair_count(&self) -> usize { self.world.pair_count() }

    pub fn body_json(&self, id: &str) -> Option<String> {
        self.world.body(id).map(render)
    }

    pub fn bodies_json(&self) -> String {
        render(&self.world.bodies())
    }

    /// Counters of the last tick
    pub fn get_tick_stats(&self) -> TickStats {
        self.world.last_tick_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn spring_handle_runs_to_rest() {
        let mut handle = SpringHandle::new("stiff").unwrap();
        handle.set_target(1.0, None, None);
        assert!(!handle.at_rest());

        let mut ticks = 0;
        while !handle.at_rest() && ticks < 600 {
            handle.update();
            ticks += 1;
        }
        assert!(handle.at_rest());
        assert!((handle.position() - 1.0).abs() < 0.01);

        let state: Value = serde_json::from_str(&handle.state_json()).unwrap();
        assert_eq!(state["atRest"], true);
    }

    #[test]
    fn spring_handle_custom_and_config_json() {
        let mut handle = SpringHandle::custom(120.0, 14.0, 1.0, Some(0.001), None, Some(true)).unwrap();
        let config: Value = serde_json::from_str(&handle.config_json()).unwrap();
        assert_eq!(config["restThreshold"], 0.001);
        assert_eq!(config["clamp"], true);

        handle.update_config_json(r#"{"tension":200}"#).unwrap();
        let config: Value = serde_json::from_str(&handle.config_json()).unwrap();
        assert_eq!(config["tension"], 200.0);

        let from_json = SpringHandle::from_config_json(r#"{"tension":50,"friction":5}"#).unwrap();
        assert_eq!(from_json.position(), 0.0);
    }

    #[test]
    fn multi_spring_handle_json_round_trip() {
        let mut handle = MultiSpringHandle::new(r#"{"x":0,"y":0}"#, "default").unwrap();
        handle.set_target_json(r#"{"to":{"x":100}}"#).unwrap();

        let values: Value = serde_json::from_str(&handle.update_json()).unwrap();
        assert!(values["x"].as_f64().unwrap() > 0.0);
        assert_eq!(values["y"], 0.0);

        handle.reset_json(Some(r#"{"x":5}"#.to_string())).unwrap();
        assert!(handle.at_rest());
        let values: Value = serde_json::from_str(&handle.values_json()).unwrap();
        assert_eq!(values["x"], 5.0);
    }

    #[test]
    fn collision_system_bounces_ball_off_floor() {
        let mut system = CollisionSystem::new();
        system.add_rectangle("floor", 0.0, 10.0, 100.0, 2.0, None, Some(true)).unwrap();
        system
            .add_body_json(r#"{"id":"ball","position":{"x":0,"y":8.5},"velocity":{"x":0,"y":5},"shape":{"type":"circle","radius":1}}"#)
            .unwrap();
        assert_eq!(system.body_count(), 2);
        assert_eq!(system.pair_count(), 1);

        let contacts: Value = serde_json::from_str(&system.tick_json()).unwrap();
        assert_eq!(contacts.as_array().unwrap().len(), 1);
        assert_eq!(contacts[0]["bodyA"], "floor");
        assert_eq!(contacts[0]["bodyB"], "ball");

        let ball: Value = serde_json::from_str(&system.body_json("ball").unwrap()).unwrap();
        assert!(ball["velocity"]["y"].as_f64().unwrap() < 0.0);
        let floor: Value = serde_json::from_str(&system.body_json("floor").unwrap()).unwrap();
        assert_eq!(floor["mass"], Value::Null);

        assert_eq!(system.get_tick_stats().collisions(), 1);
    }

    #[test]
    fn collision_system_update_and_remove() {
        let mut system = CollisionSystem::new();
        system.add_circle("a", 0.0, 0.0, 1.0, None, None).unwrap();
        system.add_point("p", 0.5, 0.0, Some(0.5), None, None).unwrap();
        assert_eq!(system.pair_count(), 1);

        assert!(system.update_body_json("a", r#"{"collisionEnabled":false}"#).unwrap());
        assert_eq!(system.pair_count(), 0);
        assert!(!system.update_body_json("ghost", "{}").unwrap());

        assert!(system.remove_body("p"));
        assert!(!system.remove_body("p"));
        system.clear();
        assert_eq!(system.body_count(), 0);
    }

    #[test]
    fn typed_adders_take_mass_and_static() {
        let mut system = CollisionSystem::new();
        system.add_circle("post", 0.0, 0.0, 1.0, None, Some(true)).unwrap();
        system.add_rectangle("crate", 10.0, 0.0, 2.0, 2.0, Some(3.0), None).unwrap();
        system
            .add_polygon("tri", 20.0, 0.0, r#"[{"x":-1,"y":-1},{"x":1,"y":-1},{"x":0,"y":1}]"#, Some(2.0), None)
            .unwrap();
        system.add_point("cursor", 30.0, 0.0, None, None, Some(true)).unwrap();
        assert_eq!(system.body_count(), 4);

        let post: Value = serde_json::from_str(&system.body_json("post").unwrap()).unwrap();
        assert_eq!(post["isStatic"], true);
        assert_eq!(post["mass"], Value::Null);

        let crate_body: Value = serde_json::from_str(&system.body_json("crate").unwrap()).unwrap();
        assert_eq!(crate_body["mass"], 3.0);
        assert_eq!(crate_body["isStatic"], false);

        let tri: Value = serde_json::from_str(&system.body_json("tri").unwrap()).unwrap();
        assert_eq!(tri["shape"]["type"], "polygon");
        assert_eq!(tri["shape"]["vertices"].as_array().unwrap().len(), 3);
        assert_eq!(tri["mass"], 2.0);

        // post and cursor are both static: every other pairing is active
        assert_eq!(system.pair_count(), 5);
    }

    #[test]
    fn boundary_walls_and_step() {
        let mut system = CollisionSystem::new();
        system.set_gravity(0.0, 100.0);
        system.add_boundary_walls(0.0, 0.0, 200.0, 100.0, 10.0).unwrap();
        system.add_circle("ball", 100.0, 50.0, 5.0, Some(2.0), None).unwrap();
        for _ in 0..240 {
            system.step_json(1.0 / 60.0);
        }
        let ball: Value = serde_json::from_str(&system.body_json("ball").unwrap()).unwrap();
        let y = ball["position"]["y"].as_f64().unwrap();
        assert!(y < 105.0, "ball fell through the floor: {}", y);
        assert!(system.body_json("missing").is_none());
    }
}
