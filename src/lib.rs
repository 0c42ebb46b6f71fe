//! Motion Engine - spring and collision physics for UI motion, in WASM
//!
//! Architecture:
//! - core/       - Error type, diagnostics macros
//! - domain/     - Spring and material presets
//! - systems/    - Vector math, springs, bodies, collision
//! - simulation/ - JS-facing handles

// Diagnostics macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

// Short paths for the systems
pub use systems::collision;
pub use systems::rigid_body;
pub use systems::spring;

use wasm_bindgen::prelude::*;

pub use crate::core::ConfigurationError;
pub use collision::{CollisionResult, CollisionWorld, Contact, TickStats};
pub use domain::SpringPreset;
pub use rigid_body::{boundary_walls, BodyId, BodyPatch, CollisionBody, Material, Shape, Vector2};
pub use simulation::{CollisionSystem, MultiSpringHandle, SpringHandle};
pub use spring::{MultiAxisSpring, MultiTarget, Spring, SpringConfig, SpringConfigPatch, SpringState, SpringTarget};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log!("motion-engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names accepted by `new SpringHandle(name)`, as a JSON array
#[wasm_bindgen]
pub fn spring_preset_names() -> String {
    let names: Vec<&str> = SpringPreset::ALL.iter().map(|p| p.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
