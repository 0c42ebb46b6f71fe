//! Simulation - wasm-bindgen handles over the spring and collision systems
//!
//! Each handle owns its system outright; JS keeps the handle alive and
//! drives it once per animation frame. Structured data crosses the
//! boundary as JSON strings, errors as `JsValue` strings.

#[path = "json/codec.rs"]
mod codec;
mod facade;

pub use facade::{CollisionSystem, MultiSpringHandle, SpringHandle};
