//! Domain - constant tables callers choose from by name

pub mod presets;

pub use presets::{material, SpringPreset, MATERIALS};
