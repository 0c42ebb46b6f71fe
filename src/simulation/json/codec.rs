use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;

use crate::core::error::ConfigurationError;

/// Parse a JSON payload coming from JS
pub(super) fn parse<T: DeserializeOwned>(json: &str) -> Result<T, ConfigurationError> {
    serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidJson(e.to_string()))
}

/// Serialize a value for JS; engine types always serialize, so failure only logs
pub(super) fn render<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        console_log!("motion-engine: failed to serialize result: {}", e);
        "null".to_string()
    })
}

/// Error surface of every fallible facade call
pub(super) fn to_js(err: ConfigurationError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
