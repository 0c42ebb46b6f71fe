use thiserror::Error;

/// Rejected configuration, caught when a spring or body is built or patched.
///
/// Per-tick numerics never produce this; they degrade to zero vectors instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("spring tension must be > 0 (got {0})")]
    NonPositiveTension(f64),
    #[error("spring friction must be >= 0 (got {0})")]
    NegativeFriction(f64),
    #[error("mass must be > 0 (got {0})")]
    NonPositiveMass(f64),
    #[error("rest threshold must be > 0 (got {0})")]
    NonPositiveRestThreshold(f64),
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("{field} must be >= 0 (got {value})")]
    NegativeDimension { field: &'static str, value: f64 },
    #[error("polygon needs at least 3 vertices (got {0})")]
    DegeneratePolygon(usize),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}

/// Fails with [`ConfigurationError::NonFinite`] when `value` is NaN or infinite.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ConfigurationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigurationError::NonPositiveTension(-3.0);
        assert_eq!(err.to_string(), "spring tension must be > 0 (got -3)");

        let err = ConfigurationError::NonFinite { field: "position.x", value: f64::NAN };
        assert!(err.to_string().starts_with("position.x must be finite"));
    }

    #[test]
    fn ensure_finite_passes_through_finite_values() {
        assert_eq!(ensure_finite("x", 2.5), Ok(2.5));
        assert!(ensure_finite("x", f64::INFINITY).is_err());
    }
}
