use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigurationError;

use super::config::{SpringConfig, SpringConfigPatch};
use super::integrator::{Spring, SpringTarget};

/// Named-field vector, e.g. `{"x": 1.0, "y": 2.0, "scale": 1.0}`
pub type AxisValues = BTreeMap<String, f64>;

/// Per-axis target, start and velocity; axes absent from `to` are untouched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTarget {
    pub to: AxisValues,
    #[serde(default)]
    pub from: Option<AxisValues>,
    #[serde(default)]
    pub velocity: Option<AxisValues>,
}

/// One [`Spring`] per axis, all sharing a config
///
/// The axis set is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiAxisSpring {
    config: SpringConfig,
    axes: BTreeMap<String, Spring>,
}

impl MultiAxisSpring {
    pub fn new<I, K>(initial: I, config: SpringConfig) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        config.validate()?;
        let mut axes = BTreeMap::new();
        for (key, value) in initial {
            axes.insert(key.into(), Spring::starting_at(value, config)?);
        }
        Ok(Self { config, axes })
    }

    pub fn with_timestep(mut self, dt: f64) -> Self {
        self.set_timestep(dt);
        self
    }

    /// Apply the same fixed step to every axis
    pub fn set_timestep(&mut self, dt: f64) {
        for spring in self.axes.values_mut() {
            spring.set_timestep(dt);
        }
    }

    pub fn set_target(&mut self, target: &MultiTarget) {
        for (key, &to) in target.to.iter() {
            let Some(spring) = self.axes.get_mut(key) else {
                debug_warn!("multi-axis spring has no axis '{}', ignoring target", key);
                continue;
            };
            let options = SpringTarget {
                from: target.from.as_ref().and_then(|from| from.get(key).copied()),
                velocity: target.velocity.as_ref().and_then(|v| v.get(key).copied()),
            };
            spring.set_target(to, options);
        }
    }

    /// Step every axis once and return the merged positions
    pub fn update(&mut self) -> AxisValues {
        for spring in self.axes.values_mut() {
            spring.update();
        }
        self.values()
    }

    /// Reseed every axis at rest, at the supplied value or where it already is
    pub fn reset(&mut self, values: Option<&AxisValues>) {
        if let Some(values) = values {
            for key in values.keys().filter(|key| !self.axes.contains_key(*key)) {
                debug_warn!("multi-axis spring has no axis '{}', ignoring reset value", key);
            }
        }

        for (key, spring) in self.axes.iter_mut() {
            let position = values
                .and_then(|values| values.get(key).copied())
                .unwrap_or_else(|| spring.position());
            spring.reset(position, 0.0);
        }
    }

    /// Merge a patch and broadcast the result to every axis
    pub fn update_config(&mut self, patch: &SpringConfigPatch) -> Result<(), ConfigurationError> {
        let config = self.config.merged(patch)?;
        for spring in self.axes.values_mut() {
            spring.replace_config(config);
        }
        self.config = config;
        Ok(())
    }

    /// True only when every axis is at rest
    pub fn is_at_rest(&self) -> bool {
        self.axes.values().all(Spring::is_at_rest)
    }

    pub fn values(&self) -> AxisValues {
        self.axes.iter().map(|(key, spring)| (key.clone(), spring.position())).collect()
    }

    pub fn velocities(&self) -> AxisValues {
        self.axes.iter().map(|(key, spring)| (key.clone(), spring.velocity())).collect()
    }

    pub fn axis(&self, key: &str) -> Option<&Spring> {
        self.axes.get(key)
    }

    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, f64)]) -> AxisValues {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    fn xy() -> MultiAxisSpring {
        MultiAxisSpring::new([("x", 0.0), ("y", 0.0)], SpringConfig::default()).unwrap()
    }

    #[test]
    fn starts_at_rest_on_initial_values() {
        let spring = MultiAxisSpring::new([("x", 3.0), ("scale", 1.0)], SpringConfig::default()).unwrap();
        assert!(spring.is_at_rest());
        assert_eq!(spring.values(), values(&[("scale", 1.0), ("x", 3.0)]));
        assert_eq!(spring.axis_names().collect::<Vec<_>>(), vec!["scale", "x"]);
    }

    #[test]
    fn absent_axes_are_left_alone() {
        let mut spring = xy();
        spring.set_target(&MultiTarget { to: values(&[("x", 10.0)]), ..Default::default() });

        let merged = spring.update();
        assert!(merged["x"] > 0.0);
        assert_eq!(merged["y"], 0.0);
        assert!(spring.axis("y").unwrap().is_at_rest());
    }

    #[test]
    fn unknown_axes_do_not_create_springs() {
        let mut spring = xy();
        spring.set_target(&MultiTarget { to: values(&[("z", 5.0)]), ..Default::default() });
        assert!(spring.axis("z").is_none());
        assert!(spring.is_at_rest());
    }

    #[test]
    fn rest_requires_every_axis() {
        let config = SpringConfig::new(100.0, 40.0, 1.0).unwrap();
        let mut spring = MultiAxisSpring::new([("x", 0.0), ("y", 0.0)], config).unwrap();
        spring.set_target(&MultiTarget { to: values(&[("x", 1.0), ("y", 50.0)]), ..Default::default() });

        let mut saw_partial_rest = false;
        for _ in 0..1000 {
            spring.update();
            let x = spring.axis("x").unwrap().is_at_rest();
            let y = spring.axis("y").unwrap().is_at_rest();
            assert_eq!(spring.is_at_rest(), x && y);
            if x && !y {
                saw_partial_rest = true;
            }
            if spring.is_at_rest() {
                break;
            }
        }
        assert!(saw_partial_rest);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn from_and_velocity_are_forwarded_per_axis() {
        let mut spring = xy();
        spring.set_target(&MultiTarget {
            to: values(&[("x", 1.0), ("y", 1.0)]),
            from: Some(values(&[("x", -4.0)])),
            velocity: Some(values(&[("y", 2.0)])),
        });
        assert_eq!(spring.axis("x").unwrap().position(), -4.0);
        assert_eq!(spring.axis("x").unwrap().velocity(), 0.0);
        assert_eq!(spring.axis("y").unwrap().position(), 0.0);
        assert_eq!(spring.axis("y").unwrap().velocity(), 2.0);
    }

    #[test]
    fn reset_uses_supplied_or_current_values() {
        let mut spring = xy();
        spring.set_target(&MultiTarget { to: values(&[("x", 10.0), ("y", 10.0)]), ..Default::default() });
        spring.update();
        let y_now = spring.axis("y").unwrap().position();

        spring.reset(Some(&values(&[("x", 7.0)])));
        assert!(spring.is_at_rest());
        assert_eq!(spring.values(), values(&[("x", 7.0), ("y", y_now)]));
        assert_eq!(spring.velocities(), values(&[("x", 0.0), ("y", 0.0)]));
    }

    #[test]
    fn update_config_broadcasts() {
        let mut spring = xy();
        let patch = SpringConfigPatch { tension: Some(400.0), ..Default::default() };
        spring.update_config(&patch).unwrap();
        assert_eq!(spring.config().tension, 400.0);
        assert!(spring.axis_names().all(|key| spring.axis(key).unwrap().config().tension == 400.0));

        let bad = SpringConfigPatch { mass: Some(-1.0), ..Default::default() };
        assert!(spring.update_config(&bad).is_err());
        assert_eq!(spring.axis("x").unwrap().config().mass, 1.0);
    }

    #[test]
    fn multi_target_json() {
        let target: MultiTarget = serde_json::from_str(r#"{"to":{"x":1,"opacity":0.5},"from":{"x":0}}"#).unwrap();
        assert_eq!(target.to["opacity"], 0.5);
        assert_eq!(target.from.unwrap()["x"], 0.0);
        assert!(target.velocity.is_none());
    }
}
