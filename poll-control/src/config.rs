//! Configuration types for the poll controller
//!
//! Defines the settings applied when a [`crate::PollController`] is built:
//! the interval handed to the driver at startup and the intensity used when
//! `enable_poll` is called without one.

use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_POLL_INTENSITY;
use crate::error::{PollError, Result};

/// Environment variable overriding `initial_interval_ms`
pub const ENV_POLL_INTERVAL: &str = "ZWAVE_POLL_INTERVAL_MS";

/// Environment variable overriding `default_intensity`
pub const ENV_POLL_INTENSITY: &str = "ZWAVE_POLL_INTENSITY";

/// Configuration for the PollController
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Interval pushed to the driver once, when the controller is built.
    /// `None` leaves whatever interval the driver already has.
    /// Default: 30 seconds
    pub initial_interval_ms: Option<u32>,

    /// Intensity used by `enable_poll` when the caller gives none
    /// Default: 1
    pub default_intensity: u8,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: Some(30_000),
            default_intensity: DEFAULT_POLL_INTENSITY,
        }
    }
}

impl PollConfig {
    /// Create a new PollConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Short interval for small networks with few polled values
    pub fn fast_polling() -> Self {
        Self {
            initial_interval_ms: Some(5_000),
            ..Default::default()
        }
    }

    /// Leaves the driver's interval untouched
    pub fn quiet() -> Self {
        Self {
            initial_interval_ms: None,
            ..Default::default()
        }
    }

    /// Defaults overridden by `ZWAVE_POLL_INTERVAL_MS` and `ZWAVE_POLL_INTENSITY`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the two variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_POLL_INTERVAL) {
            let interval = raw.trim().parse::<u32>().map_err(|_| PollError::InvalidEnv {
                var: ENV_POLL_INTERVAL,
                value: raw.clone(),
            })?;
            config.initial_interval_ms = Some(interval);
        }

        if let Some(raw) = lookup(ENV_POLL_INTENSITY) {
            config.default_intensity =
                raw.trim().parse::<u8>().map_err(|_| PollError::InvalidEnv {
                    var: ENV_POLL_INTENSITY,
                    value: raw.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any issues
    ///
    /// The interval is not checked; the driver decides what a 0 or tiny
    /// interval means.
    pub fn validate(&self) -> Result<()> {
        if self.default_intensity == 0 {
            return Err(PollError::InvalidConfig(
                "Default intensity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.initial_interval_ms, Some(30_000));
        assert_eq!(config.default_intensity, DEFAULT_POLL_INTENSITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(PollConfig::fast_polling().initial_interval_ms, Some(5_000));
        assert_eq!(PollConfig::quiet().initial_interval_ms, None);
        assert!(PollConfig::fast_polling().validate().is_ok());
        assert!(PollConfig::quiet().validate().is_ok());
    }

    #[test]
    fn test_zero_intensity_rejected() {
        let config = PollConfig {
            default_intensity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PollError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_interval_accepted() {
        let config = PollConfig {
            initial_interval_ms: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = PollConfig::from_lookup(lookup(&[
            (ENV_POLL_INTERVAL, "1500"),
            (ENV_POLL_INTENSITY, " 3 "),
        ]))
        .unwrap();
        assert_eq!(config.initial_interval_ms, Some(1500));
        assert_eq!(config.default_intensity, 3);
    }

    #[test]
    fn test_from_lookup_empty_is_default() {
        let config = PollConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PollConfig::default());
    }

    #[test]
    fn test_from_lookup_bad_interval() {
        let err = PollConfig::from_lookup(lookup(&[(ENV_POLL_INTERVAL, "soon")])).unwrap_err();
        assert_eq!(
            err,
            PollError::InvalidEnv {
                var: ENV_POLL_INTERVAL,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_from_lookup_intensity_out_of_range() {
        let err = PollConfig::from_lookup(lookup(&[(ENV_POLL_INTENSITY, "300")])).unwrap_err();
        assert!(matches!(err, PollError::InvalidEnv { var: ENV_POLL_INTENSITY, .. }));
    }

    #[test]
    fn test_from_lookup_zero_intensity_fails_validation() {
        let err = PollConfig::from_lookup(lookup(&[(ENV_POLL_INTENSITY, "0")])).unwrap_err();
        assert!(matches!(err, PollError::InvalidConfig(_)));
    }
}
