//! Dispatcher configuration.
//!
//! # Environment Variables
//!
//! | Variable           | Required | Default     | Description                          |
//! |--------------------|----------|-------------|--------------------------------------|
//! | `TRACKING_FAN_OUT` | No       | `fail-fast` | `fail-fast` or `isolate`             |

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

const FAN_OUT_VAR: &str = "TRACKING_FAN_OUT";

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid format for {var}: {message}")]
    InvalidFormat { var: String, message: String },
}

/// What the dispatcher does when a tracker fails mid fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FanOutPolicy {
    /// Stop at the first failing tracker and return its error.
    #[default]
    FailFast,
    /// Call every capable tracker, then report all failures together.
    Isolate,
}

impl FromStr for FanOutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" => Ok(FanOutPolicy::FailFast),
            "isolate" => Ok(FanOutPolicy::Isolate),
            other => Err(format!("expected 'fail-fast' or 'isolate', got '{other}'")),
        }
    }
}

/// Configuration of a [`TrackingManager`](crate::TrackingManager).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TrackingConfig {
    pub fan_out: FanOutPolicy,
}

impl TrackingConfig {
    /// Parse configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fan_out = match env::var(FAN_OUT_VAR) {
            Ok(value) if !value.trim().is_empty() => {
                value
                    .parse()
                    .map_err(|message| ConfigError::InvalidFormat {
                        var: FAN_OUT_VAR.to_string(),
                        message,
                    })?
            }
            Ok(_) | Err(env::VarError::NotPresent) => FanOutPolicy::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidFormat {
                    var: FAN_OUT_VAR.to_string(),
                    message: "contains invalid unicode".to_string(),
                })
            }
        };

        Ok(Self { fan_out })
    }

    pub fn with_fan_out(mut self, fan_out: FanOutPolicy) -> Self {
        self.fan_out = fan_out;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fail_fast() {
        assert_eq!(TrackingConfig::default().fan_out, FanOutPolicy::FailFast);
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Isolate".parse(), Ok(FanOutPolicy::Isolate));
        assert_eq!(" fail-fast ".parse(), Ok(FanOutPolicy::FailFast));
        assert!("retry".parse::<FanOutPolicy>().is_err());
    }

    #[test]
    fn from_env_reads_fan_out() {
        env::set_var(FAN_OUT_VAR, "isolate");
        let config = TrackingConfig::from_env();
        env::set_var(FAN_OUT_VAR, "sometimes");
        let invalid = TrackingConfig::from_env();
        env::remove_var(FAN_OUT_VAR);

        assert_eq!(config.map(|c| c.fan_out), Ok(FanOutPolicy::Isolate));
        assert!(matches!(invalid, Err(ConfigError::InvalidFormat { .. })));
        assert_eq!(TrackingConfig::from_env(), Ok(TrackingConfig::default()));
    }
}
