//! Runtime configuration for the todo core.
//!
//! # Responsibility
//! - Hold the knobs front-ends may set: id policy and log level.
//! - Parse them from environment variables with explicit errors.
//!
//! # Invariants
//! - Defaults never require the environment to be set.
//! - Unknown values are rejected, never silently mapped to a default.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Environment variable selecting the id policy.
pub const ENV_ID_POLICY: &str = "LAZYTODO_ID_POLICY";
/// Environment variable selecting the log level.
pub const ENV_LOG_LEVEL: &str = "LAZYTODO_LOG_LEVEL";

/// How the store assigns ids to new tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// Counter starting at 1, never reused after removals.
    #[default]
    Monotonic,
    /// `count(active) + 1` at call time. Can repeat an id after a removal.
    ActiveCountPlusOne,
}

impl IdPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monotonic => "monotonic",
            Self::ActiveCountPlusOne => "active-count",
        }
    }
}

impl Display for IdPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "active-count" | "active_count" => Ok(Self::ActiveCountPlusOne),
            other => Err(ConfigError::UnsupportedIdPolicy(other.to_string())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedIdPolicy(String),
    UnsupportedLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedIdPolicy(value) => write!(
                f,
                "unsupported id policy `{value}`; expected monotonic|active-count"
            ),
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved configuration shared by FFI and CLI front-ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    pub id_policy: IdPolicy,
    /// Normalized level name (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl TodoConfig {
    /// Reads `LAZYTODO_ID_POLICY` and `LAZYTODO_LOG_LEVEL` over defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`TodoConfig::from_env`] with an injectable variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_ID_POLICY).filter(|value| !value.trim().is_empty()) {
            config.id_policy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            config.set_log_level(&raw)?;
        }

        Ok(config)
    }

    /// Overrides the log level, e.g. from a command-line flag.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = normalize_level(level)
            .map_err(|_| ConfigError::UnsupportedLogLevel(level.trim().to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, IdPolicy, TodoConfig, ENV_ID_POLICY, ENV_LOG_LEVEL};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = TodoConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, TodoConfig::default());
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
    }

    #[test]
    fn environment_overrides_policy_and_level() {
        let config = TodoConfig::from_lookup(lookup_from(&[
            (ENV_ID_POLICY, " Active-Count "),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(config.id_policy, IdPolicy::ActiveCountPlusOne);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn unknown_values_are_rejected() {
        let err = TodoConfig::from_lookup(lookup_from(&[(ENV_ID_POLICY, "random")])).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedIdPolicy("random".to_string()));

        let err = TodoConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "verbose")])).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedLogLevel("verbose".to_string()));
    }

    #[test]
    fn id_policy_display_round_trips_through_parse() {
        for policy in [IdPolicy::Monotonic, IdPolicy::ActiveCountPlusOne] {
            assert_eq!(policy.to_string().parse::<IdPolicy>().unwrap(), policy);
        }
    }
}
