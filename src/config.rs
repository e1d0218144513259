//! Runtime configuration for the workspace core.
//!
//! Every section has a sensible `Default`, so a partial JSON document only
//! needs to name the values it overrides.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Weekly capacity assumed for users who declare none.
pub const DEFAULT_CAPACITY_PER_WEEK: u32 = 30;

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use orbit::config::OrbitConfig;
///
/// let config = OrbitConfig::default();
/// assert!(config.board.transition_timeout().is_none());
///
/// let strict = OrbitConfig::strict();
/// assert!(strict.board.transition_timeout().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Task board behaviour.
    pub board: BoardConfig,
    /// Workload calculation settings.
    pub workload: WorkloadConfig,
    /// `tracing-subscriber` filter directives.
    pub log_filter: String,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            workload: WorkloadConfig::default(),
            log_filter: "orbit=info".to_owned(),
        }
    }
}

impl OrbitConfig {
    /// Creates a configuration that logs every board step.
    ///
    /// Useful when diagnosing rollbacks.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            log_filter: "orbit=debug".to_owned(),
            ..Self::default()
        }
    }

    /// Creates a configuration that bounds remote writes to five seconds.
    ///
    /// Useful against a backend that may hang instead of failing.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            board: BoardConfig::bounded(Duration::from_secs(5)),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the relevant
    /// validation error for out-of-range values.
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)
            .map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroEventCapacity`] or
    /// [`ConfigError::ZeroDefaultCapacity`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.board.event_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        if self.workload.default_capacity == 0 {
            return Err(ConfigError::ZeroDefaultCapacity);
        }
        Ok(())
    }
}

/// Task board settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Upper bound for a remote status write, in milliseconds. `None` waits
    /// indefinitely.
    pub transition_timeout_ms: Option<u64>,
    /// Buffered board events per subscriber before the oldest are dropped.
    pub event_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            transition_timeout_ms: None,
            event_capacity: 64,
        }
    }
}

impl BoardConfig {
    /// Creates a configuration that bounds remote writes by `timeout`.
    #[must_use]
    pub fn bounded(timeout: Duration) -> Self {
        Self {
            transition_timeout_ms: Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)),
            ..Self::default()
        }
    }

    /// Returns the remote write deadline, if any.
    #[must_use]
    pub fn transition_timeout(&self) -> Option<Duration> {
        self.transition_timeout_ms.map(Duration::from_millis)
    }
}

/// Workload calculation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Capacity in story points for users without a declared capacity.
    pub default_capacity: u32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY_PER_WEEK,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid configuration document: {0}")]
    Parse(String),

    /// The board event channel would have no room.
    #[error("board.event_capacity must be at least 1")]
    ZeroEventCapacity,

    /// The default workload capacity would divide by zero.
    #[error("workload.default_capacity must be at least 1")]
    ZeroDefaultCapacity,
}
