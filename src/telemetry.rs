//! Structured logging setup.
//!
//! The crate emits `tracing` events at service boundaries. Binaries and test
//! harnesses call [`init_tracing`] once to route them to stderr.

use std::io;
use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static ACTIVE_FILTER: OnceLock<String> = OnceLock::new();

/// Errors raised while installing the subscriber.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TelemetryError {
    /// The filter directives do not parse.
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter {
        /// Rejected directives.
        filter: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A subscriber was already installed with different directives.
    #[error("tracing already initialised with filter `{active}`")]
    AlreadyInitialised {
        /// Directives of the installed subscriber.
        active: String,
    },

    /// Another global subscriber owns the dispatcher.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs a stderr `fmt` subscriber filtered by `filter`.
///
/// Repeating the call with the same directives is a no-op.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for malformed directives,
/// [`TelemetryError::AlreadyInitialised`] when a different filter is already
/// active, and [`TelemetryError::Install`] when some other subscriber was set
/// globally.
pub fn init_tracing(filter: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|err| TelemetryError::InvalidFilter {
        filter: filter.to_owned(),
        reason: err.to_string(),
    })?;

    if let Some(active) = ACTIVE_FILTER.get() {
        if active == filter {
            return Ok(());
        }
        return Err(TelemetryError::AlreadyInitialised {
            active: active.clone(),
        });
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))?;

    let active = ACTIVE_FILTER.get_or_init(|| filter.to_owned());
    tracing::debug!(filter = %active, "tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{TelemetryError, init_tracing};

    #[test]
    fn malformed_filter_is_rejected() {
        let result = init_tracing("orbit=loudest");
        assert!(matches!(result, Err(TelemetryError::InvalidFilter { .. })));
    }

    #[test]
    fn initialisation_is_idempotent_per_filter() {
        assert_eq!(init_tracing("orbit=debug"), Ok(()));
        assert_eq!(init_tracing("orbit=debug"), Ok(()));
        assert_eq!(
            init_tracing("orbit=warn"),
            Err(TelemetryError::AlreadyInitialised {
                active: "orbit=debug".to_owned(),
            })
        );
    }
}
