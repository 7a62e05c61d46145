//! Diagnostics for a single `fieldfix` run.
//!
//! Everything goes to stderr so stdout stays reserved for `--dry-run` text.
//! Compact output is meant for a person at a terminal and carries no
//! timestamps or targets. JSON output keeps both for log collectors.

use std::io::{self, IsTerminal};

use fieldfix_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::UtcTime;

static SUBSCRIBER_INSTALLED: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Validates the logging configuration and installs the global subscriber.
///
/// The filter is checked on every call. The subscriber is process-global,
/// and `crate::run` can execute many times in one process (the CLI's own
/// tests do), so only the first call installs one and later calls keep it.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter expression and
/// [`TelemetryError::Subscriber`] when a foreign subscriber is already
/// installed.
pub fn initialise(config: &Config) -> Result<(), TelemetryError> {
    let filter = parse_filter(config.log_filter())?;
    SUBSCRIBER_INSTALLED
        .get_or_try_init(|| install_subscriber(filter, config.log_format()))
        .map(|_| ())
}

fn parse_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter(error.to_string()))
}

fn install_subscriber(filter: EnvFilter, format: LogFormat) -> Result<(), TelemetryError> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match format {
        LogFormat::Json => Box::new(
            builder
                .with_target(true)
                .with_timer(UtcTime::rfc_3339())
                .json()
                .flatten_event(true)
                .finish(),
        ),
        LogFormat::Compact => Box::new(builder.with_target(false).without_time().compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}
