//! Error types for the CLI runtime.

use std::io;

use fieldfix_config::RuleSetError;
use fieldfix_engine::TransformError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to configure telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to load rules: {0}")]
    Rules(#[from] RuleSetError),
    #[error("{0}")]
    Transform(#[from] TransformError),
    #[error("failed to emit transformed text: {0}")]
    EmitOutput(io::Error),
}
