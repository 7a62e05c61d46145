//! Errors raised while resolving a rule set.

use std::io;

use camino::Utf8PathBuf;
use fieldfix_engine::TransformError;
use thiserror::Error;

/// Errors from loading or validating a rule set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuleSetError {
    /// The rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    Read {
        /// Path of the rule file.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The rule file is not a valid YAML rule set.
    #[error("failed to parse rule file {path}: {message}")]
    Parse {
        /// Path of the rule file.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// No built-in preset has the requested name.
    #[error("unknown preset: {name}")]
    UnknownPreset {
        /// The requested name.
        name: String,
    },

    /// A rule in the set failed to compile or validate.
    #[error("invalid rule #{index} in {section}: {source}")]
    Invalid {
        /// Which list the rule belongs to (`anchors` or `rewrites`).
        section: &'static str,
        /// One-based position within the list.
        index: usize,
        /// The engine's validation error.
        #[source]
        source: TransformError,
    },
}

impl RuleSetError {
    /// Creates a read error.
    #[must_use]
    pub fn read(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(path: impl Into<Utf8PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an unknown preset error.
    #[must_use]
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }
}
