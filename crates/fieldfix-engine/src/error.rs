//! Error types for source transformation operations.
//!
//! Every failure aborts the whole run, so the variants describe where the
//! run stopped rather than how to recover.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    /// Reading the target file.
    Read,
    /// Writing the transformed text back.
    Write,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Errors from loading, transforming, or writing a source file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The target path did not exist at load time.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A read or write failed at the filesystem boundary.
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Whether the failure happened while reading or writing.
        operation: IoOperation,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A rewrite pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// The pattern text as configured.
        pattern: String,
        /// The compilation error.
        #[source]
        source: regex::Error,
    },

    /// A rule was structurally invalid (for example an empty anchor).
    #[error("invalid rule: {message}")]
    InvalidRule {
        /// Description of the problem.
        message: String,
    },

    /// A rewrite rule matched nothing while matches were required.
    #[error("rewrite rule `{pattern}` matched nothing")]
    UnmatchedRule {
        /// The pattern of the first rule without a match.
        pattern: String,
    },
}

impl TransformError {
    /// Classifies a read failure, mapping a missing file to [`Self::NotFound`].
    #[must_use]
    pub fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound {
                path: path.to_path_buf(),
            };
        }
        Self::Io {
            path: path.to_path_buf(),
            operation: IoOperation::Read,
            source,
        }
    }

    /// Creates a write error.
    #[must_use]
    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            operation: IoOperation::Write,
            source,
        }
    }

    /// Creates a pattern compilation error.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid rule error.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::InvalidRule {
            message: message.into(),
        }
    }

    /// Creates an unmatched rule error.
    #[must_use]
    pub fn unmatched_rule(pattern: impl Into<String>) -> Self {
        Self::UnmatchedRule {
            pattern: pattern.into(),
        }
    }
}
