//! Loading a target file as an ordered sequence of lines.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TransformError;

/// A source file held in memory as terminator-inclusive lines.
///
/// Joining [`SourceFile::lines`] reproduces the file byte for byte. Only the
/// final line may lack a terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl SourceFile {
    /// Reads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NotFound`] when the path does not exist and
    /// [`TransformError::Io`] for any other read failure, including content
    /// that is not valid UTF-8.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, TransformError> {
        let target: PathBuf = path.into();
        let text =
            fs::read_to_string(&target).map_err(|err| TransformError::read(&target, err))?;
        let source = Self::from_text(target, &text);
        debug!(
            path = %source.path.display(),
            lines = source.lines.len(),
            "loaded source file"
        );
        Ok(source)
    }

    /// Builds a source file from text that is already in memory.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: split_lines(text),
        }
    }

    /// Returns the path the file was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the lines, each including its terminator.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

/// Splits text into lines, keeping `\n` and `\r\n` terminators attached.
#[must_use]
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Returns the terminator a line ends with, if any.
pub(crate) fn line_terminator(line: &str) -> Option<&'static str> {
    if line.ends_with("\r\n") {
        Some("\r\n")
    } else if line.ends_with('\n') {
        Some("\n")
    } else {
        None
    }
}
