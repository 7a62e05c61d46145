//! Atomic replacement of the target file.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::debug;

use crate::error::TransformError;

/// Replaces the contents of `path` with `contents` using an atomic persist
/// step.
///
/// Symlinks are resolved first so the file they point at is replaced and the
/// link itself survives. The text is written to a temporary file beside the
/// resolved file, synced, given the original file's permissions, and renamed
/// over it. The temporary file is removed on every failure path, so the
/// target is either fully replaced or left as it was.
///
/// # Errors
///
/// Returns [`TransformError::Io`] when any step fails. Errors name `path` as
/// given, not the resolved location.
pub fn atomic_write(path: &Path, contents: &str) -> Result<(), TransformError> {
    let resolved = fs::canonicalize(path).map_err(|err| TransformError::write(path, err))?;
    let directory = resolved.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&resolved)
        .map_err(|err| TransformError::write(path, err))?
        .permissions();
    let prefix = format!(
        ".{}.",
        resolved
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("fieldfix")
    );

    let mut builder = Builder::new();
    builder.prefix(&prefix).suffix(".tmp");

    let mut file = builder
        .tempfile_in(directory)
        .map_err(|err| TransformError::write(path, err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| TransformError::write(path, err))?;
    file.as_file()
        .set_permissions(permissions)
        .map_err(|err| TransformError::write(path, err))?;
    file.as_file()
        .sync_all()
        .map_err(|err| TransformError::write(path, err))?;
    file.persist(&resolved)
        .map_err(|err| TransformError::write(path, err.error))?;

    debug!(
        path = %path.display(),
        resolved = %resolved.display(),
        bytes = contents.len(),
        "replaced target file"
    );
    Ok(())
}
