//! Project version lookup.
//!
//! The version string defaults the tag of images built from this project.
//! It is read once by the caller and handed to the stack builders, which
//! never touch the filesystem themselves.

use std::path::Path;

use crate::error::{ComposeGenError, Result};

/// Reads the project version from `path`, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds only whitespace.
pub fn read_version(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|source| ComposeGenError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let version = raw.trim();
    if version.is_empty() {
        return Err(ComposeGenError::validation(
            "version",
            format!("version file {} is empty", path.display()),
        ));
    }
    tracing::debug!(version, path = %path.display(), "read project version");
    Ok(version.to_owned())
}
