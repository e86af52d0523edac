//! Filesystem utilities.
//!
//! Helper functions for file operations. Errors carry the offending path.

use std::path::{Path, PathBuf};

use crate::error::{Result, SkillError};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path).map_err(|err| SkillError::io_at(path, err))?;
    }
    Ok(())
}

/// Read a file to string, returning None if it doesn't exist.
pub fn read_optional(path: impl AsRef<Path>) -> Result<Option<String>> {
    let path = path.as_ref();
    if path.is_file() {
        std::fs::read_to_string(path)
            .map(Some)
            .map_err(|err| SkillError::io_at(path, err))
    } else {
        Ok(None)
    }
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_file(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|err| SkillError::io_at(path, err))
}

/// Expand a leading `~/` against the home directory.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Make `path` absolute relative to the current directory without touching
/// the filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|err| SkillError::io_at(path, err))
}
