use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AuditError, Result};

/// First match for `name` in `search_path`, in order.
pub fn find_executable(name: &str, search_path: &[PathBuf]) -> Result<PathBuf> {
    search_path
        .iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(|| AuditError::NotFound {
            executable: name.to_string(),
        })
}

/// Regular file (after following links) with an execute bit set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// Canonical path of `path`, or `path` itself if it cannot be resolved.
pub fn resolve_symlinks(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(real) => real,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Keeping unresolved path");
            path.to_path_buf()
        }
    }
}
