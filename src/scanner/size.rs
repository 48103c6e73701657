use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand a leading `~` (or `~/...`) against `home`.
///
/// Paths without the shorthand, or with no known home, come back unchanged.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

/// Total apparent size in bytes of every regular file under `path`.
///
/// A missing path is 0. Unreadable entries are skipped and the walk
/// continues. Directory symlinks are not followed, and hard-linked files
/// are counted once per link.
pub fn dir_size(path: &Path) -> u64 {
    if std::fs::symlink_metadata(path).is_err() {
        return 0;
    }

    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::trace!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Size of `path` after expanding a leading `~` to the user's home.
pub fn size(path: impl AsRef<Path>) -> u64 {
    let path = path.as_ref();
    match path.to_str() {
        Some(s) if s.starts_with('~') => {
            let home = dirs::home_dir();
            dir_size(&expand_home(s, home.as_deref()))
        }
        _ => dir_size(path),
    }
}
