//! Executes cleaning for a batch of cleanable items.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::CleanFailure;
use crate::provider::{CleanResult, CleanableItem};
use crate::runner::CommandRunner;

/// Clean `items` sequentially, in order.
///
/// Command items run their native cleanup; path items are removed
/// recursively. An item whose path is already gone counts as clean and
/// contributes nothing. A failure is recorded and the loop moves on.
pub fn clean_items(runner: &dyn CommandRunner, items: &[CleanableItem]) -> CleanResult {
    let mut result = CleanResult::default();

    for item in items {
        if fs::symlink_metadata(&item.path).is_err() {
            tracing::debug!(path = %item.path.display(), "Already clean");
            continue;
        }

        let outcome = match &item.command {
            Some(command) => command.execute(runner),
            None => remove_path(&item.path).map_err(|e| e.to_string()),
        };

        match outcome {
            Ok(()) => {
                tracing::info!(item = %item.description, bytes = item.size_bytes, "Cleaned");
                result.record_success(item.size_bytes);
            }
            Err(message) => {
                tracing::warn!(item = %item.description, %message, "Clean failed");
                result.record_failure(CleanFailure {
                    description: item.description.clone(),
                    message,
                });
            }
        }
    }

    result
}

/// Remove a file or directory tree. Missing paths are fine.
fn remove_path(path: &Path) -> io::Result<()> {
    if !path.is_absolute() || path.parent().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to remove '{}'", path.display()),
        ));
    }

    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
