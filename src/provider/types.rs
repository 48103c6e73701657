//! Value types produced by providers.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::CleanFailure;
use crate::runner::CleanCommand;

/// Where a toolchain came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstallSource {
    VersionManager,
    Homebrew,
    System,
    Manual,
    Unknown,
}

impl InstallSource {
    pub fn label(&self) -> &'static str {
        match self {
            InstallSource::VersionManager => "Version Manager",
            InstallSource::Homebrew => "Homebrew",
            InstallSource::System => "System",
            InstallSource::Manual => "Manual",
            InstallSource::Unknown => "Unknown",
        }
    }

    /// Health of an installation from this source.
    pub fn status(&self) -> Status {
        match self {
            InstallSource::VersionManager => Status::Good,
            InstallSource::Homebrew | InstallSource::Manual => Status::Warning,
            InstallSource::System | InstallSource::Unknown => Status::Bad,
        }
    }
}

impl fmt::Display for InstallSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How manageable an installation is; ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Status {
    Good,
    Warning,
    Bad,
}

impl Status {
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Good => "🟢",
            Status::Warning => "🟡",
            Status::Bad => "🔴",
        }
    }
}

/// One detected toolchain instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Installation {
    pub version: String,
    pub source: InstallSource,
    /// Path as found on the search path (may be a symlink).
    pub binary_path: PathBuf,
    /// Root directory of the owning version manager.
    pub manager_path: Option<PathBuf>,
    /// Specific manager, e.g. "nvm" or "pyenv".
    pub manager_name: Option<String>,
}

impl Installation {
    pub fn status(&self) -> Status {
        self.source.status()
    }

    /// Manager name if known, otherwise the source label.
    pub fn source_display(&self) -> &str {
        self.manager_name.as_deref().unwrap_or(self.source.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskUsageItem {
    pub path: PathBuf,
    pub description: String,
    pub size_bytes: u64,
}

/// Per-location breakdown; `total` is always the sum of the items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    items: Vec<DiskUsageItem>,
    total: u64,
}

impl DiskUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DiskUsageItem) {
        self.total += item.size_bytes;
        self.items.push(item);
    }

    pub fn items(&self) -> &[DiskUsageItem] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<DiskUsageItem> for DiskUsage {
    fn from_iter<I: IntoIterator<Item = DiskUsageItem>>(iter: I) -> Self {
        let mut usage = DiskUsage::new();
        for item in iter {
            usage.push(item);
        }
        usage
    }
}

/// A unit of reclaimable disk usage.
///
/// When `command` is set it drives cleaning and `path` is informational;
/// otherwise `path` is removed recursively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanableItem {
    pub path: PathBuf,
    pub description: String,
    pub size_bytes: u64,
    pub command: Option<CleanCommand>,
    /// False for shared artifact stores that need an extra warning.
    pub safe: bool,
}

impl CleanableItem {
    /// Item removed by deleting `path`.
    pub fn path(path: PathBuf, description: &str, size_bytes: u64, safe: bool) -> Self {
        Self {
            path,
            description: description.to_string(),
            size_bytes,
            command: None,
            safe,
        }
    }

    /// Item cleaned by running `command`.
    pub fn command(
        path: PathBuf,
        description: &str,
        size_bytes: u64,
        command: CleanCommand,
        safe: bool,
    ) -> Self {
        Self {
            path,
            description: description.to_string(),
            size_bytes,
            command: Some(command),
            safe,
        }
    }
}

/// Outcome of cleaning a batch of items. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanResult {
    pub items_cleaned: usize,
    pub space_reclaimed: u64,
    pub errors: Vec<CleanFailure>,
}

impl CleanResult {
    pub fn record_success(&mut self, size_bytes: u64) {
        self.items_cleaned += 1;
        self.space_reclaimed += size_bytes;
    }

    pub fn record_failure(&mut self, failure: CleanFailure) {
        self.errors.push(failure);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
