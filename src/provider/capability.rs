//! The provider capability set.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::classify::{classify_path, SourceRule};
use super::types::{CleanResult, CleanableItem, DiskUsage, DiskUsageItem, Installation};
use crate::cleaner::clean_items;
use crate::error::{AuditError, Result};
use crate::host::Host;
use crate::runner::CleanCommand;
use crate::scanner::{dir_size, resolve_symlinks};

/// Version reported when the toolchain's output cannot be parsed.
pub const UNKNOWN_VERSION: &str = "unknown";

/// A well-known cache or store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLocation {
    pub path: PathBuf,
    pub description: &'static str,
}

impl CacheLocation {
    pub fn new(path: PathBuf, description: &'static str) -> Self {
        Self { path, description }
    }
}

/// A location that may be offered for cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTarget {
    pub path: PathBuf,
    pub description: &'static str,
    /// Native cleanup invocation; `None` means delete `path`.
    pub command: Option<CleanCommand>,
    pub safe: bool,
}

impl CleanTarget {
    /// Cleaned by recursive deletion.
    pub fn remove(path: PathBuf, description: &'static str, safe: bool) -> Self {
        Self {
            path,
            description,
            command: None,
            safe,
        }
    }

    /// Cleaned by the ecosystem's own command.
    pub fn run(path: PathBuf, description: &'static str, command: CleanCommand) -> Self {
        Self {
            path,
            description,
            command: Some(command),
            safe: true,
        }
    }
}

/// One language ecosystem.
///
/// Implementors describe their ecosystem as data (executable name, version
/// parser, classification rules, cache tables); the six operations are
/// provided on top of that data.
pub trait Provider: Send + Sync {
    /// Stable identifier used for selection (e.g. "go").
    fn id(&self) -> &'static str;

    /// Human-readable name (e.g. "Golang").
    fn name(&self) -> &'static str;

    /// Other names accepted by the language selector.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Machine snapshot this provider probes.
    fn host(&self) -> &Host;

    /// Primary executable looked up on the search path.
    fn executable(&self) -> &'static str;

    /// Arguments that make the executable print its version.
    fn version_args(&self) -> &'static [&'static str];

    /// Extract the version from the combined version output.
    fn parse_version(&self, output: &str) -> Option<String>;

    /// Classification rules, most specific first.
    fn source_rules(&self) -> &'static [SourceRule];

    /// Auxiliary classification inputs, e.g. the value of `JAVA_HOME`.
    fn source_signals(&self) -> Vec<String> {
        Vec::new()
    }

    /// Every location reported in the disk-usage breakdown.
    fn cache_locations(&self) -> Vec<CacheLocation>;

    /// Environment variables worth showing for this ecosystem.
    fn env_var_names(&self) -> &'static [&'static str];

    /// Locations offered for cleaning, in cleaning order.
    fn clean_targets(&self) -> Vec<CleanTarget>;

    /// Detect the active installation.
    ///
    /// Fails with [`AuditError::NotFound`] if the executable is absent. A
    /// version that cannot be obtained or parsed degrades to `"unknown"`.
    fn detect_installed(&self) -> Result<Vec<Installation>> {
        let host = self.host();
        let binary = host.find_executable(self.executable())?;
        let real_path = resolve_symlinks(&binary);

        let version = match host.run(&binary.to_string_lossy(), self.version_args()) {
            Ok(output) if output.success => self.parse_version(&output.combined()),
            Ok(output) => {
                tracing::debug!(provider = self.id(), code = ?output.code, "Version probe exited non-zero");
                None
            }
            Err(err) => {
                tracing::debug!(provider = self.id(), error = %err, "Version probe failed");
                None
            }
        }
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string());

        let signals = self.source_signals();
        let signals: Vec<&str> = signals.iter().map(String::as_str).collect();
        let classification = classify_path(self.source_rules(), &real_path, &signals);

        tracing::debug!(
            provider = self.id(),
            binary = %binary.display(),
            real = %real_path.display(),
            source = %classification.source,
            %version,
            "Detected installation"
        );

        Ok(vec![Installation {
            version,
            source: classification.source,
            binary_path: binary,
            manager_path: classification.manager_path,
            manager_name: classification.manager_name,
        }])
    }

    /// Measure every existing cache location. Never fails.
    fn global_cache_usage(&self) -> DiskUsage {
        let existing: Vec<CacheLocation> = self
            .cache_locations()
            .into_iter()
            .filter(|loc| loc.path.exists())
            .collect();

        existing
            .into_par_iter()
            .map(|loc| DiskUsageItem {
                size_bytes: dir_size(&loc.path),
                path: loc.path,
                description: loc.description.to_string(),
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    }

    /// Set, non-empty values of [`Provider::env_var_names`].
    fn env_vars(&self) -> BTreeMap<String, String> {
        let host = self.host();
        self.env_var_names()
            .iter()
            .filter_map(|name| host.var(name).map(|v| (name.to_string(), v.to_string())))
            .collect()
    }

    /// Existing clean targets with their current sizes.
    fn cleanable_items(&self) -> Vec<CleanableItem> {
        self.clean_targets()
            .into_iter()
            .filter(|target| target.path.exists())
            .map(|target| {
                let size = dir_size(&target.path);
                match target.command {
                    Some(command) => CleanableItem::command(
                        target.path,
                        target.description,
                        size,
                        command,
                        target.safe,
                    ),
                    None => CleanableItem::path(target.path, target.description, size, target.safe),
                }
            })
            .collect()
    }

    /// Clean `items` one at a time; failures are collected, not raised.
    fn clean(&self, items: &[CleanableItem]) -> CleanResult {
        clean_items(self.host().runner(), items)
    }
}

/// Shorthand for the `NotFound` error of a provider's executable.
pub fn not_found(executable: &str) -> AuditError {
    AuditError::NotFound {
        executable: executable.to_string(),
    }
}
