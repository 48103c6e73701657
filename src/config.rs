use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::provider::resolve_language;

/// Upper bound for `scan.jobs` and `--jobs`.
pub const MAX_JOBS: usize = 256;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Worker threads for scanning (0 = one per selected language)
    pub jobs: usize,
    /// Languages scanned when `--lang` is not given (empty = all)
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// List languages whose toolchain was not found
    pub show_empty: bool,
    /// Emit JSON instead of a table by default
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_empty: true,
            json: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present; otherwise built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/depsweep/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depsweep").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Reject values no run could honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bad) = self
            .scan
            .languages
            .iter()
            .find(|lang| resolve_language(lang).is_none())
        {
            return Err(ConfigError::Invalid(format!(
                "scan.languages: unknown language '{}'",
                bad
            )));
        }
        if self.scan.jobs > MAX_JOBS {
            return Err(ConfigError::Invalid(format!(
                "scan.jobs must be at most {}, got {}",
                MAX_JOBS, self.scan.jobs
            )));
        }
        Ok(())
    }
}

/// Per-invocation switches for the clean workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    /// Show what would be cleaned, touch nothing.
    pub dry_run: bool,
    /// Skip the confirmation prompt.
    pub force: bool,
    pub verbose: bool,
}
