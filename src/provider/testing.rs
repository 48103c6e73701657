//! Fixtures shared by provider, scan and clean tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{not_found, CacheLocation, CleanTarget, InstallSource, Installation, Provider, SourceRule};
use crate::error::Result;
use crate::host::Host;
use crate::runner::testing::ScriptedRunner;

/// Create an executable `name` under `root/dir` and return that directory.
pub fn fake_bin(root: &Path, dir: &str, name: &str) -> PathBuf {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join(name);
    fs::write(&file, "#!/bin/sh\nexit 0\n").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();
    }
    dir
}

/// Host with the given home, search path and scripted runner; no variables.
pub fn host_with(home: &Path, search_path: Vec<PathBuf>, runner: ScriptedRunner) -> Host {
    Host::builder()
        .home(home)
        .search_path(search_path)
        .runner(Arc::new(runner))
        .build()
}

/// Provider whose behaviour is set directly by the test.
pub struct FakeProvider {
    pub id: &'static str,
    pub host: Arc<Host>,
    /// How long detection takes.
    pub delay: Duration,
    pub installed: bool,
    pub caches: Vec<CacheLocation>,
    pub targets: Vec<CleanTarget>,
    pub detections: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            host: Arc::new(Host::builder().runner(Arc::new(ScriptedRunner::new())).build()),
            delay: Duration::ZERO,
            installed: true,
            caches: Vec::new(),
            targets: Vec::new(),
            detections: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn missing(mut self) -> Self {
        self.installed = false;
        self
    }

    pub fn cache(mut self, path: PathBuf, description: &'static str) -> Self {
        self.caches.push(CacheLocation::new(path, description));
        self
    }

    pub fn target(mut self, target: CleanTarget) -> Self {
        self.targets.push(target);
        self
    }

    /// Shared count of `detect_installed` calls.
    pub fn detection_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.detections)
    }
}

impl Provider for FakeProvider {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.id
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        self.id
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        Some(output.trim().to_string())
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        &[]
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        self.caches.clone()
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        self.targets.clone()
    }

    fn detect_installed(&self) -> Result<Vec<Installation>> {
        self.detections.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        if !self.installed {
            return Err(not_found(self.id));
        }
        Ok(vec![Installation {
            version: "1.0.0".to_string(),
            source: InstallSource::Manual,
            binary_path: PathBuf::from("/fake/bin").join(self.id),
            manager_path: None,
            manager_name: None,
        }])
    }
}
