use std::path::PathBuf;
use std::sync::Arc;

use super::dir_from_env;
use crate::host::Host;
use crate::provider::{
    CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};

const RULES: &[SourceRule] = &[
    SourceRule::new(&[Matcher::Contains("/.cargo/bin")], InstallSource::VersionManager)
        .manager("rustup", Some(".cargo")),
    SourceRule::new(&[Matcher::Contains("/.rustup/toolchains")], InstallSource::VersionManager)
        .manager("rustup", Some(".rustup")),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Prefix("/usr/bin/")], InstallSource::System),
];

/// Rust toolchains and Cargo's download caches.
pub struct RustProvider {
    host: Arc<Host>,
}

impl RustProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }

    fn cargo_home(&self) -> PathBuf {
        dir_from_env(&self.host, "CARGO_HOME", "~/.cargo")
    }
}

impl Provider for RustProvider {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["rustc", "cargo"]
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "rustc"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        // rustc 1.75.0 (82e1608df 2023-12-21)
        let mut tokens = output.split_whitespace();
        if tokens.next()? != "rustc" {
            return None;
        }
        tokens.next().map(str::to_string)
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        let cargo = self.cargo_home();
        vec![
            CacheLocation::new(
                dir_from_env(&self.host, "RUSTUP_HOME", "~/.rustup").join("toolchains"),
                "Rustup Toolchains",
            ),
            CacheLocation::new(cargo.join("registry"), "Cargo Registry"),
            CacheLocation::new(cargo.join("git"), "Cargo Git Checkouts"),
        ]
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &["CARGO_HOME", "RUSTUP_HOME"]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        let cargo = self.cargo_home();
        vec![
            CleanTarget::remove(cargo.join("registry"), "Cargo registry cache", true),
            CleanTarget::remove(cargo.join("git"), "Cargo git checkouts", true),
        ]
    }
}
