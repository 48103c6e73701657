use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::host::Host;
use crate::provider::{
    CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};
use crate::runner::CleanCommand;

const RULES: &[SourceRule] = &[
    SourceRule::new(&[Matcher::Contains(".goenv")], InstallSource::VersionManager)
        .manager("goenv", Some(".goenv")),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Prefix("/usr/local/go/")], InstallSource::Manual),
    SourceRule::new(
        &[Matcher::Prefix("/usr/lib/go"), Matcher::Prefix("/usr/bin/")],
        InstallSource::System,
    ),
];

const ENV_VARS: &[&str] = &["GOROOT", "GOPATH", "GOCACHE", "GOMODCACHE"];

/// Golang toolchain.
///
/// Go knows its own directories, so locations come from `go env` before
/// falling back to the environment and conventional defaults.
pub struct GoProvider {
    host: Arc<Host>,
}

impl GoProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }

    /// `go env NAME`, else `$NAME`.
    fn go_env(&self, name: &str) -> Option<String> {
        self.query_go_env(name)
            .or_else(|| self.host.var(name).map(str::to_string))
    }

    fn query_go_env(&self, name: &str) -> Option<String> {
        let go = self.host.find_executable("go").ok()?;
        let output = self.host.run(&go.to_string_lossy(), &["env", name]).ok()?;
        if !output.success {
            return None;
        }
        let value = output.stdout.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn module_cache(&self) -> PathBuf {
        if let Some(dir) = self.go_env("GOMODCACHE") {
            return PathBuf::from(dir);
        }
        // GOPATH may list several entries; modules live under the first
        let gopath = self
            .go_env("GOPATH")
            .and_then(|gopath| std::env::split_paths(&gopath).next());
        match gopath {
            Some(gopath) => gopath.join("pkg").join("mod"),
            None => self.host.expand("~/go/pkg/mod"),
        }
    }
}

impl Provider for GoProvider {
    fn id(&self) -> &'static str {
        "go"
    }

    fn name(&self) -> &'static str {
        "Golang"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["golang"]
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "go"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        // go version go1.21.3 darwin/arm64
        let token = output.split_whitespace().nth(2)?;
        token.strip_prefix("go").map(str::to_string)
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        let mut locations = Vec::new();
        if let Some(goroot) = self.go_env("GOROOT") {
            locations.push(CacheLocation::new(PathBuf::from(goroot), "Go SDK"));
        }
        if let Some(gocache) = self.go_env("GOCACHE") {
            locations.push(CacheLocation::new(PathBuf::from(gocache), "Build Cache"));
        }
        locations.push(CacheLocation::new(self.module_cache(), "Module Cache"));
        locations
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        ENV_VARS
    }

    fn env_vars(&self) -> BTreeMap<String, String> {
        ENV_VARS
            .iter()
            .filter_map(|name| self.go_env(name).map(|v| (name.to_string(), v)))
            .collect()
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        let mut targets = vec![CleanTarget::run(
            self.module_cache(),
            "Go module cache",
            CleanCommand::new("go", &["clean", "-modcache"]),
        )];
        if let Some(gocache) = self.go_env("GOCACHE") {
            targets.push(CleanTarget::run(
                PathBuf::from(gocache),
                "Go build cache",
                CleanCommand::new("go", &["clean", "-cache"]),
            ));
        }
        targets
    }
}
