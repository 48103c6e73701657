use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{dir_from_env, first_existing};
use crate::host::Host;
use crate::provider::{
    classify, CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};
use crate::runner::CleanCommand;
use crate::scanner::resolve_symlinks;

const RULES: &[SourceRule] = &[
    SourceRule::new(&[Matcher::Contains(".phpenv")], InstallSource::VersionManager)
        .manager("phpenv", Some(".phpenv")),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Prefix("/usr/bin/")], InstallSource::System),
];

const COMPOSER_CACHE: &[&str] = &["~/.composer/cache", "~/.cache/composer"];

/// PHP with Composer.
pub struct PhpProvider {
    host: Arc<Host>,
}

impl PhpProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }

    /// Keg directory of a Homebrew-installed `php`, e.g.
    /// `/opt/homebrew/Cellar/php/8.3.0`.
    fn homebrew_keg(&self) -> Option<PathBuf> {
        let binary = self.host.find_executable("php").ok()?;
        keg_of(&resolve_symlinks(&binary))
    }

    fn composer_cache(&self) -> PathBuf {
        match self.host.var("COMPOSER_HOME") {
            Some(home) => Path::new(home).join("cache"),
            None => first_existing(&self.host, COMPOSER_CACHE),
        }
    }
}

/// `<keg>/bin/php` inside a Cellar, or `None`.
fn keg_of(real_path: &Path) -> Option<PathBuf> {
    let path = real_path.to_string_lossy();
    if classify(RULES, &path, &[]) != InstallSource::Homebrew || !path.contains("/Cellar/") {
        return None;
    }
    let bin = real_path.parent()?;
    if bin.file_name()? != "bin" {
        return None;
    }
    bin.parent().map(Path::to_path_buf)
}

impl Provider for PhpProvider {
    fn id(&self) -> &'static str {
        "php"
    }

    fn name(&self) -> &'static str {
        "PHP"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "php"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        // PHP 8.3.0 (cli) (built: Nov 21 2023 14:40:35) (NTS)
        output
            .lines()
            .find(|line| line.starts_with("PHP "))
            .and_then(|line| line.split_whitespace().nth(1))
            .map(str::to_string)
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        let host = &self.host;
        let mut locations = Vec::new();
        if let Some(keg) = self.homebrew_keg() {
            locations.push(CacheLocation::new(keg, "PHP Installation"));
        }
        match host.var("COMPOSER_HOME") {
            Some(home) => locations.push(CacheLocation::new(
                Path::new(home).join("cache"),
                "Composer Cache",
            )),
            None => locations.extend(
                COMPOSER_CACHE
                    .iter()
                    .map(|p| CacheLocation::new(host.expand(p), "Composer Cache")),
            ),
        }
        locations.push(CacheLocation::new(
            dir_from_env(host, "COMPOSER_HOME", "~/.composer").join("vendor"),
            "Composer Global Packages",
        ));
        locations
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &["COMPOSER_HOME", "PHP_INI_SCAN_DIR"]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        vec![CleanTarget::run(
            self.composer_cache(),
            "Composer cache",
            CleanCommand::new("composer", &["clear-cache"]),
        )]
    }
}
