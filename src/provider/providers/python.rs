use std::sync::Arc;

use super::{dir_from_env, first_existing};
use crate::host::Host;
use crate::provider::{
    CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};
use crate::runner::CleanCommand;

const RULES: &[SourceRule] = &[
    SourceRule::new(&[Matcher::Contains(".pyenv")], InstallSource::VersionManager)
        .manager("pyenv", Some(".pyenv")),
    SourceRule::new(&[Matcher::Contains("/miniconda3/")], InstallSource::VersionManager)
        .manager("conda", Some("miniconda3")),
    SourceRule::new(&[Matcher::Contains("/anaconda3/")], InstallSource::VersionManager)
        .manager("conda", Some("anaconda3")),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Prefix("/usr/bin/")], InstallSource::System),
];

const PIP_CACHE: &[&str] = &["~/Library/Caches/pip", "~/.cache/pip"];

/// CPython 3 with pyenv, pip and virtualenvwrapper locations.
pub struct PythonProvider {
    host: Arc<Host>,
}

impl PythonProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }
}

impl Provider for PythonProvider {
    fn id(&self) -> &'static str {
        "python"
    }

    fn name(&self) -> &'static str {
        "Python"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py", "python3"]
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "python3"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        let version = output.lines().next()?.trim().strip_prefix("Python ")?;
        (!version.is_empty()).then(|| version.trim().to_string())
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        let host = &self.host;
        let mut locations = vec![CacheLocation::new(
            dir_from_env(host, "PYENV_ROOT", "~/.pyenv").join("versions"),
            "Pyenv Versions",
        )];
        locations.extend(
            PIP_CACHE
                .iter()
                .map(|p| CacheLocation::new(host.expand(p), "Pip Cache")),
        );
        locations.push(CacheLocation::new(
            dir_from_env(host, "WORKON_HOME", "~/.virtualenvs"),
            "Virtual Environments",
        ));
        locations
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &["PYTHONPATH", "VIRTUAL_ENV", "PYENV_ROOT"]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        vec![CleanTarget::run(
            first_existing(&self.host, PIP_CACHE),
            "pip cache",
            CleanCommand::new("python3", &["-m", "pip", "cache", "purge"]),
        )]
    }
}
