use std::sync::Arc;

use super::{dir_from_env, first_existing};
use crate::host::Host;
use crate::provider::{
    CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};
use crate::runner::CleanCommand;

const RULES: &[SourceRule] = &[
    SourceRule::new(&[Matcher::Contains(".nvm")], InstallSource::VersionManager)
        .manager("nvm", Some(".nvm")),
    SourceRule::new(&[Matcher::Contains(".volta")], InstallSource::VersionManager)
        .manager("volta", Some(".volta")),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Prefix("/usr/bin/")], InstallSource::System),
];

const YARN_CACHE: &[&str] = &["~/Library/Caches/Yarn", "~/.cache/yarn"];
const PNPM_STORE: &[&str] = &["~/.local/share/pnpm/store", "~/Library/pnpm/store"];

/// Node.js with npm, Yarn and pnpm caches.
pub struct NodeProvider {
    host: Arc<Host>,
}

impl NodeProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }
}

impl Provider for NodeProvider {
    fn id(&self) -> &'static str {
        "node"
    }

    fn name(&self) -> &'static str {
        "Node.js"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["nodejs", "node.js"]
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "node"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["--version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        let version = output.lines().next()?.trim().strip_prefix('v')?;
        (!version.is_empty()).then(|| version.to_string())
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        let host = &self.host;
        let mut locations = vec![
            CacheLocation::new(
                dir_from_env(host, "NVM_DIR", "~/.nvm").join("versions"),
                "NVM Versions",
            ),
            CacheLocation::new(host.expand("~/.npm/_cacache"), "NPM Cache"),
        ];
        locations.extend(
            YARN_CACHE
                .iter()
                .map(|p| CacheLocation::new(host.expand(p), "Yarn Cache")),
        );
        locations.push(CacheLocation::new(host.expand("~/.yarn"), "Yarn v2+ Cache"));
        locations.extend(
            PNPM_STORE
                .iter()
                .map(|p| CacheLocation::new(host.expand(p), "PNPM Store")),
        );
        locations
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &["NODE_PATH", "NPM_CONFIG_PREFIX", "NVM_DIR"]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        let host = &self.host;
        vec![
            CleanTarget::run(
                host.expand("~/.npm/_cacache"),
                "npm cache",
                CleanCommand::new("npm", &["cache", "clean", "--force"]),
            ),
            CleanTarget::run(
                first_existing(host, YARN_CACHE),
                "Yarn cache",
                CleanCommand::new("yarn", &["cache", "clean"]),
            ),
            CleanTarget::run(
                first_existing(host, PNPM_STORE),
                "pnpm store",
                CleanCommand::new("pnpm", &["store", "prune"]),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::classify;
    use crate::provider::testing::{fake_bin, host_with};
    use crate::runner::testing::ScriptedRunner;
    use crate::runner::CommandOutput;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_version() {
        let node = NodeProvider::new(Arc::new(Host::builder().build()));
        assert_eq!(node.parse_version("v20.10.0\n"), Some("20.10.0".to_string()));
        assert_eq!(node.parse_version("20.10.0"), None);
        assert_eq!(node.parse_version("v"), None);
        assert_eq!(node.parse_version(""), None);
    }

    #[test]
    fn test_classification_rules() {
        let cases = [
            ("/home/dev/.nvm/versions/node/v20.10.0/bin/node", InstallSource::VersionManager),
            ("/home/dev/.volta/tools/image/node/20.10.0/bin/node", InstallSource::VersionManager),
            ("/opt/homebrew/Cellar/node/21.1.0/bin/node", InstallSource::Homebrew),
            ("/usr/bin/node", InstallSource::System),
            ("/usr/local/bin/node", InstallSource::Unknown),
        ];
        for (path, expected) in cases {
            assert_eq!(classify(RULES, path, &[]), expected, "{}", path);
        }
    }

    #[test]
    fn test_detect_installed_volta() {
        let tmp = TempDir::new().unwrap();
        let bin = fake_bin(tmp.path(), ".volta/tools/image/node/20.10.0/bin", "node");
        let runner = ScriptedRunner::new().on("node --version", CommandOutput::ok("v20.10.0\n"));
        let node = NodeProvider::new(Arc::new(host_with(tmp.path(), vec![bin], runner)));

        let installs = node.detect_installed().unwrap();
        assert_eq!(installs[0].version, "20.10.0");
        assert_eq!(installs[0].manager_name.as_deref(), Some("volta"));
        assert_eq!(installs[0].source_display(), "volta");
    }

    #[test]
    fn test_unparseable_version_is_unknown() {
        let tmp = TempDir::new().unwrap();
        let bin = fake_bin(tmp.path(), "bin", "node");
        let runner = ScriptedRunner::new().on("node --version", CommandOutput::ok("garbage"));
        let node = NodeProvider::new(Arc::new(host_with(tmp.path(), vec![bin], runner)));

        let installs = node.detect_installed().unwrap();
        assert_eq!(installs[0].version, "unknown");
    }

    #[test]
    fn test_failed_version_probe_is_unknown() {
        let tmp = TempDir::new().unwrap();
        let bin = fake_bin(tmp.path(), "bin", "node");
        let output = CommandOutput {
            success: false,
            code: Some(1),
            stdout: "v20.1.0".to_string(),
            stderr: String::new(),
        };
        let runner = ScriptedRunner::new().on("node --version", output);
        let node = NodeProvider::new(Arc::new(host_with(tmp.path(), vec![bin], runner)));

        let installs = node.detect_installed().unwrap();
        assert_eq!(installs[0].version, "unknown");
        assert_eq!(installs[0].binary_path, tmp.path().join("bin/node"));
    }

    #[test]
    fn test_nvm_dir_override() {
        let host = Host::builder()
            .home("/home/dev")
            .var("NVM_DIR", "/opt/nvm")
            .build();
        let node = NodeProvider::new(Arc::new(host));

        assert_eq!(node.cache_locations()[0].path, PathBuf::from("/opt/nvm/versions"));
    }

    #[test]
    fn test_cleanable_items_only_existing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".npm/_cacache")).unwrap();
        fs::create_dir_all(tmp.path().join(".cache/yarn")).unwrap();
        fs::write(tmp.path().join(".cache/yarn/pkg.tgz"), vec![0u8; 32]).unwrap();

        let node = NodeProvider::new(Arc::new(host_with(tmp.path(), vec![], ScriptedRunner::new())));
        let items = node.cleanable_items();

        let described: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(described, vec!["npm cache", "Yarn cache"]);
        assert_eq!(items[1].path, tmp.path().join(".cache/yarn"));
        assert_eq!(items[1].size_bytes, 32);
        assert!(items.iter().all(|i| i.safe && i.command.is_some()));
    }
}
