use std::sync::Arc;

use super::dir_from_env;
use crate::host::Host;
use crate::provider::{
    CacheLocation, CleanTarget, InstallSource, Matcher, Provider, SourceRule, HOMEBREW,
};

const RULES: &[SourceRule] = &[
    // also matched against JAVA_HOME: a /usr/bin/java launcher never
    // resolves into the SDKMAN tree
    SourceRule::new(&[Matcher::Contains(".sdkman")], InstallSource::VersionManager)
        .manager("sdkman", Some(".sdkman"))
        .with_signals(),
    SourceRule::new(HOMEBREW, InstallSource::Homebrew),
    SourceRule::new(&[Matcher::Contains("/Library/Java")], InstallSource::Manual),
    SourceRule::new(
        &[Matcher::Prefix("/usr/lib/jvm/"), Matcher::Prefix("/usr/bin/")],
        InstallSource::System,
    ),
];

/// JVM toolchain with Maven and Gradle caches.
pub struct JavaProvider {
    host: Arc<Host>,
}

impl JavaProvider {
    pub fn new(host: Arc<Host>) -> Self {
        Self { host }
    }

    fn maven_repository(&self) -> std::path::PathBuf {
        self.host.expand("~/.m2/repository")
    }

    fn gradle_caches(&self) -> std::path::PathBuf {
        dir_from_env(&self.host, "GRADLE_USER_HOME", "~/.gradle").join("caches")
    }
}

impl Provider for JavaProvider {
    fn id(&self) -> &'static str {
        "java"
    }

    fn name(&self) -> &'static str {
        "Java"
    }

    fn host(&self) -> &Host {
        &self.host
    }

    fn executable(&self) -> &'static str {
        "java"
    }

    fn version_args(&self) -> &'static [&'static str] {
        &["-version"]
    }

    fn parse_version(&self, output: &str) -> Option<String> {
        // openjdk version "21.0.1" 2023-10-17; JVMs may print
        // "Picked up _JAVA_OPTIONS" lines first
        let line = output.lines().find(|l| l.contains(" version "))?;
        let start = line.find('"')? + 1;
        let len = line[start..].find('"')?;
        let version = &line[start..start + len];
        (!version.is_empty()).then(|| version.to_string())
    }

    fn source_rules(&self) -> &'static [SourceRule] {
        RULES
    }

    fn source_signals(&self) -> Vec<String> {
        self.host.var("JAVA_HOME").map(str::to_string).into_iter().collect()
    }

    fn cache_locations(&self) -> Vec<CacheLocation> {
        vec![
            CacheLocation::new(
                dir_from_env(&self.host, "SDKMAN_DIR", "~/.sdkman").join("candidates/java"),
                "SDKMAN Java Versions",
            ),
            CacheLocation::new(self.maven_repository(), "Maven Repository"),
            CacheLocation::new(self.gradle_caches(), "Gradle Cache"),
        ]
    }

    fn env_var_names(&self) -> &'static [&'static str] {
        &["JAVA_HOME", "M2_HOME", "GRADLE_HOME"]
    }

    fn clean_targets(&self) -> Vec<CleanTarget> {
        vec![
            CleanTarget::remove(self.gradle_caches(), "Gradle cache", true),
            // local snapshots and installed artifacts live here too
            CleanTarget::remove(self.maven_repository(), "Maven repository", false),
        ]
    }
}
