//! Ordered, first-match-wins classification of installation paths.
//!
//! Substring markers overlap across categories (a Homebrew-managed pyenv
//! lives under `/opt/homebrew` *and* contains `.pyenv`), so rule lists are
//! written most-specific first and evaluation stops at the first hit.

use std::path::{Path, PathBuf};

use super::types::InstallSource;

/// A single test over a path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Contains(&'static str),
    Prefix(&'static str),
}

impl Matcher {
    pub fn matches(&self, haystack: &str) -> bool {
        match self {
            Matcher::Contains(needle) => haystack.contains(needle),
            Matcher::Prefix(prefix) => haystack.starts_with(prefix),
        }
    }
}

/// One classification rule: any matcher hitting yields `source`.
#[derive(Debug, Clone, Copy)]
pub struct SourceRule {
    pub matchers: &'static [Matcher],
    pub source: InstallSource,
    /// Version manager identifier, e.g. "pyenv".
    pub manager: Option<&'static str>,
    /// Directory name that marks the manager root, e.g. ".pyenv".
    pub root_marker: Option<&'static str>,
    /// Also test the matchers against auxiliary signals (env var values).
    pub match_signals: bool,
}

impl SourceRule {
    pub const fn new(matchers: &'static [Matcher], source: InstallSource) -> Self {
        Self {
            matchers,
            source,
            manager: None,
            root_marker: None,
            match_signals: false,
        }
    }

    pub const fn manager(mut self, name: &'static str, root_marker: Option<&'static str>) -> Self {
        self.manager = Some(name);
        self.root_marker = root_marker;
        self
    }

    pub const fn with_signals(mut self) -> Self {
        self.match_signals = true;
        self
    }

    fn matches(&self, path: &str, signals: &[&str]) -> bool {
        let hit = |s: &str| self.matchers.iter().any(|m| m.matches(s));
        hit(path) || (self.match_signals && signals.iter().any(|&s| hit(s)))
    }
}

/// Homebrew prefixes shared by every provider.
pub const HOMEBREW: &[Matcher] = &[
    Matcher::Contains("/opt/homebrew"),
    Matcher::Contains("/usr/local/Cellar"),
    Matcher::Contains("/home/linuxbrew/.linuxbrew"),
];

/// Result of classifying one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub source: InstallSource,
    pub manager_name: Option<String>,
    pub manager_path: Option<PathBuf>,
}

/// First rule matching `path` (or, for opted-in rules, one of `signals`).
pub fn matching_rule<'a>(
    rules: &'a [SourceRule],
    path: &str,
    signals: &[&str],
) -> Option<&'a SourceRule> {
    rules.iter().find(|rule| rule.matches(path, signals))
}

/// Source of `path`; `Unknown` when no rule matches.
pub fn classify(rules: &[SourceRule], path: &str, signals: &[&str]) -> InstallSource {
    matching_rule(rules, path, signals)
        .map(|rule| rule.source)
        .unwrap_or(InstallSource::Unknown)
}

/// Prefix of `path` up to and including the `marker` directory component.
///
/// `manager_root("/home/dev/.pyenv/versions/3.12/bin", ".pyenv")` is
/// `/home/dev/.pyenv`. `None` when the marker is not a whole component.
pub fn manager_root(path: &str, marker: &str) -> Option<PathBuf> {
    path.match_indices(marker)
        .map(|(idx, _)| idx + marker.len())
        .find(|&end| path[end..].is_empty() || path[end..].starts_with('/'))
        .map(|end| PathBuf::from(&path[..end]))
}

/// Classify a canonical binary path and derive manager details.
pub fn classify_path(rules: &[SourceRule], real_path: &Path, signals: &[&str]) -> Classification {
    let path = real_path.to_string_lossy();
    let Some(rule) = matching_rule(rules, &path, signals) else {
        return Classification {
            source: InstallSource::Unknown,
            manager_name: None,
            manager_path: None,
        };
    };

    let manager_path = match (rule.source, rule.root_marker) {
        (InstallSource::VersionManager, Some(marker)) => manager_root(&path, marker)
            .or_else(|| signals.iter().find_map(|s| manager_root(s, marker))),
        _ => None,
    };

    Classification {
        source: rule.source,
        manager_name: rule.manager.map(str::to_string),
        manager_path,
    }
}
