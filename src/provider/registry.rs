//! Provider registry and language selection.

use std::sync::Arc;

use super::providers::all_providers;
use super::Provider;
use crate::error::{AuditError, Result};
use crate::host::Host;

/// The providers selected for a run, in display order.
///
/// Selection is by exact id or alias, so `--lang java` never pulls in a
/// provider whose name merely contains "java".
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Create a registry with all built-in providers.
    pub fn new(host: Arc<Host>) -> Self {
        Self {
            providers: all_providers(host),
        }
    }

    /// Resolve a selector: `all` or a comma-separated list of ids/aliases.
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use depsweep::host::Host;
    /// use depsweep::provider::ProviderRegistry;
    ///
    /// let host = Arc::new(Host::builder().build());
    /// let registry = ProviderRegistry::select(host, "golang,py").unwrap();
    /// assert_eq!(registry.ids(), vec!["go", "python"]);
    /// ```
    pub fn select(host: Arc<Host>, selector: &str) -> Result<Self> {
        let ids = resolve_selector(selector)?;
        Ok(Self::filtered(host, &ids))
    }

    fn filtered(host: Arc<Host>, ids: &[&str]) -> Self {
        Self {
            providers: all_providers(host)
                .into_iter()
                .filter(|p| ids.contains(&p.id()))
                .collect(),
        }
    }

    /// Get all selected providers.
    pub fn providers(&self) -> &[Box<dyn Provider>] {
        &self.providers
    }

    /// Get a provider by ID.
    pub fn get(&self, id: &str) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
    }

    /// List all provider IDs.
    pub fn ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// Canonical provider id for a language name or alias, case-insensitive.
pub fn resolve_language(name: &str) -> Option<&'static str> {
    let name = name.trim().to_ascii_lowercase();
    // aliases do not depend on the host
    let host = Arc::new(Host::builder().build());
    all_providers(host)
        .iter()
        .find(|p| p.id() == name || p.aliases().contains(&name.as_str()))
        .map(|p| p.id())
}

/// Provider ids for `names`.
///
/// Fails on the first name that matches no provider, or when `names` is
/// empty.
pub fn resolve_languages<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static str>> {
    if names.is_empty() {
        return Err(AuditError::UnknownLanguage(String::new()));
    }
    names
        .iter()
        .map(|name| {
            resolve_language(name.as_ref())
                .ok_or_else(|| AuditError::UnknownLanguage(name.as_ref().to_string()))
        })
        .collect()
}

/// Provider ids for a selector: `all` or a comma-separated list.
pub fn resolve_selector(selector: &str) -> Result<Vec<&'static str>> {
    let selector = selector.trim();
    if selector.eq_ignore_ascii_case("all") {
        let host = Arc::new(Host::builder().build());
        return Ok(all_providers(host).iter().map(|p| p.id()).collect());
    }
    let names: Vec<&str> = selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    resolve_languages(&names)
}
