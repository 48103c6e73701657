//! Language ecosystem providers.
//!
//! This module provides:
//! - The [`Provider`] capability set and its result types
//! - Ordered path classification rules ([`SourceRule`])
//! - Built-in providers for Go, Node.js, Java, Python, PHP and Rust
//! - A [`ProviderRegistry`] resolving language selectors

mod capability;
mod classify;
mod providers;
mod registry;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use capability::{not_found, CacheLocation, CleanTarget, Provider, UNKNOWN_VERSION};
pub use classify::{
    classify, classify_path, manager_root, Classification, Matcher, SourceRule, HOMEBREW,
};
pub use providers::{
    all_providers, GoProvider, JavaProvider, NodeProvider, PhpProvider, PythonProvider,
    RustProvider,
};
pub use registry::{resolve_language, resolve_languages, resolve_selector, ProviderRegistry};
pub use types::{
    CleanResult, CleanableItem, DiskUsage, DiskUsageItem, InstallSource, Installation, Status,
};
