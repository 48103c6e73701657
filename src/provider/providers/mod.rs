//! Built-in ecosystem providers.

mod go;
mod java;
mod node;
mod php;
mod python;
mod rust;

pub use go::GoProvider;
pub use java::JavaProvider;
pub use node::NodeProvider;
pub use php::PhpProvider;
pub use python::PythonProvider;
pub use rust::RustProvider;

use std::path::PathBuf;
use std::sync::Arc;

use crate::host::Host;
use crate::provider::Provider;

/// Returns all built-in providers, in display order.
pub fn all_providers(host: Arc<Host>) -> Vec<Box<dyn Provider>> {
    vec![
        Box::new(GoProvider::new(Arc::clone(&host))),
        Box::new(NodeProvider::new(Arc::clone(&host))),
        Box::new(JavaProvider::new(Arc::clone(&host))),
        Box::new(PythonProvider::new(Arc::clone(&host))),
        Box::new(PhpProvider::new(Arc::clone(&host))),
        Box::new(RustProvider::new(host)),
    ]
}

/// `$var` if set, else `default` expanded against the host's home.
pub(crate) fn dir_from_env(host: &Host, var: &str, default: &str) -> PathBuf {
    host.var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| host.expand(default))
}

/// First candidate that exists, else the first candidate.
///
/// Used where one cache lives at different places per platform.
pub(crate) fn first_existing(host: &Host, candidates: &[&str]) -> PathBuf {
    let expanded: Vec<PathBuf> = candidates.iter().map(|c| host.expand(c)).collect();
    expanded
        .iter()
        .find(|p| p.exists())
        .or_else(|| expanded.first())
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_all_providers_order() {
        let host = Arc::new(Host::builder().build());
        let ids: Vec<&str> = all_providers(host).iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!["go", "node", "java", "python", "php", "rust"]);
    }

    #[test]
    fn test_dir_from_env_prefers_variable() {
        let host = Host::builder()
            .home("/home/dev")
            .var("CARGO_HOME", "/opt/cargo")
            .build();

        assert_eq!(dir_from_env(&host, "CARGO_HOME", "~/.cargo"), PathBuf::from("/opt/cargo"));
        assert_eq!(
            dir_from_env(&host, "RUSTUP_HOME", "~/.rustup"),
            PathBuf::from("/home/dev/.rustup")
        );
    }

    #[test]
    fn test_first_existing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".cache/pip")).unwrap();
        let host = Host::builder().home(tmp.path()).build();

        assert_eq!(
            first_existing(&host, &["~/Library/Caches/pip", "~/.cache/pip"]),
            tmp.path().join(".cache/pip")
        );
        assert_eq!(
            first_existing(&host, &["~/Library/Caches/Yarn", "~/.cache/yarn"]),
            tmp.path().join("Library/Caches/Yarn")
        );
    }
}
