//! Info command implementation.

use humansize::{format_size, BINARY};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::audit::scan_provider;
use crate::cli::InfoArgs;
use crate::error::{AuditError, Result};
use crate::host::Host;
use crate::provider::{
    resolve_language, CleanableItem, DiskUsage, Installation, Provider, ProviderRegistry,
};

/// Everything known about one language.
#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installations: Option<Vec<Installation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub environment: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<DiskUsage>,
    pub cleanable: Vec<CleanableItem>,
}

impl LanguageInfo {
    pub fn gather(provider: &dyn Provider) -> Self {
        let scan = scan_provider(provider);
        let (installations, error) = match scan.installations {
            Ok(installs) => (Some(installs), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            id: provider.id(),
            name: provider.name(),
            installations,
            error,
            environment: provider.env_vars(),
            disk_usage: scan.disk_usage,
            cleanable: provider.cleanable_items(),
        }
    }
}

/// Run the info command
pub fn run(args: InfoArgs, host: Arc<Host>) -> Result<()> {
    let id = resolve_language(&args.lang).ok_or_else(|| AuditError::UnknownLanguage(args.lang.clone()))?;
    let registry = ProviderRegistry::new(host);
    let provider = registry
        .get(id)
        .ok_or_else(|| AuditError::UnknownLanguage(args.lang.clone()))?;

    let info = LanguageInfo::gather(provider);

    if args.json {
        let json = serde_json::to_string_pretty(&info).map_err(|e| AuditError::Other(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", format_info(&info));
    }
    Ok(())
}

pub fn format_info(info: &LanguageInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", info.name));

    match (&info.installations, &info.error) {
        (Some(installs), _) => {
            for install in installs {
                out.push_str(&format!(
                    "  {} Version:  {}\n",
                    install.status().icon(),
                    install.version
                ));
                out.push_str(&format!("    Source:   {}\n", install.source_display()));
                out.push_str(&format!("    Binary:   {}\n", install.binary_path.display()));
                if let Some(manager) = &install.manager_path {
                    out.push_str(&format!("    Manager:  {}\n", manager.display()));
                }
            }
        }
        (None, Some(error)) => {
            out.push_str(&format!("  ❌ {}\n", error));
        }
        (None, None) => {}
    }

    if !info.environment.is_empty() {
        out.push_str("\nEnvironment:\n");
        for (name, value) in &info.environment {
            out.push_str(&format!("  {}={}\n", name, value));
        }
    }

    if let Some(usage) = info.disk_usage.as_ref().filter(|u| !u.is_empty()) {
        out.push_str("\nDisk usage:\n");
        for item in usage.items() {
            out.push_str(&format!(
                "  {:<26} {:>12}  {}\n",
                item.description,
                format_size(item.size_bytes, BINARY),
                item.path.display()
            ));
        }
        out.push_str(&format!("  Total: {}\n", format_size(usage.total(), BINARY)));
    }

    if !info.cleanable.is_empty() {
        out.push_str("\nCleanable:\n");
        for item in &info.cleanable {
            let how = match &item.command {
                Some(command) => command.to_string(),
                None => format!("remove {}", item.path.display()),
            };
            out.push_str(&format!(
                "  {:<26} {:>12}  {}{}\n",
                item.description,
                format_size(item.size_bytes, BINARY),
                how,
                if item.safe { "" } else { "  ⚠️" }
            ));
        }
    }

    out
}
