//! Scan command implementation

use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use crate::audit::{ScanOrchestrator, ScanReport, ScanResult};
use crate::cli::ScanArgs;
use crate::config::Config;
use crate::error::{AuditError, Result};
use crate::host::Host;
use crate::provider::{resolve_languages, resolve_selector, ProviderRegistry};

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, host: Arc<Host>, quiet: bool) -> Result<()> {
    let wanted = selected_languages(args.lang.as_deref(), config)?;
    let json = args.json || config.output.json;
    let jobs = args.jobs.unwrap_or(config.scan.jobs);

    let registry = ProviderRegistry::new(host);
    tracing::info!(languages = ?wanted, jobs, "Scanning toolchains");

    let spinner = (!json && !quiet && std::io::stderr().is_terminal()).then(scan_spinner);
    let results =
        ScanOrchestrator::new(jobs).run(registry.providers(), |p| wanted.contains(&p.id()));
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let output = if json {
        format_json(&results)?
    } else {
        format_table(&results, config.output.show_empty)
    };
    println!("{}", output);

    Ok(())
}

/// `--lang` wins over `scan.languages`, which wins over everything.
fn selected_languages(lang: Option<&str>, config: &Config) -> Result<Vec<&'static str>> {
    match lang {
        Some(selector) => resolve_selector(selector),
        None if !config.scan.languages.is_empty() => resolve_languages(&config.scan.languages),
        None => resolve_selector("all"),
    }
}

fn scan_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Scanning toolchains...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Pretty-printed JSON array, one object per language.
pub fn format_json(results: &[ScanResult]) -> Result<String> {
    let reports: Vec<ScanReport> = results.iter().map(ScanReport::from).collect();
    serde_json::to_string_pretty(&reports).map_err(|e| AuditError::Other(e.to_string()))
}

/// Summary table followed by a per-language disk usage breakdown.
pub fn format_table(results: &[ScanResult], show_empty: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "  {:<10} {:<16} {:<20} {:>12}\n",
        "LANGUAGE", "VERSION", "SOURCE", "DISK USAGE"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(61)));

    let mut total = 0u64;
    let mut installed = 0usize;

    for result in results {
        match &result.installations {
            Ok(installs) => {
                installed += 1;
                let Some(first) = installs.first() else {
                    continue;
                };
                let version = if installs.len() > 1 {
                    format!("{} (+{})", first.version, installs.len() - 1)
                } else {
                    first.version.clone()
                };
                let usage = result.disk_usage.as_ref().map(|u| u.total()).unwrap_or(0);
                total += usage;
                out.push_str(&format!(
                    "{} {:<10} {:<16} {:<20} {:>12}\n",
                    first.status().icon(),
                    result.name,
                    version,
                    first.source_display(),
                    format_size(usage, BINARY)
                ));
            }
            Err(err) if show_empty => {
                let reason = if err.is_not_found() {
                    "not installed".to_string()
                } else {
                    err.to_string()
                };
                out.push_str(&format!("❌ {:<10} {}\n", result.name, reason));
            }
            Err(_) => {}
        }
    }

    for result in results {
        let Some(usage) = result.disk_usage.as_ref().filter(|u| !u.is_empty()) else {
            continue;
        };
        out.push_str(&format!("\n{}:\n", result.name));
        for item in usage.items() {
            out.push_str(&format!(
                "  {:<26} {:>12}  {}\n",
                item.description,
                format_size(item.size_bytes, BINARY),
                item.path.display()
            ));
        }
    }

    out.push_str(&format!(
        "\nTotal: {} across {} toolchain{}",
        format_size(total, BINARY),
        installed,
        if installed == 1 { "" } else { "s" }
    ));
    out
}
