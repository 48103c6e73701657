//! Concurrent scan across providers.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::AuditError;
use crate::provider::{not_found, DiskUsage, Installation, Provider};

/// Outcome of scanning one provider.
#[derive(Debug)]
pub struct ScanResult {
    pub id: &'static str,
    pub name: &'static str,
    /// Detected installations, or why there are none.
    pub installations: Result<Vec<Installation>, AuditError>,
    /// Present only when detection succeeded.
    pub disk_usage: Option<DiskUsage>,
}

impl ScanResult {
    pub fn is_installed(&self) -> bool {
        self.installations.is_ok()
    }

    /// First installation, if any.
    pub fn primary(&self) -> Option<&Installation> {
        self.installations.as_ref().ok().and_then(|i| i.first())
    }
}

/// JSON shape of a [`ScanResult`].
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub id: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installations: Option<&'a [Installation]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<&'a DiskUsage>,
}

impl<'a> From<&'a ScanResult> for ScanReport<'a> {
    fn from(result: &'a ScanResult) -> Self {
        let (installations, error) = match &result.installations {
            Ok(installs) => (Some(installs.as_slice()), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            id: result.id,
            name: result.name,
            installations,
            error,
            disk_usage: result.disk_usage.as_ref(),
        }
    }
}

/// Detect, then measure. An empty detection is reported as not found.
pub fn scan_provider(provider: &dyn Provider) -> ScanResult {
    let installations = provider.detect_installed().and_then(|installs| {
        if installs.is_empty() {
            Err(not_found(provider.executable()))
        } else {
            Ok(installs)
        }
    });

    let disk_usage = match &installations {
        Ok(_) => Some(provider.global_cache_usage()),
        Err(err) => {
            tracing::info!(provider = provider.id(), error = %err, "Provider unavailable");
            None
        }
    };

    ScanResult {
        id: provider.id(),
        name: provider.name(),
        installations,
        disk_usage,
    }
}

/// Runs one scan task per provider on a bounded pool.
pub struct ScanOrchestrator {
    parallelism: usize,
}

impl ScanOrchestrator {
    /// `parallelism` of 0 means one thread per provider.
    pub fn new(parallelism: usize) -> Self {
        Self { parallelism }
    }

    /// Scan the providers accepted by `filter`.
    ///
    /// Results come back in input order regardless of completion order.
    /// Blocks until every task has finished; never fails.
    pub fn run<F>(&self, providers: &[Box<dyn Provider>], filter: F) -> Vec<ScanResult>
    where
        F: Fn(&dyn Provider) -> bool,
    {
        let selected: Vec<&dyn Provider> = providers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| filter(*p))
            .collect();

        if selected.is_empty() {
            return Vec::new();
        }

        let threads = if self.parallelism == 0 {
            selected.len()
        } else {
            self.parallelism
        };

        // one slot per provider; each task writes only its own
        let mut slots: Vec<Option<ScanResult>> = selected.iter().map(|_| None).collect();

        let fill = |slots: &mut [Option<ScanResult>]| {
            slots
                .par_iter_mut()
                .zip(selected.par_iter())
                .for_each(|(slot, provider)| {
                    *slot = Some(scan_provider(*provider));
                });
        };

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| fill(&mut slots)),
            Err(err) => {
                tracing::warn!(error = %err, "Could not build scan pool, using global pool");
                fill(&mut slots);
            }
        }

        slots.into_iter().flatten().collect()
    }
}

/// Scan with one thread per selected provider.
pub fn run_scan<F>(providers: &[Box<dyn Provider>], filter: F) -> Vec<ScanResult>
where
    F: Fn(&dyn Provider) -> bool,
{
    ScanOrchestrator::new(0).run(providers, filter)
}
