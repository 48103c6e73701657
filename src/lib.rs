//! depsweep - toolchain audit and cache cleanup
//!
//! This crate provides functionality for:
//! - Detecting installed language toolchains and how they were installed
//! - Measuring the disk usage of their global caches
//! - Cleaning those caches safely, with preview and confirmation

pub mod audit;
pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod provider;
pub mod runner;
pub mod scanner;

// Re-export commonly used types
pub use audit::{run_scan, ScanOrchestrator, ScanResult};
pub use cleaner::{run_clean, CleanConsole, CleanOutcome};
pub use config::{Config, RunFlags};
pub use error::{AuditError, Result};
pub use provider::{Provider, ProviderRegistry};
