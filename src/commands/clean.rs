//! Clean command implementation.

use anyhow::Result;
use std::io;
use std::sync::Arc;

use crate::cleaner::{run_clean, CleanOutcome, TerminalConsole};
use crate::cli::CleanArgs;
use crate::config::RunFlags;
use crate::host::Host;
use crate::provider::ProviderRegistry;

/// Run the clean command.
///
/// Languages are handled one after another. Returns `true` if any item
/// failed to clean.
pub fn run(args: CleanArgs, host: Arc<Host>, verbose: bool) -> Result<bool> {
    let registry = ProviderRegistry::select(host, &args.lang)?;
    let flags = RunFlags {
        dry_run: args.dry_run,
        force: args.force,
        verbose,
    };

    let stdin = io::stdin();
    let mut console = TerminalConsole::new(stdin.lock(), io::stdout());
    let mut failed = false;

    for (index, provider) in registry.providers().iter().enumerate() {
        if index > 0 {
            println!();
        }
        tracing::info!(provider = provider.id(), ?flags, "Starting clean");

        if let CleanOutcome::Cleaned(result) = run_clean(provider.as_ref(), flags, &mut console) {
            failed |= result.has_errors();
        }
    }

    Ok(failed)
}
