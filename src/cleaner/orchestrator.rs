//! Preview, confirm, execute: the clean workflow for one provider.

use crate::config::RunFlags;
use crate::provider::{CleanResult, CleanableItem, Provider};

/// How a clean run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The provider had no existing cleanable items.
    NothingToClean,
    /// Dry run: items were shown, nothing was touched.
    Previewed { items: usize, total_size: u64 },
    /// The user did not confirm.
    Declined,
    /// Cleaning ran; inspect `errors` for per-item failures.
    Cleaned(CleanResult),
}

/// Presentation sink and confirmation source for the clean workflow.
pub trait CleanConsole {
    fn nothing_to_clean(&mut self, provider: &str);

    fn preview(&mut self, provider: &str, items: &[CleanableItem], total_size: u64);

    /// Elevated warning for items that are not pure caches.
    fn unsafe_warning(&mut self, provider: &str, unsafe_items: &[&CleanableItem]);

    /// Show the items and total, then ask. Anything but yes declines.
    fn confirm(&mut self, provider: &str, items: &[CleanableItem], total_size: u64) -> bool;

    fn cleaning(&mut self, _provider: &str) {}

    fn declined(&mut self, _provider: &str) {}

    fn report(&mut self, provider: &str, result: &CleanResult);
}

/// Run the clean workflow for `provider`.
///
/// Nothing is mutated unless the run is not a dry run and the user
/// confirmed (or `force` is set).
pub fn run_clean(
    provider: &dyn Provider,
    flags: RunFlags,
    console: &mut dyn CleanConsole,
) -> CleanOutcome {
    let name = provider.name();
    let items = provider.cleanable_items();

    if items.is_empty() {
        console.nothing_to_clean(name);
        return CleanOutcome::NothingToClean;
    }

    let total_size: u64 = items.iter().map(|i| i.size_bytes).sum();

    if flags.dry_run {
        tracing::info!(provider = name, items = items.len(), total_size, "Dry run");
        console.preview(name, &items, total_size);
        return CleanOutcome::Previewed {
            items: items.len(),
            total_size,
        };
    }

    let unsafe_items: Vec<&CleanableItem> = items.iter().filter(|i| !i.safe).collect();
    if !unsafe_items.is_empty() {
        console.unsafe_warning(name, &unsafe_items);
    }

    if !flags.force && !console.confirm(name, &items, total_size) {
        tracing::info!(provider = name, "Clean declined");
        console.declined(name);
        return CleanOutcome::Declined;
    }

    if flags.verbose {
        console.cleaning(name);
    }

    let result = provider.clean(&items);
    tracing::info!(
        provider = name,
        cleaned = result.items_cleaned,
        reclaimed = result.space_reclaimed,
        errors = result.errors.len(),
        "Clean finished"
    );
    console.report(name, &result);

    CleanOutcome::Cleaned(result)
}
