//! Terminal implementation of [`CleanConsole`].

use humansize::{format_size, BINARY};
use std::io::{self, BufRead, Write};

use super::confirm::read_confirmation;
use super::orchestrator::CleanConsole;
use crate::provider::{CleanResult, CleanableItem};

/// Writes to `output`, reads confirmations from `input`.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn emit(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(error = %err, "Failed to write console output");
        }
    }

    fn write_item(out: &mut W, item: &CleanableItem) -> io::Result<()> {
        writeln!(out, "  🗑️  {}", item.description)?;
        match &item.command {
            Some(command) => writeln!(out, "      Command: {}", command)?,
            None => writeln!(out, "      Path: {}", item.path.display())?,
        }
        if item.size_bytes > 0 {
            writeln!(out, "      Size: {}", format_size(item.size_bytes, BINARY))?;
        }
        if !item.safe {
            writeln!(out, "      ⚠️  WARNING: This item requires careful consideration")?;
        }
        Ok(())
    }

    fn write_preview(
        &mut self,
        provider: &str,
        items: &[CleanableItem],
        total_size: u64,
    ) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "[DRY RUN] Clean preview: {}", provider)?;
        writeln!(out)?;
        writeln!(out, "The following items would be cleaned:")?;
        writeln!(out)?;
        for item in items {
            Self::write_item(out, item)?;
            writeln!(out)?;
        }
        writeln!(out, "Total space to reclaim: {}", format_size(total_size, BINARY))?;
        writeln!(out, "Run without --dry-run to execute cleaning.")?;
        out.flush()
    }

    fn write_unsafe_warning(&mut self, unsafe_items: &[&CleanableItem]) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "⚠️  WARNING: Some items require careful consideration!")?;
        for item in unsafe_items {
            writeln!(
                out,
                "  • {} ({}) is shared by other projects and will be re-downloaded on demand",
                item.description,
                item.path.display()
            )?;
        }
        Ok(())
    }

    fn write_prompt(&mut self, items: &[CleanableItem], total_size: u64) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        writeln!(out, "You are about to clean:")?;
        for item in items {
            if item.size_bytes > 0 {
                writeln!(out, "  • {} ({})", item.description, format_size(item.size_bytes, BINARY))?;
            } else {
                writeln!(out, "  • {}", item.description)?;
            }
        }
        writeln!(out)?;
        writeln!(out, "Total: {} will be reclaimed", format_size(total_size, BINARY))?;
        write!(out, "Do you want to continue? [y/N]: ")?;
        out.flush()
    }

    fn write_report(&mut self, provider: &str, result: &CleanResult) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out)?;
        if result.items_cleaned == 0 {
            writeln!(out, "❌ No items were cleaned for {}.", provider)?;
        } else {
            writeln!(
                out,
                "✅ Cleaned {} item{} for {}",
                result.items_cleaned,
                if result.items_cleaned == 1 { "" } else { "s" },
                provider
            )?;
            writeln!(
                out,
                "Total space reclaimed: {}",
                format_size(result.space_reclaimed, BINARY)
            )?;
        }
        if result.has_errors() {
            writeln!(out)?;
            writeln!(out, "⚠️  Errors encountered:")?;
            for err in &result.errors {
                writeln!(out, "  • {}", err)?;
            }
        }
        out.flush()
    }
}

impl<R: BufRead, W: Write> CleanConsole for TerminalConsole<R, W> {
    fn nothing_to_clean(&mut self, provider: &str) {
        let written = writeln!(self.output, "No cleanable items found for {}", provider);
        self.emit(written);
    }

    fn preview(&mut self, provider: &str, items: &[CleanableItem], total_size: u64) {
        let written = self.write_preview(provider, items, total_size);
        self.emit(written);
    }

    fn unsafe_warning(&mut self, _provider: &str, unsafe_items: &[&CleanableItem]) {
        let written = self.write_unsafe_warning(unsafe_items);
        self.emit(written);
    }

    fn confirm(&mut self, _provider: &str, items: &[CleanableItem], total_size: u64) -> bool {
        let written = self.write_prompt(items, total_size);
        self.emit(written);
        read_confirmation(&mut self.input)
    }

    fn cleaning(&mut self, provider: &str) {
        let written = writeln!(self.output, "Cleaning {}...", provider);
        self.emit(written);
    }

    fn declined(&mut self, _provider: &str) {
        let written = writeln!(self.output, "Cleaning cancelled.");
        self.emit(written);
    }

    fn report(&mut self, provider: &str, result: &CleanResult) {
        let written = self.write_report(provider, result);
        self.emit(written);
    }
}
