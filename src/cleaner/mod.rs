//! Cache reclamation.
//!
//! This module provides:
//! - Sequential, failure-isolated execution of cleanable items
//! - The preview / confirm / execute workflow for one provider
//! - A terminal console that renders the workflow and asks for confirmation

mod confirm;
mod console;
mod executor;
mod orchestrator;

pub use confirm::{is_affirmative, read_confirmation};
pub use console::TerminalConsole;
pub use executor::clean_items;
pub use orchestrator::{run_clean, CleanConsole, CleanOutcome};
