//! Subcommand implementations.

pub mod clean;
pub mod info;
pub mod scan;
