use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::MAX_JOBS;

/// depsweep - audit language toolchains and reclaim their caches
#[derive(Parser, Debug)]
#[command(name = "depsweep")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "DEPSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Detect installed toolchains and measure their caches
    Scan(ScanArgs),

    /// Reclaim disk space from one language's caches
    Clean(CleanArgs),

    /// Show installation, environment and cache details for one language
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Languages to scan: "all" or a comma-separated list
    #[arg(short, long, value_name = "LANGS")]
    pub lang: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Parallel scan threads (0 = one per language)
    #[arg(
        short,
        long,
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(0..=MAX_JOBS as u64)
    )]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Language to clean, or "all"
    #[arg(value_name = "LANG")]
    pub lang: String,

    /// Show what would be cleaned without doing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Language to describe
    #[arg(value_name = "LANG")]
    pub lang: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
