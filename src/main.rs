use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::sync::Arc;

use depsweep::cli::{Cli, Command};
use depsweep::commands;
use depsweep::config::Config;
use depsweep::error::AuditError;
use depsweep::host::Host;

/// Some items could not be cleaned.
const EXIT_PARTIAL_FAILURE: u8 = 5;
/// Unknown language selector.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<AuditError>() {
                Some(AuditError::UnknownLanguage(_)) => {
                    eprintln!("Valid languages: go, node, java, python, php, rust, all");
                    ExitCode::from(EXIT_USAGE)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Command::Completions(args) = &cli.command {
        let mut command = Cli::command();
        clap_complete::generate(args.shell, &mut command, "depsweep", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    let host = Arc::new(Host::current());

    // Dispatch to subcommand
    match cli.command {
        Command::Scan(args) => {
            tracing::info!(?args, "Starting scan");
            commands::scan::run(args, &config, host, cli.quiet)?;
        }
        Command::Clean(args) => {
            tracing::info!(?args, "Starting clean");
            if commands::clean::run(args, host, cli.verbose > 0)? {
                return Ok(ExitCode::from(EXIT_PARTIAL_FAILURE));
            }
        }
        Command::Info(args) => {
            tracing::info!(?args, "Starting info");
            commands::info::run(args, host)?;
        }
        Command::Completions(_) => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("depsweep={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
