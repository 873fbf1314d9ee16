// src/bin/hierank.rs
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use hierank_core::cli::{self, Cli, Commands};
use hierank_core::exit::HierankExit;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    match dispatch(&cli.command) {
        Ok(code) => code.into(),
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("{} {e:#}", "error:".red().bold());
            HierankExit::from_error(&e).into()
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cmd: &Commands) -> Result<HierankExit> {
    match cmd {
        Commands::Rank(args) => cli::handle_rank(args),
        Commands::Validate { input, .. } => cli::handle_validate(input),
    }
}
