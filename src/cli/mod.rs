//! Command line interface for nipkg.
//!
//! This module provides argument parsing, logger setup, command dispatch and
//! user feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, BuildArgs, Command, PackagerArg, RuntimeConfig};
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose());
    args.validate()?;

    let runtime = RuntimeConfig::from(&args);
    match &args.command {
        Command::Build(build) => commands::build(build, &runtime).await,
        Command::Init => commands::init(&runtime).await,
    }
}

/// Initializes `env_logger`: info by default, debug with `--verbose`, `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
