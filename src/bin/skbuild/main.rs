//! skbuild CLI - configure, build and stage Skia

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skbuild::core::ConfigError;
use skbuild::util::ProcessError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Exit status for a failed run.
///
/// A failing tool's own exit code is passed through; invalid configuration
/// exits with 2 like a usage error.
fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(process_err) = err.downcast_ref::<ProcessError>() {
        return process_err.exit_code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    1
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("skbuild=debug")
    } else {
        EnvFilter::new("skbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Some(Commands::Build(args)) => commands::build::execute(args),
        Some(Commands::Plan(args)) => commands::plan::execute(args),
        Some(Commands::Stage(args)) => commands::stage::execute(args),
        Some(Commands::Sync(args)) => commands::sync::execute(args),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::build::execute(cli.build),
    }
}
