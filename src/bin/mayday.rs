//! Mayday CLI binary.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mayday::cli::args::MaydayArgs;
use mayday::cli::commands::execute_command;

fn main() {
    // Parse command line arguments using clap
    let args = MaydayArgs::parse();

    // Map CLI verbosity to the tracing filter; RUST_LOG wins when set
    let default_filter = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Execute the command
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
