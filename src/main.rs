// This is the primary entry point for the heicsan command-line tool.
// The lib.rs file serves only as a public API for external consumers.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use heicsan::cli::{Cli, Command};
use heicsan::commands::{run_convert, run_sanitize, run_strip};

fn main() -> ExitCode {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let cli = Cli::parse();
    debug!("Parsed command: {:?}", cli.command);

    let result = match &cli.command {
        Command::Sanitize(args) => run_sanitize(args),
        Command::Convert(args) => run_convert(args),
        Command::Strip(args) => run_strip(args),
    };

    match result {
        // Per-file errors are already reported inside the run and do not
        // fail the process; only pre-loop validation errors land here.
        Ok(_summary) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
