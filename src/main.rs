//! rivera - display the git river

use clap::Parser;
use rivera::cli;
use rivera::graph::GraphError;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status for an internal graph error (EX_SOFTWARE).
const EXIT_INTERNAL: u8 = 70;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over --log-level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(graph_err) = err.downcast_ref::<GraphError>() {
                eprintln!("rivera: internal graph error: {}", graph_err);
                return ExitCode::from(EXIT_INTERNAL);
            }
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
