mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use docweave_core::DocweaveError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let operation = cli.command.name();
    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(core) = err.downcast_ref::<DocweaveError>() {
                let payload = core.to_payload(operation);
                if let Ok(raw) = serde_json::to_string(&payload) {
                    eprintln!("{raw}");
                }
            }
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

// Logs go to stderr so stdout stays pure JSON.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
