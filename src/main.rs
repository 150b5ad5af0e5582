//! Souk CLI

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod cli;

#[expect(
    clippy::print_stderr,
    reason = "logging is unavailable when the subscriber fails to install"
)]
fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli::logging::init_subscriber(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");
        return ExitCode::FAILURE;
    }

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}
