//! hims: command line console for the hospital administration API
//!
//! Lists records and drives their lifecycles through the same gates and
//! flows as the list pages. Configuration comes from `.env`, `HIMS_*`
//! environment variables and flags, in increasing priority.

mod cli;
mod commands;
mod logger;
mod output;

use clap::Parser;
use cli::Cli;
use hims_client::ClientError;
use std::process::ExitCode;

/// Exit code for input rejected before any request was sent
const EXIT_REJECTED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let _log_guard = logger::init_logger(cli.log_dir.as_deref(), cli.verbose);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e:#}");
            let rejected = e
                .downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_local);
            if rejected {
                ExitCode::from(EXIT_REJECTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
