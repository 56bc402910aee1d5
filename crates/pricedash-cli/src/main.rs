use pricedash_core::logging;

mod cli;
mod server;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Prefer the log file; a read-only state dir should not stop the CLI.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("pricedash error: {:#}", err);
        std::process::exit(1);
    }
}
