use ytfs_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Log to the state dir; stderr if it cannot be opened.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {e:#}");
    }

    if let Err(err) = Cli::run_from_args().await {
        eprintln!("ytfs error: {:#}", err);
        std::process::exit(1);
    }
}
