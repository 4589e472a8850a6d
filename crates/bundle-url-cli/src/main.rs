use bundle_url_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; an unwritable state dir must not
    // stop a decode, so fall back to stderr.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch. Usage errors exit with status 2 inside clap.
    if let Err(err) = Cli::run_from_args() {
        tracing::debug!("command failed: {:#}", err);
        eprintln!("bundle-url error: {:#}", err);
        std::process::exit(1);
    }
}
