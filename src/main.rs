use std::process::ExitCode;

use clap::Parser;

use dailylog::cli::{self, Cli};
use dailylog::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize diagnostics BEFORE any tracing calls
    logging::init_diagnostics(cli.debug, cli.verbose);

    match cli::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", cli::error_message(&e));
            ExitCode::FAILURE
        }
    }
}
