// lhe-compare-cli/src/main.rs
//
// Entry point for the lhe-compare binary.
//
// Responsibilities:
// - Parsing command-line arguments.
// - Setting up console logging, plus a log file when requested.
// - Running the comparison through lhe-compare-core.
// - Printing the summary and mapping the outcome to an exit code.

use clap::Parser;
use console::style;
use lhe_compare_cli::error::{EXIT_FAILURE, EXIT_SUCCESS};
use lhe_compare_cli::{Cli, exit_code_for, logging, output, run_compare};
use log::info;
use std::process;

fn main() {
    let cli = Cli::parse();

    let log_path = match logging::init_logging(cli.verbose, cli.log_dir.as_deref()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            process::exit(exit_code_for(&e));
        }
    };
    if let Some(path) = &log_path {
        info!("Log file: {}", path.display());
    }

    let code = match run_compare(&cli) {
        Ok(summary) => {
            if cli.json {
                output::print_json_summary(&summary);
            } else {
                output::print_summary(&summary);
            }
            if summary.succeeded() {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            }
        }
        Err(e) => {
            log::debug!("Run aborted: {:?}", e);
            eprintln!("{} {}", style("Error:").red().bold(), e);
            exit_code_for(&e)
        }
    };

    process::exit(code);
}
