// ============================================================================
// lhe-compare-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: console and optional file logging
//
// Without a log directory the CLI uses env_logger, honouring RUST_LOG. With
// one, a fern dispatch sends the same records to the console and to a
// timestamped file in that directory, with ANSI styling stripped from the
// file copy.
//
// USAGE:
// - RUST_LOG=info: Normal operation logs
// - RUST_LOG=debug (or -v): every external command line and stage result

use crate::error::{CliErrorContext, CliResult};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Name of the log file for a run started now.
pub fn log_file_name() -> String {
    format!("lhe_compare_{}.log", get_timestamp())
}

fn console_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the global logger. Returns the log file path when one is written.
pub fn init_logging(verbose: bool, log_dir: Option<&Path>) -> CliResult<Option<PathBuf>> {
    match log_dir {
        None => {
            let default = if verbose { "debug" } else { "warn" };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
                .format_timestamp(None)
                .try_init()
                .cli_context("Failed to initialize logger")?;
            Ok(None)
        }
        Some(dir) => {
            fs::create_dir_all(dir).cli_with_context(|| {
                format!("Failed to create log directory '{}'", dir.display())
            })?;
            let path = dir.join(log_file_name());
            init_file_logging(&path, console_level(verbose))?;
            Ok(Some(path))
        }
    }
}

fn init_file_logging(path: &Path, console: LevelFilter) -> CliResult<()> {
    let file = fern::log_file(path)
        .cli_with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    let console_dispatch = fern::Dispatch::new()
        .level(console)
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .chain(std::io::stderr());

    let file_dispatch = fern::Dispatch::new()
        .level(LevelFilter::Debug)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                strip_ansi_escapes::strip_str(message.to_string())
            ))
        })
        .chain(file);

    fern::Dispatch::new()
        .chain(console_dispatch)
        .chain(file_dispatch)
        .apply()
        .cli_context("Failed to initialize logger")
}
