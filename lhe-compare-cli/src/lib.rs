// lhe-compare-cli/src/lib.rs
//
// Library portion of the lhe-compare CLI application.
// Contains argument definitions, logging setup and presentation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::run::run_compare;
pub use error::{CliErrorContext, CliResult, exit_code_for};
