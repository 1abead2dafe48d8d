//! Command implementations for the CLI.

/// The comparison run, the only thing the binary does.
pub mod run;
