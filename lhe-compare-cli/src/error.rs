// ============================================================================
// lhe-compare-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses CoreError for everything it reports. This module adds a
// context extension trait for CLI-side failures (log directory setup and the
// like) and the mapping from errors to process exit codes.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - CliErrorContext: Context helpers that produce CoreError
// - exit codes: 0 success, 1 stage failure, 2 usage or configuration error

// ---- Internal crate imports ----
use lhe_compare_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Every stage succeeded.
pub const EXIT_SUCCESS: i32 = 0;
/// A stage failed.
pub const EXIT_FAILURE: i32 = 1;
/// Invalid arguments, identifier or configuration.
pub const EXIT_USAGE: i32 = 2;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Extension trait for adding context to errors in the CLI.
///
/// Failures wrapped this way are reported as configuration errors, since
/// they happen while the CLI sets itself up.
pub trait CliErrorContext<T> {
    /// Add context to an error.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| CoreError::Config(format!("{}: {}", context, e)))
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CoreError::Config(format!("{}: {}", f(), e)))
    }
}

/// Exit code for a run that ended with `err`.
pub fn exit_code_for(err: &CoreError) -> i32 {
    if err.is_usage_error() {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lhe_compare_core::Stage;
    use std::path::PathBuf;

    #[test]
    fn test_context_prefixes_message() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.cli_context("Failed to create log directory").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Failed to create log directory: denied"
        );
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn test_stage_failures_exit_one() {
        let err = CoreError::InputNotFound(PathBuf::from("files/clip.mp4")).in_stage(Stage::Check);
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }

    #[test]
    fn test_invalid_identifier_exits_two() {
        let err = lhe_compare_core::Identifier::parse("-rf").unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }
}
