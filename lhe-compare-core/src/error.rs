// ============================================================================
// lhe-compare-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the comparison pipeline
//
// Every fallible operation in the crate returns `CoreResult<T>`. Errors raised
// while a pipeline stage runs are wrapped in `CoreError::StageFailed` so the
// caller can always tell which stage broke.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::stage::Stage;

/// Unified error type for lhe-compare-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Video information error: {0}")]
    VideoInfo(String),

    #[error("Failed to parse JSON output: {0}")]
    JsonParse(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed waiting for '{0}': {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Expected output was not produced: {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("Failed to remove {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Wraps the error with the stage it was raised in.
    ///
    /// Errors that already carry a stage are returned unchanged.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            already @ CoreError::StageFailed { .. } => already,
            other => CoreError::StageFailed {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage this error was raised in, if known.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CoreError::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Whether the error stems from the caller's input rather than from a
    /// tool or the filesystem. The CLI maps these to a usage exit status.
    pub fn is_usage_error(&self) -> bool {
        match self {
            CoreError::InvalidIdentifier { .. } | CoreError::Config(_) => true,
            CoreError::StageFailed { source, .. } => source.is_usage_error(),
            _ => false,
        }
    }
}

/// Result type for lhe-compare-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds the error for a tool that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds the error for a tool whose exit status could not be collected.
pub fn command_wait_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Builds the error for a tool that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
