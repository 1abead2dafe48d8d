// ============================================================================
// lhe-compare-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe, ffmpeg and the PSNR comparator
//
// Each collaborator sits behind a trait so the pipeline can be driven by the
// real tools or by in-memory mocks:
// - ProbeExecutor: frame dimensions of the input's first video stream
// - FfmpegSpawner / FfmpegProcess: the three transcode passes
// - Comparator: the external quality script
//
// Every invocation captures exit status and diagnostics; nothing is sent to
// /dev/null.

use std::process::{Command, Output};

use crate::error::{CoreResult, command_failed_error, command_start_error};
use crate::logging::log_command;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Comparator trait and the script-backed implementation
pub mod comparator;

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

#[cfg(all(test, unix))]
pub(crate) mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use comparator::{Comparator, ComparisonOutput, ComparisonRequest, ScriptComparator};
pub use ffmpeg_executor::{
    FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner, TranscodeOutcome,
    TranscodeProgress, run_transcode,
};
pub use ffprobe_executor::{FfprobeCommandExecutor, ProbeExecutor};

// ============================================================================
// COMMAND EXECUTION
// ============================================================================

/// Runs `cmd` to completion and returns its captured output.
///
/// A nonzero exit status is an error carrying the tool's stderr. `label`
/// names the tool in error messages.
pub(crate) fn run_command(cmd: &mut Command, label: &str) -> CoreResult<Output> {
    log_command(cmd);

    let output = cmd.output().map_err(|e| {
        log::error!("Failed to execute {}: {}", label, e);
        command_start_error(label, e)
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::error!("{} failed with {}: {}", label, output.status, stderr);
        return Err(command_failed_error(label, output.status, stderr));
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_run_command_echo() {
        let mut cmd = Command::new("echo");
        cmd.arg("test");
        let output = run_command(&mut cmd, "echo").unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "test");
    }

    #[test]
    fn test_run_command_nonzero_exit() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo broken >&2; exit 3"]);
        match run_command(&mut cmd, "sh") {
            Err(CoreError::CommandFailed { command, status, stderr }) => {
                assert_eq!(command, "sh");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_run_command_missing_binary() {
        let mut cmd = Command::new("/nonexistent/tool-for-lhe-compare");
        assert!(matches!(
            run_command(&mut cmd, "tool"),
            Err(CoreError::CommandStart(..))
        ));
    }
}
