// ============================================================================
// lhe-compare-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes, and `run_transcode`, which drives one TranscodeJob to completion
// and turns its exit status and log output into a structured result.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::{Duration, Instant};

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use crate::config::DEFAULT_FFMPEG;
use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::logging::describe_command;
use crate::stage::TranscodeStep;
use crate::transcode::TranscodeJob;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner: Sync {
    type Process: FfmpegProcess;

    /// Spawns ffmpeg with the job's arguments.
    fn spawn(&self, job: &TranscodeJob) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e: anyhow::Error| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            command_wait_error(
                "ffmpeg",
                std::io::Error::other(format!("event stream unavailable: {e}")),
            )
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone)]
pub struct SidecarSpawner {
    ffmpeg_path: PathBuf,
}

impl Default for SidecarSpawner {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

impl SidecarSpawner {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, job: &TranscodeJob) -> CoreResult<Self::Process> {
        let mut cmd = FfmpegCommand::new_with_path(&self.ffmpeg_path);
        cmd.args(&job.args);
        log::debug!(
            "Running {}: {}",
            job.step,
            describe_command(&self.ffmpeg_path, &job.args)
        );
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error(format!("ffmpeg ({})", job.step), e))
    }
}

// --- Transcode driver ---

/// Progress sample reported while a transcode runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeProgress {
    pub step: TranscodeStep,
    pub frame: u32,
    /// Media timestamp reached, as printed by ffmpeg (`HH:MM:SS.xx`)
    pub time: String,
    pub speed: f32,
}

/// Result of a successful transcode.
#[derive(Debug, Clone)]
pub struct TranscodeOutcome {
    pub step: TranscodeStep,
    pub output: PathBuf,
    /// Size of the produced file in bytes
    pub bytes: u64,
    /// Tail of the warning, error and untagged lines ffmpeg printed
    pub diagnostics: Vec<String>,
    pub elapsed: Duration,
}

/// Runs `job` to completion.
///
/// Fails when ffmpeg cannot be spawned, exits nonzero, or exits cleanly
/// without leaving a non-empty output file behind.
pub fn run_transcode<S, P>(spawner: &S, job: &TranscodeJob, mut on_progress: P) -> CoreResult<TranscodeOutcome>
where
    S: FfmpegSpawner,
    P: FnMut(TranscodeProgress),
{
    let started = Instant::now();
    let label = format!("ffmpeg ({})", job.step);
    let mut process = spawner.spawn(job)?;
    let mut diagnostics = Vec::new();

    process.handle_events(|event| {
        match event {
            FfmpegEvent::Progress(progress) => on_progress(TranscodeProgress {
                step: job.step,
                frame: progress.frame,
                time: progress.time,
                speed: progress.speed,
            }),
            FfmpegEvent::Log(LogLevel::Warning, line) => {
                log::warn!("{}: {}", label, line);
                push_diagnostic(&mut diagnostics, line);
            }
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line)
            | FfmpegEvent::Error(line) => {
                log::debug!("{}: {}", label, line);
                push_diagnostic(&mut diagnostics, line);
            }
            // Builds that print without a `[level]` prefix report their errors here
            FfmpegEvent::Log(LogLevel::Unknown, line) => {
                log::debug!("{}: {}", label, line);
                push_diagnostic(&mut diagnostics, line);
            }
            FfmpegEvent::Log(_, line) => log::trace!("{}: {}", label, line),
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        log::error!("{} failed: {}", label, status);
        return Err(command_failed_error(label, status, diagnostics.join("\n")));
    }

    let bytes = output_size(&job.output)?;
    log::debug!(
        "{} produced {} ({} bytes) in {:.2?}",
        label,
        job.output.display(),
        bytes,
        started.elapsed()
    );

    Ok(TranscodeOutcome {
        step: job.step,
        output: job.output.clone(),
        bytes,
        diagnostics,
        elapsed: started.elapsed(),
    })
}

/// Most diagnostic lines kept per transcode; older lines are dropped first.
const MAX_DIAGNOSTIC_LINES: usize = 64;

fn push_diagnostic(diagnostics: &mut Vec<String>, line: String) {
    if diagnostics.len() == MAX_DIAGNOSTIC_LINES {
        diagnostics.remove(0);
    }
    diagnostics.push(line);
}

fn output_size(path: &Path) -> CoreResult<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(meta.len()),
        Ok(_) => Err(CoreError::MissingOutput(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CoreError::MissingOutput(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}
