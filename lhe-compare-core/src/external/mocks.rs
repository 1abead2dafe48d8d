// lhe-compare-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use std::collections::HashMap;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;

use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel};

use super::comparator::{Comparator, ComparisonOutput, ComparisonRequest};
use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use super::ffprobe_executor::ProbeExecutor;
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::probe::Dimensions;
use crate::stage::TranscodeStep;
use crate::transcode::TranscodeJob;

fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code << 8)
}

fn progress_event(frame: u32) -> FfmpegEvent {
    FfmpegEvent::Progress(FfmpegProgress {
        frame,
        fps: 25.0,
        q: 0.0,
        size_kb: 0,
        time: "00:00:00.04".to_string(),
        bitrate_kbps: 0.0,
        speed: 1.0,
        raw_log_message: String::new(),
    })
}

/// Mock implementation of FfmpegProcess.
pub struct MockFfmpegProcess {
    events: Vec<FfmpegEvent>,
    exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// How the mock answers a transcode step.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Writes `bytes` zero bytes to the job's output and exits 0.
    Produce(u64),
    /// Exits with `code` after printing `message` at the given level.
    Fail(i32, LogLevel, String),
    /// The binary cannot be started.
    SpawnError,
}

impl MockBehavior {
    pub fn produce(bytes: u64) -> Self {
        MockBehavior::Produce(bytes)
    }

    pub fn fail(code: i32, message: &str) -> Self {
        MockBehavior::Fail(code, LogLevel::Error, message.to_string())
    }

    /// Fails with a stderr line that carries no `[level]` prefix.
    pub fn fail_untagged(code: i32, message: &str) -> Self {
        MockBehavior::Fail(code, LogLevel::Unknown, message.to_string())
    }
}

/// Mock implementation of FfmpegSpawner keyed by transcode step.
///
/// Steps without a configured behavior produce a single frame of QCIF 4:2:0.
#[derive(Default)]
pub struct MockFfmpegSpawner {
    behaviors: Mutex<HashMap<TranscodeStep, MockBehavior>>,
    received_calls: Mutex<Vec<TranscodeJob>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, step: TranscodeStep, behavior: MockBehavior) {
        self.behaviors.lock().unwrap().insert(step, behavior);
    }

    pub fn calls(&self) -> Vec<TranscodeJob> {
        self.received_calls.lock().unwrap().clone()
    }

    pub fn steps(&self) -> Vec<TranscodeStep> {
        self.calls().iter().map(|job| job.step).collect()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, job: &TranscodeJob) -> CoreResult<Self::Process> {
        self.received_calls.lock().unwrap().push(job.clone());

        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .get(&job.step)
            .cloned()
            .unwrap_or(MockBehavior::Produce(38_016));

        match behavior {
            MockBehavior::Produce(bytes) => {
                std::fs::write(&job.output, vec![0u8; bytes as usize])?;
                Ok(MockFfmpegProcess {
                    events: vec![progress_event(1)],
                    exit_status: exit_status(0),
                })
            }
            MockBehavior::Fail(code, level, message) => Ok(MockFfmpegProcess {
                events: vec![FfmpegEvent::Log(level, message)],
                exit_status: exit_status(code),
            }),
            MockBehavior::SpawnError => Err(command_start_error(
                format!("ffmpeg ({})", job.step),
                std::io::Error::new(std::io::ErrorKind::NotFound, "mock: no such binary"),
            )),
        }
    }
}

/// Probe that returns fixed dimensions, or an error when none are set.
pub struct MockProbe {
    dimensions: Option<Dimensions>,
    received_calls: Mutex<Vec<PathBuf>>,
}

impl MockProbe {
    pub fn returning(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some(Dimensions { width, height }),
            received_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            dimensions: None,
            received_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.received_calls.lock().unwrap().clone()
    }
}

impl ProbeExecutor for MockProbe {
    fn probe_dimensions(&self, input: &Path) -> CoreResult<Dimensions> {
        self.received_calls.lock().unwrap().push(input.to_path_buf());
        self.dimensions
            .ok_or_else(|| CoreError::VideoInfo("mock: no video stream found".to_string()))
    }
}

/// Comparator that records its arguments and prints a canned report.
pub struct MockComparator {
    stdout: String,
    exit_code: i32,
    received_calls: Mutex<Vec<Vec<String>>>,
}

impl MockComparator {
    pub fn reporting(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            exit_code: 0,
            received_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn exiting(code: i32) -> Self {
        Self {
            stdout: String::new(),
            exit_code: code,
            received_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.received_calls.lock().unwrap().clone()
    }
}

impl Comparator for MockComparator {
    fn compare(&self, request: &ComparisonRequest) -> CoreResult<ComparisonOutput> {
        let args = request
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        self.received_calls.lock().unwrap().push(args);

        if self.exit_code != 0 {
            return Err(command_failed_error(
                "comparator",
                exit_status(self.exit_code),
                "mock: comparison failed",
            ));
        }
        Ok(ComparisonOutput {
            stdout: self.stdout.clone(),
            stderr: String::new(),
        })
    }
}
