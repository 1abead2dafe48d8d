//! Configuration structures and constants for the lhe-compare-core library.
//!
//! The working directory, tool locations and the encode profile are explicit
//! values here rather than being implied by where the process was started.

mod builder;

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::format::PixelFormatTag;

pub use builder::CoreConfigBuilder;

/// Directory holding inputs and intermediates, relative to the invocation directory.
pub const DEFAULT_WORK_DIR: &str = "files";

/// Stream probe binary.
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Transcoder binary. Must be a build that ships the LHE encoder.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Comparator command line; the five positional arguments are appended.
pub const DEFAULT_COMPARATOR: [&str; 2] = ["python2", "psnr.py"];

/// Video codec used for the `.mlhe` re-encode.
pub const DEFAULT_LHE_CODEC: &str = "mlhe";

/// Container format of the `.mlhe` re-encode.
pub const DEFAULT_LHE_CONTAINER: &str = "mlhe";

/// Pixel format fed to the LHE encoder.
pub const LHE_INPUT_PIX_FMT: &str = "yuv420p";

/// What a run does when a stage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure and report its stage.
    #[default]
    FailFast,
    /// Run every stage regardless, recording each failure.
    BestEffort,
}

/// Main configuration structure for the lhe-compare-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use lhe_compare_core::config::{CoreConfigBuilder, FailurePolicy};
///
/// let config = CoreConfigBuilder::new()
///     .work_dir("files")
///     .ffmpeg_path("/opt/lhe/bin/ffmpeg")
///     .comparator(["python2", "tools/psnr.py"])
///     .failure_policy(FailurePolicy::FailFast)
///     .build();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing `<id>.mp4` and receiving every intermediate
    pub work_dir: PathBuf,

    /// ffprobe executable
    pub ffprobe_path: PathBuf,

    /// ffmpeg executable
    pub ffmpeg_path: PathBuf,

    /// Program and leading arguments of the quality comparator
    pub comparator: Vec<String>,

    /// Layout of the raw dumps, also passed to the comparator
    pub format_tag: PixelFormatTag,

    /// Encoder name for the `.mlhe` pass
    pub lhe_codec: String,

    /// Muxer name for the `.mlhe` pass
    pub lhe_container: String,

    pub failure_policy: FailurePolicy,

    /// Run the original dump alongside the encode/decode chain
    pub parallel_dumps: bool,

    /// Compare only the first N frames (the comparator's `--num`)
    pub frames: Option<u32>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
            comparator: DEFAULT_COMPARATOR.iter().map(|s| s.to_string()).collect(),
            format_tag: PixelFormatTag::default(),
            lhe_codec: DEFAULT_LHE_CODEC.to_string(),
            lhe_container: DEFAULT_LHE_CONTAINER.to_string(),
            failure_policy: FailurePolicy::default(),
            parallel_dumps: false,
            frames: None,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with defaults for everything but the working directory.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Default::default()
        }
    }

    /// Checks the configuration before any stage runs.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.work_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "working directory '{}' does not exist or is not a directory",
                self.work_dir.display()
            )));
        }

        for (name, path) in [("ffprobe", &self.ffprobe_path), ("ffmpeg", &self.ffmpeg_path)] {
            if path.as_os_str().is_empty() {
                return Err(CoreError::Config(format!("{name} path must not be empty")));
            }
        }

        match self.comparator.first() {
            Some(program) if !program.trim().is_empty() => {}
            _ => {
                return Err(CoreError::Config(
                    "comparator command must not be empty".to_string(),
                ));
            }
        }

        if self.lhe_codec.trim().is_empty() || self.lhe_container.trim().is_empty() {
            return Err(CoreError::Config(
                "LHE codec and container names must not be empty".to_string(),
            ));
        }

        if self.frames == Some(0) {
            return Err(CoreError::Config(
                "frame limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
