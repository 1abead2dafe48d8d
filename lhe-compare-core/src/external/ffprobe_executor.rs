//! FFprobe integration for reading frame dimensions.
//!
//! Only the first video stream's width and height are requested; the JSON
//! writer is used so the result can be deserialized instead of scraped.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::DEFAULT_FFPROBE;
use crate::error::CoreResult;
use crate::probe::{Dimensions, parse_stream_dimensions};

use super::run_command;

/// Something that can report the dimensions of a video file.
pub trait ProbeExecutor: Sync {
    fn probe_dimensions(&self, input: &Path) -> CoreResult<Dimensions>;
}

/// Runs the ffprobe binary.
#[derive(Debug, Clone)]
pub struct FfprobeCommandExecutor {
    ffprobe_path: PathBuf,
}

impl Default for FfprobeCommandExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_FFPROBE)
    }
}

impl FfprobeCommandExecutor {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.ffprobe_path);
        cmd.args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "json",
            "--",
        ]);
        cmd.arg(input);
        cmd
    }
}

impl ProbeExecutor for FfprobeCommandExecutor {
    fn probe_dimensions(&self, input: &Path) -> CoreResult<Dimensions> {
        log::debug!("Probing dimensions of {}", input.display());
        let output = run_command(&mut self.command(input), "ffprobe")?;
        let dims = parse_stream_dimensions(&output.stdout)?;
        log::debug!("{} is {}", input.display(), dims);
        Ok(dims)
    }
}
