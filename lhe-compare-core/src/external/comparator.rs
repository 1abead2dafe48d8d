//! The external quality comparator.
//!
//! The comparator is an opaque program (by default the `psnr.py` script run
//! under Python 2) that receives
//! `[--num <frames>] <original dump> <width> <height> <format tag> <round-trip dump>`
//! and prints its metrics on stdout.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::config::DEFAULT_COMPARATOR;
use crate::error::{CoreError, CoreResult};
use crate::format::PixelFormatTag;
use crate::probe::Dimensions;

use super::run_command;

/// Inputs of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub original_dump: PathBuf,
    pub round_trip_dump: PathBuf,
    /// `None` when probing was skipped or failed in best-effort mode; the
    /// comparator then receives empty width and height arguments.
    pub dimensions: Option<Dimensions>,
    pub format_tag: PixelFormatTag,
    /// Frame limit passed as `--num`; `None` compares every frame.
    pub frames: Option<u32>,
}

impl ComparisonRequest {
    /// Every argument appended to the comparator command.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = Vec::with_capacity(7);
        if let Some(frames) = self.frames {
            args.push("--num".into());
            args.push(frames.to_string().into());
        }
        args.extend(self.positional_args());
        args
    }

    /// The five positional arguments, in the order the comparator expects.
    pub fn positional_args(&self) -> [OsString; 5] {
        let (width, height) = match self.dimensions {
            Some(d) => (d.width.to_string(), d.height.to_string()),
            None => (String::new(), String::new()),
        };
        [
            self.original_dump.clone().into_os_string(),
            width.into(),
            height.into(),
            self.format_tag.as_str().into(),
            self.round_trip_dump.clone().into_os_string(),
        ]
    }
}

/// What the comparator printed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonOutput {
    pub stdout: String,
    pub stderr: String,
}

pub trait Comparator: Sync {
    fn compare(&self, request: &ComparisonRequest) -> CoreResult<ComparisonOutput>;
}

/// Runs a comparator program with its leading arguments.
#[derive(Debug, Clone)]
pub struct ScriptComparator {
    command: Vec<String>,
}

impl Default for ScriptComparator {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMPARATOR.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScriptComparator {
    /// `command` is the program followed by any fixed leading arguments.
    pub fn new(command: Vec<String>) -> CoreResult<Self> {
        if command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(CoreError::Config(
                "comparator command must not be empty".to_string(),
            ));
        }
        Ok(Self { command })
    }

    fn build(&self, request: &ComparisonRequest) -> Command {
        let mut cmd = Command::new(&self.command[0]);
        cmd.args(&self.command[1..]);
        cmd.args(request.args());
        cmd
    }
}

impl Comparator for ScriptComparator {
    fn compare(&self, request: &ComparisonRequest) -> CoreResult<ComparisonOutput> {
        let output = run_command(&mut self.build(request), "comparator")?;
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            log::warn!("comparator: {}", line);
        }
        Ok(ComparisonOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }
}
