// lhe-compare-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use lhe_compare_core::PixelFormatTag;
use lhe_compare_core::config::{DEFAULT_LHE_CODEC, DEFAULT_WORK_DIR};
use std::path::PathBuf;
use std::str::FromStr;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "lhe-compare: LHE round-trip quality check",
    long_about = "Dumps <IDENTIFIER>.mp4 to raw YUV, encodes it to LHE, decodes the LHE \
                  stream back to raw YUV and reports the PSNR between the two dumps."
)]
pub struct Cli {
    /// Base name of the input video; <WORK_DIR>/<IDENTIFIER>.mp4 must exist
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Directory holding the input video and all intermediates
    #[arg(short, long, value_name = "DIR", env = "LHE_WORK_DIR", default_value = DEFAULT_WORK_DIR)]
    pub work_dir: PathBuf,

    /// ffmpeg binary with the LHE codec compiled in
    #[arg(long, value_name = "PATH", env = "LHE_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe binary used to read the stream dimensions
    #[arg(long, value_name = "PATH", env = "LHE_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Comparator command line, space separated (default: "python2 psnr.py")
    #[arg(long, value_name = "CMD", env = "LHE_COMPARATOR", value_delimiter = ' ')]
    pub comparator: Option<Vec<String>>,

    /// Raw layout tag handed to the comparator [IYUV|YV12|NV12|UYVY|YVYU|YUY2|422]
    #[arg(long = "format", value_name = "TAG", default_value = "IYUV", value_parser = parse_format_tag)]
    pub format_tag: PixelFormatTag,

    /// Compare only the first N frames (passed to the comparator as --num)
    #[arg(long, value_name = "N")]
    pub frames: Option<u32>,

    /// ffmpeg encoder name for the LHE pass
    #[arg(long, value_name = "NAME", default_value = DEFAULT_LHE_CODEC)]
    pub codec: String,

    /// Keep going after a failed stage instead of stopping
    #[arg(long)]
    pub best_effort: bool,

    /// Run the original dump alongside the encode and round-trip dump
    #[arg(long)]
    pub parallel: bool,

    /// Print machine-readable events and summary as JSON lines on stdout
    #[arg(long)]
    pub json: bool,

    /// Also write a debug log file into this directory
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Show debug logging on the console
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_format_tag(s: &str) -> Result<PixelFormatTag, String> {
    PixelFormatTag::from_str(s).map_err(|e| e.to_string())
}
