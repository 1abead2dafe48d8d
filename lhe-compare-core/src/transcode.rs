//! Argument profiles for the three transcoder passes.
//!
//! A [`TranscodeJob`] is plain data: which step it is, what it reads, what it
//! writes and the exact ffmpeg arguments. Spawning is left to an
//! [`FfmpegSpawner`](crate::external::FfmpegSpawner).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::artifacts::ArtifactSet;
use crate::config::{CoreConfig, LHE_INPUT_PIX_FMT};
use crate::stage::TranscodeStep;

/// A single ffmpeg invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob {
    pub step: TranscodeStep,
    pub input: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

/// Collects ffmpeg arguments in order.
#[derive(Debug, Default)]
struct ArgList(Vec<OsString>);

impl ArgList {
    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.0.push(arg.into());
        self
    }

    fn pair(self, flag: &str, value: impl Into<OsString>) -> Self {
        self.arg(flag).arg(value)
    }

    fn input(self, path: &Path) -> Self {
        self.pair("-i", path.as_os_str())
    }
}

fn common_prefix() -> ArgList {
    ArgList::default().arg("-hide_banner").arg("-y")
}

impl TranscodeJob {
    /// Builds the job for `step` against `artifacts`.
    pub fn for_step(step: TranscodeStep, artifacts: &ArtifactSet, config: &CoreConfig) -> Self {
        match step {
            TranscodeStep::OriginalDump => Self::raw_dump(
                step,
                &artifacts.input,
                &artifacts.original_dump,
                config.format_tag.ffmpeg_pix_fmt(),
            ),
            TranscodeStep::Encode => Self::lhe_encode(
                &artifacts.input,
                &artifacts.encoded,
                &config.lhe_codec,
                &config.lhe_container,
            ),
            TranscodeStep::RoundTripDump => Self::raw_dump(
                step,
                &artifacts.encoded,
                &artifacts.round_trip_dump,
                config.format_tag.ffmpeg_pix_fmt(),
            ),
        }
    }

    fn raw_dump(step: TranscodeStep, input: &Path, output: &Path, pix_fmt: &str) -> Self {
        let args = common_prefix()
            .input(input)
            .pair("-f", "rawvideo")
            .pair("-pix_fmt", pix_fmt)
            .arg(output.as_os_str())
            .0;
        Self {
            step,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            args,
        }
    }

    fn lhe_encode(input: &Path, output: &Path, codec: &str, container: &str) -> Self {
        let args = common_prefix()
            .input(input)
            .pair("-pix_fmt", LHE_INPUT_PIX_FMT)
            .pair("-c:v", codec)
            .pair("-f", container)
            .arg(output.as_os_str())
            .0;
        Self {
            step: TranscodeStep::Encode,
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            args,
        }
    }

    /// Arguments as UTF-8 text, lossily converted.
    #[cfg(test)]
    pub(crate) fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Identifier;
    use crate::format::PixelFormatTag;

    fn jobs(config: &CoreConfig) -> Vec<TranscodeJob> {
        let id = Identifier::parse("sample").unwrap();
        let artifacts = ArtifactSet::new(Path::new("files"), &id);
        TranscodeStep::ALL
            .iter()
            .map(|step| TranscodeJob::for_step(*step, &artifacts, config))
            .collect()
    }

    #[test]
    fn test_default_profiles() {
        let jobs = jobs(&CoreConfig::default());

        assert_eq!(
            jobs[0].args_lossy(),
            vec![
                "-hide_banner", "-y", "-i", "files/sample.mp4", "-f", "rawvideo", "-pix_fmt",
                "yuv420p", "files/sample_orig.yuv",
            ]
        );
        assert_eq!(
            jobs[1].args_lossy(),
            vec![
                "-hide_banner", "-y", "-i", "files/sample.mp4", "-pix_fmt", "yuv420p", "-c:v",
                "mlhe", "-f", "mlhe", "files/sample.mlhe",
            ]
        );
        assert_eq!(
            jobs[2].args_lossy(),
            vec![
                "-hide_banner", "-y", "-i", "files/sample.mlhe", "-f", "rawvideo", "-pix_fmt",
                "yuv420p", "files/sample_lhe.yuv",
            ]
        );
    }

    #[test]
    fn test_output_is_last_argument() {
        for job in jobs(&CoreConfig::default()) {
            assert_eq!(job.args.last().map(PathBuf::from), Some(job.output.clone()));
        }
    }

    #[test]
    fn test_format_tag_changes_dump_pix_fmt_only() {
        let mut config = CoreConfig::default();
        config.format_tag = PixelFormatTag::Yuy2;
        let jobs = jobs(&config);

        assert!(jobs[0].args_lossy().contains(&"yuyv422".to_string()));
        assert!(jobs[2].args_lossy().contains(&"yuyv422".to_string()));
        assert!(!jobs[1].args_lossy().contains(&"yuyv422".to_string()));
    }
}
