// ============================================================================
// lhe-compare-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Every field starts from the defaults in
// config/mod.rs; `build()` does not validate, call `CoreConfig::validate`
// once the working directory is known to exist.

use std::path::PathBuf;

use super::{CoreConfig, FailurePolicy};
use crate::format::PixelFormatTag;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use lhe_compare_core::config::CoreConfigBuilder;
/// use lhe_compare_core::PixelFormatTag;
///
/// let config = CoreConfigBuilder::new()
///     .work_dir("clips")
///     .format_tag(PixelFormatTag::Iyuv)
///     .parallel_dumps(true)
///     .build();
///
/// assert!(config.parallel_dumps);
/// assert_eq!(config.work_dir.to_str(), Some("clips"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory.
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.work_dir = dir.into();
        self
    }

    /// Sets the ffprobe executable.
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    /// Sets the ffmpeg executable.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    /// Sets the comparator program and its leading arguments.
    pub fn comparator<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.comparator = command.into_iter().map(Into::into).collect();
        self
    }

    pub fn format_tag(mut self, tag: PixelFormatTag) -> Self {
        self.config.format_tag = tag;
        self
    }

    /// Sets the encoder used for the `.mlhe` pass.
    pub fn lhe_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.lhe_codec = codec.into();
        self
    }

    /// Sets the muxer used for the `.mlhe` pass.
    pub fn lhe_container(mut self, container: impl Into<String>) -> Self {
        self.config.lhe_container = container.into();
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn parallel_dumps(mut self, enabled: bool) -> Self {
        self.config.parallel_dumps = enabled;
        self
    }

    /// Limits the comparison to the first `frames` frames.
    pub fn frames(mut self, frames: Option<u32>) -> Self {
        self.config.frames = frames;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_builder_overrides() {
        let config = CoreConfigBuilder::new()
            .work_dir("/tmp/work")
            .ffprobe_path("/opt/bin/ffprobe")
            .ffmpeg_path("/opt/bin/ffmpeg")
            .comparator(["python2", "/opt/psnr.py"])
            .format_tag(PixelFormatTag::Nv12)
            .lhe_codec("lhe")
            .lhe_container("mlhe")
            .failure_policy(FailurePolicy::BestEffort)
            .frames(Some(30))
            .build();

        assert_eq!(config.work_dir, Path::new("/tmp/work"));
        assert_eq!(config.ffprobe_path, Path::new("/opt/bin/ffprobe"));
        assert_eq!(config.ffmpeg_path, Path::new("/opt/bin/ffmpeg"));
        assert_eq!(config.comparator, vec!["python2", "/opt/psnr.py"]);
        assert_eq!(config.format_tag, PixelFormatTag::Nv12);
        assert_eq!(config.lhe_codec, "lhe");
        assert_eq!(config.failure_policy, FailurePolicy::BestEffort);
        assert!(!config.parallel_dumps);
        assert_eq!(config.frames, Some(30));
    }

    #[test]
    fn test_builder_defaults_match_core_defaults() {
        let built = CoreConfigBuilder::new().build();
        let default = CoreConfig::default();
        assert_eq!(built.work_dir, default.work_dir);
        assert_eq!(built.comparator, default.comparator);
        assert_eq!(built.lhe_codec, default.lhe_codec);
    }
}
