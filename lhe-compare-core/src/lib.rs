//! Core library for comparing a video against its LHE round trip.
//!
//! A run takes an identifier naming `<work_dir>/<identifier>.mp4`, probes the
//! stream dimensions with ffprobe, removes stale intermediates, runs ffmpeg
//! three times (raw dump of the original, LHE encode, raw dump of the decoded
//! LHE stream) and finally hands both raw dumps to an external PSNR
//! comparator.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use lhe_compare_core::{CoreConfigBuilder, FailurePolicy, PipelineRunner};
//!
//! let config = CoreConfigBuilder::new()
//!     .work_dir("files")
//!     .comparator(["python2", "psnr.py"])
//!     .failure_policy(FailurePolicy::FailFast)
//!     .build();
//! config.validate().unwrap();
//!
//! let runner = PipelineRunner::from_config(config).unwrap();
//! let summary = runner.run("foreman_qcif").unwrap();
//! if let Some(report) = summary.report {
//!     println!("PSNR(Y) = {:?}", report.psnr_y);
//! }
//! ```

pub mod artifacts;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod stage;
pub mod transcode;
pub mod yuv;

// Re-exports for public API
pub use artifacts::{ArtifactSet, Identifier};
pub use config::{CoreConfig, CoreConfigBuilder, FailurePolicy};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler, JsonEventHandler};
pub use external::{
    Comparator, ComparisonOutput, ComparisonRequest, FfmpegProcess, FfmpegSpawner,
    FfprobeCommandExecutor, ProbeExecutor, ScriptComparator, SidecarProcess, SidecarSpawner,
    TranscodeOutcome, TranscodeProgress,
};
pub use format::PixelFormatTag;
pub use pipeline::{PipelineRunner, RunSummary, StageResult, StageStatus};
pub use probe::Dimensions;
pub use report::{PlanePsnr, QualityReport};
pub use stage::{Stage, TranscodeStep};
pub use yuv::RawDumpInfo;

/// Runs one comparison with the real external tools named in `config`.
pub fn run_comparison(
    config: CoreConfig,
    identifier: &str,
    events: EventDispatcher,
) -> CoreResult<RunSummary> {
    config.validate()?;
    PipelineRunner::from_config(config)?
        .with_events(events)
        .run(identifier)
}
