// ============================================================================
// lhe-compare-core/src/pipeline.rs
// ============================================================================
//
// PIPELINE: Check -> Clean -> Transcode x3 -> Compare
//
// PipelineRunner owns the three external collaborators and walks the stages
// in order. Each stage result is recorded; under FailurePolicy::FailFast the
// first failure ends the run with an error naming the stage, under
// FailurePolicy::BestEffort every stage still runs and the failures are
// collected in the RunSummary.
//
// Cleanup always completes before any transcode starts, and both raw dumps
// are complete before the comparator is invoked, including when the original
// dump runs alongside the encode chain.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::artifacts::{ArtifactSet, Identifier};
use crate::cleanup::remove_stale;
use crate::config::{CoreConfig, FailurePolicy};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher};
use crate::external::{
    Comparator, ComparisonRequest, FfmpegSpawner, FfprobeCommandExecutor, ProbeExecutor,
    ScriptComparator, SidecarSpawner, TranscodeOutcome, run_transcode,
};
use crate::probe::Dimensions;
use crate::report::QualityReport;
use crate::stage::{Stage, TranscodeStep};
use crate::transcode::TranscodeJob;
use crate::yuv::{RawDumpInfo, pair_warnings};

/// How a stage ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum StageStatus {
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageResult {
    pub stage: Stage,
    pub status: StageStatus,
}

/// Everything a run found out.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub identifier: Identifier,
    pub artifacts: ArtifactSet,
    pub dimensions: Option<Dimensions>,
    /// Intermediates deleted by the clean stage
    pub removed: Vec<PathBuf>,
    pub original_dump: Option<RawDumpInfo>,
    pub round_trip_dump: Option<RawDumpInfo>,
    /// Raw comparator stdout
    pub comparison_output: Option<String>,
    pub report: Option<QualityReport>,
    pub stages: Vec<StageResult>,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// True when every stage succeeded.
    pub fn succeeded(&self) -> bool {
        self.stages
            .iter()
            .all(|s| s.status == StageStatus::Succeeded)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StageResult> {
        self.stages
            .iter()
            .filter(|s| matches!(s.status, StageStatus::Failed(_)))
    }
}

/// Drives one comparison run.
pub struct PipelineRunner<P, S, C> {
    config: CoreConfig,
    probe: P,
    spawner: S,
    comparator: C,
    events: EventDispatcher,
}

impl PipelineRunner<FfprobeCommandExecutor, SidecarSpawner, ScriptComparator> {
    /// Runner backed by the real ffprobe, ffmpeg and comparator programs
    /// named in `config`.
    pub fn from_config(config: CoreConfig) -> CoreResult<Self> {
        let probe = FfprobeCommandExecutor::new(&config.ffprobe_path);
        let spawner = SidecarSpawner::new(&config.ffmpeg_path);
        let comparator = ScriptComparator::new(config.comparator.clone())?;
        Ok(Self::new(config, probe, spawner, comparator))
    }
}

impl<P, S, C> PipelineRunner<P, S, C>
where
    P: ProbeExecutor,
    S: FfmpegSpawner,
    C: Comparator,
{
    pub fn new(config: CoreConfig, probe: P, spawner: S, comparator: C) -> Self {
        Self {
            config,
            probe,
            spawner,
            comparator,
            events: EventDispatcher::new(),
        }
    }

    /// Replaces the event dispatcher.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Runs every stage for `identifier`.
    ///
    /// Under fail-fast, returns the first stage error. Under best-effort,
    /// returns a summary whose `stages` record each failure.
    pub fn run(&self, identifier: &str) -> CoreResult<RunSummary> {
        let identifier = Identifier::parse(identifier)?;
        let artifacts = ArtifactSet::new(&self.config.work_dir, &identifier);
        let started = Instant::now();

        log::info!(
            "Comparing {} in {} ({:?})",
            identifier,
            self.config.work_dir.display(),
            self.config.failure_policy
        );
        self.events.emit(Event::RunStarted {
            identifier: identifier.to_string(),
            work_dir: self.config.work_dir.clone(),
            policy: self.config.failure_policy,
        });

        let mut run = RunState::new(self.config.failure_policy, &self.events);
        let mut summary = RunSummary {
            identifier,
            artifacts,
            dimensions: None,
            removed: Vec::new(),
            original_dump: None,
            round_trip_dump: None,
            comparison_output: None,
            report: None,
            stages: Vec::new(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        };

        let outcome = self.run_stages(&mut run, &mut summary);

        summary.stages = run.stages;
        summary.elapsed = started.elapsed();
        self.events.emit(Event::RunComplete {
            succeeded: outcome.is_ok() && summary.succeeded(),
            elapsed: summary.elapsed,
        });

        outcome.map(|()| summary)
    }

    fn run_stages(&self, run: &mut RunState<'_>, summary: &mut RunSummary) -> CoreResult<()> {
        // ---- Check ----
        let check = self.check(&summary.artifacts);
        summary.dimensions = run.record(Stage::Check, check)?;

        // ---- Clean ----
        self.events.emit(Event::StageStarted { stage: Stage::Clean });
        let removed = remove_stale(summary.artifacts.intermediates());
        if let Some(removed) = run.record(Stage::Clean, removed)? {
            for path in &removed {
                self.events.emit(Event::ArtifactRemoved { path: path.clone() });
            }
            summary.removed = removed;
        }

        // ---- Transcode ----
        for (step, result) in self.transcode_all(&summary.artifacts) {
            run.record(Stage::Transcode(step), result)?;
        }

        // ---- Compare ----
        self.events.emit(Event::StageStarted {
            stage: Stage::Compare,
        });
        if let Some(dims) = summary.dimensions {
            self.inspect_dumps(dims, summary);
        }

        let request = ComparisonRequest {
            original_dump: summary.artifacts.original_dump.clone(),
            round_trip_dump: summary.artifacts.round_trip_dump.clone(),
            dimensions: summary.dimensions,
            format_tag: self.config.format_tag,
            frames: self.config.frames,
        };
        let compared = self.comparator.compare(&request);
        if let Some(output) = run.record(Stage::Compare, compared)? {
            for line in output.stdout.lines() {
                self.events.emit(Event::ComparisonLine {
                    line: line.to_string(),
                });
            }
            let report = QualityReport::parse(&output.stdout);
            let problem = if report.failed {
                Some("comparator could not compute PSNR")
            } else if !report.has_metrics() {
                Some("comparator printed no PSNR values")
            } else {
                None
            };
            if let Some(message) = problem {
                log::warn!("{}", message);
                self.events.emit(Event::Warning {
                    stage: Stage::Compare,
                    message: message.to_string(),
                });
            }
            summary.report = Some(report);
            summary.comparison_output = Some(output.stdout);
        }

        Ok(())
    }

    /// Existence check followed by the dimension probe.
    fn check(&self, artifacts: &ArtifactSet) -> CoreResult<Dimensions> {
        self.events.emit(Event::StageStarted { stage: Stage::Check });

        if !artifacts.input.exists() {
            log::warn!("file does not exist: {}", artifacts.input.display());
            self.events.emit(Event::InputMissing {
                path: artifacts.input.clone(),
            });
            return Err(CoreError::InputNotFound(artifacts.input.clone()));
        }

        let dimensions = self.probe.probe_dimensions(&artifacts.input)?;
        self.events.emit(Event::Probed { dimensions });
        Ok(dimensions)
    }

    /// Runs the three transcode steps and returns their results in step order.
    ///
    /// The round-trip dump only runs after a successful encode, unless the
    /// policy is best-effort.
    fn transcode_all(
        &self,
        artifacts: &ArtifactSet,
    ) -> Vec<(TranscodeStep, CoreResult<TranscodeOutcome>)> {
        let best_effort = self.config.failure_policy == FailurePolicy::BestEffort;
        let encode_chain = || {
            let mut results = Vec::with_capacity(2);
            let encoded = self.transcode(TranscodeStep::Encode, artifacts);
            let proceed = best_effort || encoded.is_ok();
            results.push((TranscodeStep::Encode, encoded));
            if proceed {
                results.push((
                    TranscodeStep::RoundTripDump,
                    self.transcode(TranscodeStep::RoundTripDump, artifacts),
                ));
            }
            results
        };

        if self.config.parallel_dumps {
            let (original, chain) = rayon::join(
                || self.transcode(TranscodeStep::OriginalDump, artifacts),
                encode_chain,
            );
            let mut results = vec![(TranscodeStep::OriginalDump, original)];
            results.extend(chain);
            results
        } else {
            let original = self.transcode(TranscodeStep::OriginalDump, artifacts);
            if original.is_err() && !best_effort {
                return vec![(TranscodeStep::OriginalDump, original)];
            }
            let mut results = vec![(TranscodeStep::OriginalDump, original)];
            results.extend(encode_chain());
            results
        }
    }

    fn transcode(&self, step: TranscodeStep, artifacts: &ArtifactSet) -> CoreResult<TranscodeOutcome> {
        self.events.emit(Event::StageStarted {
            stage: Stage::Transcode(step),
        });
        let job = TranscodeJob::for_step(step, artifacts, &self.config);
        let outcome = run_transcode(&self.spawner, &job, |progress| {
            self.events.emit(Event::TranscodeProgress {
                step: progress.step,
                frame: progress.frame,
                time: progress.time,
                speed: progress.speed,
            })
        })?;

        for line in &outcome.diagnostics {
            log::debug!("{}: {}", step, line);
        }
        self.events.emit(Event::ArtifactProduced {
            step,
            path: outcome.output.clone(),
            bytes: outcome.bytes,
        });
        Ok(outcome)
    }

    /// Size checks on both dumps; problems become warnings only.
    fn inspect_dumps(&self, dims: Dimensions, summary: &mut RunSummary) {
        let tag = self.config.format_tag;
        let original = RawDumpInfo::inspect(&summary.artifacts.original_dump, dims, tag);
        let round_trip = RawDumpInfo::inspect(&summary.artifacts.round_trip_dump, dims, tag);

        match (original, round_trip) {
            (Ok(original), Ok(round_trip)) => {
                for message in pair_warnings(dims, &original, &round_trip) {
                    log::warn!("{}", message);
                    self.events.emit(Event::Warning {
                        stage: Stage::Compare,
                        message,
                    });
                }
                summary.original_dump = Some(original);
                summary.round_trip_dump = Some(round_trip);
            }
            (original, round_trip) => {
                for err in [original.err(), round_trip.err()].into_iter().flatten() {
                    self.events.emit(Event::Warning {
                        stage: Stage::Compare,
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

/// Stage bookkeeping for one run.
struct RunState<'a> {
    policy: FailurePolicy,
    events: &'a EventDispatcher,
    stages: Vec<StageResult>,
}

impl<'a> RunState<'a> {
    fn new(policy: FailurePolicy, events: &'a EventDispatcher) -> Self {
        Self {
            policy,
            events,
            stages: Vec::new(),
        }
    }

    /// Records `result` for `stage`.
    ///
    /// `Ok(Some(_))` on success, `Ok(None)` for a failure the policy lets the
    /// run continue past, `Err(_)` when the run must stop.
    fn record<T>(&mut self, stage: Stage, result: CoreResult<T>) -> CoreResult<Option<T>> {
        match result {
            Ok(value) => {
                self.stages.push(StageResult {
                    stage,
                    status: StageStatus::Succeeded,
                });
                Ok(Some(value))
            }
            Err(err) => {
                let message = err.to_string();
                log::error!("{} stage failed: {}", stage, message);
                self.events.emit(Event::StageFailed {
                    stage,
                    message: message.clone(),
                });
                self.stages.push(StageResult {
                    stage,
                    status: StageStatus::Failed(message),
                });
                match self.policy {
                    FailurePolicy::FailFast => Err(err.in_stage(stage)),
                    FailurePolicy::BestEffort => Ok(None),
                }
            }
        }
    }
}
