// ============================================================================
// lhe-compare-cli/src/commands/run.rs
// ============================================================================
//
// RUN COMMAND: one comparison for one identifier
//
// Translates the parsed arguments into a CoreConfig, wires the event
// handlers for the selected output mode and hands off to the core pipeline.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::terminal::TerminalEventHandler;
use lhe_compare_core::{
    CoreConfig, CoreConfigBuilder, EventDispatcher, FailurePolicy, JsonEventHandler, RunSummary,
};
use log::debug;
use std::sync::Arc;

/// Builds the core configuration from command-line arguments.
pub fn create_core_config(args: &Cli) -> CliResult<CoreConfig> {
    let mut builder = CoreConfigBuilder::new()
        .work_dir(&args.work_dir)
        .format_tag(args.format_tag)
        .lhe_codec(&args.codec)
        .parallel_dumps(args.parallel)
        .frames(args.frames)
        .failure_policy(if args.best_effort {
            FailurePolicy::BestEffort
        } else {
            FailurePolicy::FailFast
        });

    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg);
    }
    if let Some(ffprobe) = &args.ffprobe {
        builder = builder.ffprobe_path(ffprobe);
    }
    if let Some(command) = &args.comparator {
        // Repeated or trailing spaces leave empty words behind
        builder = builder.comparator(command.iter().filter(|w| !w.is_empty()));
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

/// Event handlers for the requested output mode.
pub fn create_dispatcher(json: bool) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    if json {
        dispatcher.add_handler(Arc::new(JsonEventHandler::new()));
    } else {
        dispatcher.add_handler(Arc::new(TerminalEventHandler::new()));
    }
    dispatcher
}

/// Runs the comparison described by `args`.
pub fn run_compare(args: &Cli) -> CliResult<RunSummary> {
    let config = create_core_config(args)?;
    debug!("Configuration: {:?}", config);
    debug!("Run started: {}", chrono::Local::now());

    let summary =
        lhe_compare_core::run_comparison(config, &args.identifier, create_dispatcher(args.json))?;

    debug!("Finished at: {}", chrono::Local::now());
    Ok(summary)
}
