//! Progress events emitted while a run executes.
//!
//! The pipeline never prints; it emits events and lets the registered
//! handlers decide how to present them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::FailurePolicy;
use crate::probe::Dimensions;
use crate::stage::{Stage, TranscodeStep};

pub mod json_handler;

pub use json_handler::JsonEventHandler;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        identifier: String,
        work_dir: PathBuf,
        policy: FailurePolicy,
    },

    StageStarted {
        stage: Stage,
    },

    // Check stage
    InputMissing {
        path: PathBuf,
    },
    Probed {
        dimensions: Dimensions,
    },

    // Clean stage
    ArtifactRemoved {
        path: PathBuf,
    },

    // Transcode stage
    TranscodeProgress {
        step: TranscodeStep,
        frame: u32,
        time: String,
        speed: f32,
    },
    ArtifactProduced {
        step: TranscodeStep,
        path: PathBuf,
        bytes: u64,
    },

    // Compare stage
    ComparisonLine {
        line: String,
    },

    Warning {
        stage: Stage,
        message: String,
    },

    StageFailed {
        stage: Stage,
        message: String,
    },

    RunComplete {
        succeeded: bool,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Handler that keeps every event for later inspection.
    #[derive(Default)]
    pub struct RecordingHandler {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingHandler {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventHandler for RecordingHandler {
        fn handle(&self, event: &Event) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
