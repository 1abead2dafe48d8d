//! JSON event handler for structured output
//!
//! Writes one JSON object per event, one per line, for consumption by
//! scripts that drive batches of comparisons.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event handler that outputs events as JSON lines
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonEventHandler {
    /// Create a new JSON handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }

    /// The JSON form of `event`, or `None` for events not worth a line.
    pub fn to_json(event: &Event) -> Option<serde_json::Value> {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let value = match event {
            Event::RunStarted {
                identifier,
                work_dir,
                policy,
            } => json!({
                "type": "run_started",
                "identifier": identifier,
                "work_dir": work_dir,
                "policy": policy,
                "timestamp": timestamp
            }),
            Event::StageStarted { stage } => json!({
                "type": "stage_started",
                "stage": stage.to_string(),
                "timestamp": timestamp
            }),
            Event::InputMissing { path } => json!({
                "type": "input_missing",
                "path": path,
                "message": "file does not exist",
                "timestamp": timestamp
            }),
            Event::Probed { dimensions } => json!({
                "type": "probed",
                "width": dimensions.width,
                "height": dimensions.height,
                "timestamp": timestamp
            }),
            Event::ArtifactRemoved { path } => json!({
                "type": "artifact_removed",
                "path": path,
                "timestamp": timestamp
            }),
            // Per-frame progress is too chatty for line-oriented consumers
            Event::TranscodeProgress { .. } => return None,
            Event::ArtifactProduced { step, path, bytes } => json!({
                "type": "artifact_produced",
                "step": step,
                "path": path,
                "bytes": bytes,
                "timestamp": timestamp
            }),
            Event::ComparisonLine { line } => json!({
                "type": "comparison_output",
                "line": line,
                "timestamp": timestamp
            }),
            Event::Warning { stage, message } => json!({
                "type": "warning",
                "stage": stage.to_string(),
                "message": message,
                "timestamp": timestamp
            }),
            Event::StageFailed { stage, message } => json!({
                "type": "stage_failed",
                "stage": stage.to_string(),
                "message": message,
                "timestamp": timestamp
            }),
            Event::RunComplete { succeeded, elapsed } => json!({
                "type": "run_complete",
                "succeeded": succeeded,
                "elapsed_seconds": elapsed.as_secs_f64(),
                "timestamp": timestamp
            }),
        };
        Some(value)
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        if let Some(value) = Self::to_json(event) {
            self.write_json(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Stage, TranscodeStep};
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let buffer = SharedBuffer::default();
        let handler = JsonEventHandler::with_writer(Box::new(buffer.clone()));

        handler.handle(&Event::ArtifactProduced {
            step: TranscodeStep::Encode,
            path: PathBuf::from("files/sample.mlhe"),
            bytes: 4096,
        });
        handler.handle(&Event::TranscodeProgress {
            step: TranscodeStep::Encode,
            frame: 3,
            time: "00:00:00.12".into(),
            speed: 1.0,
        });
        handler.handle(&Event::StageFailed {
            stage: Stage::Transcode(TranscodeStep::Encode),
            message: "boom".into(),
        });

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "artifact_produced");
        assert_eq!(lines[0]["step"], "encode");
        assert_eq!(lines[0]["bytes"], 4096);
        assert_eq!(lines[1]["stage"], "transcode (encode)");
    }
}
