//! Named pipeline stages.
//!
//! A run is always `Check -> Clean -> Transcode x3 -> Compare`. Naming the
//! stages lets errors, events and the final summary say exactly where a run
//! stopped.

use std::fmt;

use serde::Serialize;

/// One of the three transcoder invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscodeStep {
    /// Raw dump of the original `.mp4`.
    OriginalDump,
    /// `.mp4` re-encoded into the `.mlhe` container.
    Encode,
    /// Raw dump decoded back from the `.mlhe`.
    RoundTripDump,
}

impl TranscodeStep {
    /// All steps in execution order.
    pub const ALL: [TranscodeStep; 3] = [
        TranscodeStep::OriginalDump,
        TranscodeStep::Encode,
        TranscodeStep::RoundTripDump,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TranscodeStep::OriginalDump => "original dump",
            TranscodeStep::Encode => "encode",
            TranscodeStep::RoundTripDump => "round-trip dump",
        }
    }
}

impl fmt::Display for TranscodeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stage of the comparison pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "stage", content = "step", rename_all = "snake_case")]
pub enum Stage {
    /// Input existence check and dimension probe.
    Check,
    /// Removal of stale intermediates.
    Clean,
    Transcode(TranscodeStep),
    /// External quality comparison.
    Compare,
}

impl Stage {
    /// Every stage in the order a run executes them.
    #[cfg(test)]
    pub(crate) fn sequence() -> [Stage; 6] {
        [
            Stage::Check,
            Stage::Clean,
            Stage::Transcode(TranscodeStep::OriginalDump),
            Stage::Transcode(TranscodeStep::Encode),
            Stage::Transcode(TranscodeStep::RoundTripDump),
            Stage::Compare,
        ]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Check => f.write_str("check"),
            Stage::Clean => f.write_str("clean"),
            Stage::Transcode(step) => write!(f, "transcode ({step})"),
            Stage::Compare => f.write_str("compare"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let names: Vec<String> = Stage::sequence().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            vec![
                "check",
                "clean",
                "transcode (original dump)",
                "transcode (encode)",
                "transcode (round-trip dump)",
                "compare",
            ]
        );
    }

    #[test]
    fn test_stage_serializes_with_step() {
        let json = serde_json::to_value(Stage::Transcode(TranscodeStep::RoundTripDump)).unwrap();
        assert_eq!(json["stage"], "transcode");
        assert_eq!(json["step"], "round_trip_dump");

        let json = serde_json::to_value(Stage::Check).unwrap();
        assert_eq!(json["stage"], "check");
    }
}
