//! Parsing of the comparator's printed metrics.
//!
//! The comparator prints
//!
//! ```text
//! PSNR(Y)=         38.417210
//! PSNR(Y,U,V)=     ( 38.417210 , 41.022345 , 41.871100 )
//! ```
//!
//! or the single word `Fallo` when it could not compute a value. Any other
//! lines are ignored here and still reach the user untouched.

use serde::Serialize;

/// Average PSNR per plane, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanePsnr {
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

/// Metrics recovered from comparator output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityReport {
    pub psnr_y: Option<f64>,
    pub planes: Option<PlanePsnr>,
    /// The comparator reported that it could not compute the metrics
    pub failed: bool,
}

const LUMA_PREFIX: &str = "PSNR(Y)=";
const PLANES_PREFIX: &str = "PSNR(Y,U,V)=";
const FAILURE_MARKER: &str = "Fallo";

impl QualityReport {
    pub fn parse(stdout: &str) -> Self {
        let mut report = QualityReport::default();

        for line in stdout.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix(LUMA_PREFIX) {
                report.psnr_y = parse_value(rest);
            } else if let Some(rest) = line.strip_prefix(PLANES_PREFIX) {
                report.planes = parse_planes(rest);
            } else if line == FAILURE_MARKER {
                report.failed = true;
            }
        }

        report
    }

    /// Whether any metric was found.
    pub fn has_metrics(&self) -> bool {
        self.psnr_y.is_some() || self.planes.is_some()
    }
}

fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn parse_planes(text: &str) -> Option<PlanePsnr> {
    let inner = text.trim().strip_prefix('(')?.strip_suffix(')')?;
    let values: Vec<f64> = inner
        .split(',')
        .map(parse_value)
        .collect::<Option<Vec<_>>>()?;
    match values.as_slice() {
        [y, u, v] => Some(PlanePsnr { y: *y, u: *u, v: *v }),
        _ => None,
    }
}
