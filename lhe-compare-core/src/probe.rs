//! Frame dimensions and parsing of ffprobe's stream report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Pixel dimensions of a video stream. Both values are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::VideoInfo(format!(
                "invalid dimensions {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<i64>,
    height: Option<i64>,
}

/// Extracts the first stream's dimensions from
/// `ffprobe -select_streams v:0 -show_entries stream=width,height -of json`.
pub fn parse_stream_dimensions(json: &[u8]) -> CoreResult<Dimensions> {
    let report: ProbeReport = serde_json::from_slice(json)
        .map_err(|e| CoreError::JsonParse(format!("ffprobe stream report: {e}")))?;

    let stream = report
        .streams
        .first()
        .ok_or_else(|| CoreError::VideoInfo("no video stream found".to_string()))?;

    let width = stream
        .width
        .ok_or_else(|| CoreError::VideoInfo("video stream missing width".to_string()))?;
    let height = stream
        .height
        .ok_or_else(|| CoreError::VideoInfo("video stream missing height".to_string()))?;

    let to_u32 = |value: i64| u32::try_from(value).ok().filter(|v| *v > 0);
    match (to_u32(width), to_u32(height)) {
        (Some(w), Some(h)) => Dimensions::new(w, h),
        _ => Err(CoreError::VideoInfo(format!(
            "invalid dimensions reported: width={width}, height={height}"
        ))),
    }
}
