//! Raw frame layouts understood by the PSNR comparator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::probe::Dimensions;

/// Pixel format tag passed verbatim to the comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PixelFormatTag {
    /// Planar 4:2:0.
    #[default]
    #[serde(rename = "IYUV")]
    Iyuv,
    #[serde(rename = "YV12")]
    Yv12,
    /// Semi-planar 4:2:0.
    #[serde(rename = "NV12")]
    Nv12,
    #[serde(rename = "UYVY")]
    Uyvy,
    #[serde(rename = "YVYU")]
    Yvyu,
    #[serde(rename = "YUY2")]
    Yuy2,
    /// Planar 4:2:2.
    #[serde(rename = "422")]
    Planar422,
}

impl PixelFormatTag {
    pub const ALL: [PixelFormatTag; 7] = [
        PixelFormatTag::Iyuv,
        PixelFormatTag::Yv12,
        PixelFormatTag::Nv12,
        PixelFormatTag::Uyvy,
        PixelFormatTag::Yvyu,
        PixelFormatTag::Yuy2,
        PixelFormatTag::Planar422,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PixelFormatTag::Iyuv => "IYUV",
            PixelFormatTag::Yv12 => "YV12",
            PixelFormatTag::Nv12 => "NV12",
            PixelFormatTag::Uyvy => "UYVY",
            PixelFormatTag::Yvyu => "YVYU",
            PixelFormatTag::Yuy2 => "YUY2",
            PixelFormatTag::Planar422 => "422",
        }
    }

    /// The ffmpeg `-pix_fmt` that produces dumps in this layout.
    pub fn ffmpeg_pix_fmt(self) -> &'static str {
        match self {
            PixelFormatTag::Iyuv | PixelFormatTag::Yv12 => "yuv420p",
            PixelFormatTag::Nv12 => "nv12",
            PixelFormatTag::Uyvy => "uyvy422",
            PixelFormatTag::Yvyu => "yvyu422",
            PixelFormatTag::Yuy2 => "yuyv422",
            PixelFormatTag::Planar422 => "yuv422p",
        }
    }

    pub fn is_420(self) -> bool {
        matches!(
            self,
            PixelFormatTag::Iyuv | PixelFormatTag::Yv12 | PixelFormatTag::Nv12
        )
    }

    /// Bytes occupied by one frame of `dims`.
    pub fn frame_size(self, dims: Dimensions) -> u64 {
        let luma = u64::from(dims.width) * u64::from(dims.height);
        if self.is_420() {
            luma * 3 / 2
        } else {
            luma * 2
        }
    }
}

impl fmt::Display for PixelFormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelFormatTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PixelFormatTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = PixelFormatTag::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Config(format!(
                    "unknown pixel format tag '{s}' (expected one of {})",
                    known.join(", ")
                ))
            })
    }
}
