//! Consistency checks on raw YUV dumps before they are compared.
//!
//! The comparator silently processes only the shorter of the two dumps and
//! assumes whole frames, so the mismatches it would hide are surfaced here as
//! warnings.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::format::PixelFormatTag;
use crate::probe::Dimensions;

/// Size breakdown of one raw dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDumpInfo {
    pub path: PathBuf,
    pub bytes: u64,
    pub frame_size: u64,
    /// Number of complete frames
    pub frames: u64,
    /// Bytes left over after the last complete frame
    pub trailing_bytes: u64,
}

impl RawDumpInfo {
    /// Reads the size of `path` and splits it into frames.
    pub fn inspect(path: &Path, dims: Dimensions, tag: PixelFormatTag) -> CoreResult<Self> {
        let bytes = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CoreError::MissingOutput(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::from_len(path, bytes, dims, tag))
    }

    /// Splits `bytes` into frames. A zero-sized frame yields no frames, with
    /// every byte counted as trailing.
    pub fn from_len(path: &Path, bytes: u64, dims: Dimensions, tag: PixelFormatTag) -> Self {
        let frame_size = tag.frame_size(dims);
        Self {
            path: path.to_path_buf(),
            bytes,
            frame_size,
            frames: bytes.checked_div(frame_size).unwrap_or(0),
            trailing_bytes: bytes.checked_rem(frame_size).unwrap_or(bytes),
        }
    }

    pub fn is_whole(&self) -> bool {
        self.trailing_bytes == 0
    }
}

/// Warnings for a pair of dumps about to be compared. Empty when consistent.
pub fn pair_warnings(
    dims: Dimensions,
    original: &RawDumpInfo,
    round_trip: &RawDumpInfo,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if dims.width % 16 != 0 {
        warnings.push(format!("width {} is not a multiple of 16", dims.width));
    }
    if dims.height % 16 != 0 {
        warnings.push(format!("height {} is not a multiple of 16", dims.height));
    }

    for dump in [original, round_trip] {
        if !dump.is_whole() {
            warnings.push(format!(
                "{} holds {} frames plus {} trailing bytes",
                dump.path.display(),
                dump.frames,
                dump.trailing_bytes
            ));
        }
    }

    if original.frames != round_trip.frames {
        warnings.push(format!(
            "frame counts differ ({} original, {} round trip); only the first {} are compared",
            original.frames,
            round_trip.frames,
            original.frames.min(round_trip.frames)
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const QCIF: Dimensions = Dimensions {
        width: 176,
        height: 144,
    };

    #[test]
    fn test_whole_frames() {
        let info = RawDumpInfo::from_len(Path::new("a.yuv"), 38_016 * 300, QCIF, PixelFormatTag::Iyuv);
        assert_eq!(info.frames, 300);
        assert!(info.is_whole());
    }

    #[test]
    fn test_partial_frame() {
        let info = RawDumpInfo::from_len(Path::new("a.yuv"), 38_016 * 2 + 10, QCIF, PixelFormatTag::Iyuv);
        assert_eq!(info.frames, 2);
        assert_eq!(info.trailing_bytes, 10);
        assert!(!info.is_whole());
    }

    #[test]
    fn test_zero_width_counts_no_frames() {
        let dims = Dimensions {
            width: 0,
            height: 144,
        };
        let info = RawDumpInfo::from_len(Path::new("a.yuv"), 1000, dims, PixelFormatTag::Iyuv);
        assert_eq!(info.frame_size, 0);
        assert_eq!(info.frames, 0);
        assert_eq!(info.trailing_bytes, 1000);
        assert!(!info.is_whole());
    }

    #[test]
    fn test_consistent_pair_has_no_warnings() {
        let a = RawDumpInfo::from_len(Path::new("a.yuv"), 38_016 * 10, QCIF, PixelFormatTag::Iyuv);
        let b = RawDumpInfo::from_len(Path::new("b.yuv"), 38_016 * 10, QCIF, PixelFormatTag::Iyuv);
        assert!(pair_warnings(QCIF, &a, &b).is_empty());
    }

    #[test]
    fn test_pair_warnings() {
        let dims = Dimensions {
            width: 180,
            height: 100,
        };
        let frame = PixelFormatTag::Iyuv.frame_size(dims);
        let a = RawDumpInfo::from_len(Path::new("a.yuv"), frame * 10, dims, PixelFormatTag::Iyuv);
        let b = RawDumpInfo::from_len(Path::new("b.yuv"), frame * 8 + 3, dims, PixelFormatTag::Iyuv);

        let warnings = pair_warnings(dims, &a, &b);
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].contains("width 180"));
        assert!(warnings[1].contains("height 100"));
        assert!(warnings[2].contains("b.yuv holds 8 frames plus 3 trailing bytes"));
        assert!(warnings[3].contains("only the first 8"));
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RawDumpInfo::inspect(&dir.path().join("nope.yuv"), QCIF, PixelFormatTag::Iyuv)
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingOutput(_)));
    }
}
