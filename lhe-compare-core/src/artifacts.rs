//! Identifiers and the file names derived from them.
//!
//! All names are built with [`Path::join`]; the identifier is never spliced
//! into a shell command line.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Extension of the input video.
pub const INPUT_EXTENSION: &str = "mp4";
/// Suffix of the raw dump of the original input.
pub const ORIGINAL_DUMP_SUFFIX: &str = "_orig.yuv";
/// Extension of the LHE re-encoded container.
pub const ENCODED_EXTENSION: &str = "mlhe";
/// Suffix of the raw dump decoded back from the container.
pub const ROUND_TRIP_DUMP_SUFFIX: &str = "_lhe.yuv";

/// Name of a source video, without its extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `raw` as a bare file stem.
    pub fn parse(raw: impl Into<String>) -> CoreResult<Self> {
        let raw = raw.into();
        let reject = |reason: &str| CoreError::InvalidIdentifier {
            identifier: raw.clone(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(reject("must not be empty"));
        }
        if raw == "." || raw == ".." {
            return Err(reject("must name a file, not a directory"));
        }
        if raw.contains(['/', '\\']) {
            return Err(reject("contains a path separator"));
        }
        if raw.starts_with('-') {
            return Err(reject("must not start with '-'"));
        }
        if raw.chars().any(char::is_control) {
            return Err(reject("contains a control character"));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Paths of the input and every intermediate for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactSet {
    pub input: PathBuf,
    pub original_dump: PathBuf,
    pub encoded: PathBuf,
    pub round_trip_dump: PathBuf,
}

impl ArtifactSet {
    pub fn new(work_dir: &Path, id: &Identifier) -> Self {
        let stem = id.as_str();
        Self {
            input: work_dir.join(format!("{stem}.{INPUT_EXTENSION}")),
            original_dump: work_dir.join(format!("{stem}{ORIGINAL_DUMP_SUFFIX}")),
            encoded: work_dir.join(format!("{stem}.{ENCODED_EXTENSION}")),
            round_trip_dump: work_dir.join(format!("{stem}{ROUND_TRIP_DUMP_SUFFIX}")),
        }
    }

    /// Generated files, in the order the pipeline produces them.
    pub fn intermediates(&self) -> [&Path; 3] {
        [&self.original_dump, &self.encoded, &self.round_trip_dump]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_names() {
        let id = Identifier::parse("sample").unwrap();
        let set = ArtifactSet::new(Path::new("files"), &id);

        assert_eq!(set.input, PathBuf::from("files/sample.mp4"));
        assert_eq!(set.original_dump, PathBuf::from("files/sample_orig.yuv"));
        assert_eq!(set.encoded, PathBuf::from("files/sample.mlhe"));
        assert_eq!(set.round_trip_dump, PathBuf::from("files/sample_lhe.yuv"));
        assert_eq!(
            set.intermediates(),
            [
                Path::new("files/sample_orig.yuv"),
                Path::new("files/sample.mlhe"),
                Path::new("files/sample_lhe.yuv"),
            ]
        );
    }

    #[test]
    fn test_identifier_keeps_spaces_and_metacharacters_literal() {
        let id = Identifier::parse("my clip; rm -rf $HOME").unwrap();
        let set = ArtifactSet::new(Path::new("files"), &id);
        assert_eq!(
            set.input.file_name().unwrap(),
            "my clip; rm -rf $HOME.mp4"
        );
    }

    #[test]
    fn test_identifier_rejections() {
        for bad in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "-i", "bad\nname"] {
            let err = Identifier::parse(bad).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidIdentifier { .. }),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_identifier_allows_inner_dots() {
        assert_eq!(Identifier::parse("foreman.cif").unwrap().as_str(), "foreman.cif");
    }
}
