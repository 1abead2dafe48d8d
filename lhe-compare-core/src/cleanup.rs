//! Removal of intermediates left over from a previous run.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Deletes every path that exists and returns the ones actually removed.
///
/// A path that is already absent is skipped. Any other failure aborts the
/// cleanup and names the offending path.
pub fn remove_stale<'a, I>(paths: I) -> CoreResult<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut removed = Vec::new();
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => {
                log::debug!("Removed stale {}", path.display());
                removed.push(path.to_path_buf());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(CoreError::Cleanup {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_present_and_skips_absent() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a_orig.yuv");
        let absent = dir.path().join("a.mlhe");
        std::fs::write(&present, b"stale").unwrap();

        let removed = remove_stale([present.as_path(), absent.as_path()]).unwrap();

        assert_eq!(removed, vec![present.clone()]);
        assert!(!present.exists());
    }

    #[test]
    fn test_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_lhe.yuv");
        std::fs::write(&path, b"stale").unwrap();

        assert_eq!(remove_stale([path.as_path()]).unwrap().len(), 1);
        assert!(remove_stale([path.as_path()]).unwrap().is_empty());
    }

    #[test]
    fn test_directory_in_the_way_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("a.mlhe");
        std::fs::create_dir(&blocker).unwrap();

        let err = remove_stale([blocker.as_path()]).unwrap_err();
        assert!(matches!(err, CoreError::Cleanup { path, .. } if path == blocker));
    }
}
