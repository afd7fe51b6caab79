//! Change detection for regular files.
//!
//! The comparison uses file size as a fast path (a size mismatch proves the
//! contents differ) and otherwise streams both files for a byte-for-byte
//! comparison. Modification time is deliberately never trusted to decide
//! either way: a touched-but-identical file must not be re-copied, and a
//! rewritten file whose stat signature happens to match must still be
//! detected. Content is the source of truth.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::SyncError;

/// Reports whether two regular files hold identical content.
///
/// Both paths must refer to existing regular files; I/O failures while
/// opening or reading either file surface as [`SyncError::Compare`].
pub fn files_identical(source: &Path, replica: &Path) -> Result<bool, SyncError> {
    if file_len(source)? != file_len(replica)? {
        return Ok(false);
    }

    let mut lhs = BufReader::new(open(source)?);
    let mut rhs = BufReader::new(open(replica)?);

    loop {
        let lhs_buf = lhs.fill_buf().map_err(|error| compare_error(source, error))?;
        let rhs_buf = rhs.fill_buf().map_err(|error| compare_error(replica, error))?;

        if lhs_buf.is_empty() && rhs_buf.is_empty() {
            return Ok(true);
        }

        let len = lhs_buf.len().min(rhs_buf.len());
        if len == 0 {
            // One stream ended early; the file changed underneath us.
            return Ok(false);
        }
        if lhs_buf[..len] != rhs_buf[..len] {
            return Ok(false);
        }

        lhs.consume(len);
        rhs.consume(len);
    }
}

fn file_len(path: &Path) -> Result<u64, SyncError> {
    fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|error| compare_error(path, error))
}

fn open(path: &Path) -> Result<File, SyncError> {
    File::open(path).map_err(|error| compare_error(path, error))
}

fn compare_error(path: &Path, source: io::Error) -> SyncError {
    SyncError::Compare {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;

    #[test]
    fn identical_files_compare_equal() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, b"same contents").expect("write a");
        fs::write(&b, b"same contents").expect("write b");

        assert!(files_identical(&a, &b).expect("compare"));
    }

    #[test]
    fn size_mismatch_short_circuits() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, b"short").expect("write a");
        fs::write(&b, b"rather longer").expect("write b");

        assert!(!files_identical(&a, &b).expect("compare"));
    }

    #[test]
    fn same_size_different_content_detected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, b"aaaa").expect("write a");
        fs::write(&b, b"aaab").expect("write b");

        assert!(!files_identical(&a, &b).expect("compare"));
    }

    #[test]
    fn mtime_difference_alone_does_not_matter() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, b"stable").expect("write a");
        fs::write(&b, b"stable").expect("write b");
        filetime::set_file_mtime(&b, FileTime::from_unix_time(1_000_000, 0)).expect("set mtime");

        assert!(files_identical(&a, &b).expect("compare"));
    }

    #[test]
    fn large_files_are_streamed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        let payload = vec![0x5au8; 256 * 1024];
        fs::write(&a, &payload).expect("write a");
        let mut altered = payload.clone();
        *altered.last_mut().expect("non-empty") = 0x00;
        fs::write(&b, &altered).expect("write b");

        assert!(!files_identical(&a, &b).expect("compare"));
        fs::write(&b, &payload).expect("rewrite b");
        assert!(files_identical(&a, &b).expect("compare"));
    }

    #[test]
    fn missing_file_reports_compare_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let a = temp.path().join("a");
        fs::write(&a, b"data").expect("write a");
        let error = files_identical(&a, &temp.path().join("missing")).expect_err("should fail");
        assert!(matches!(error, SyncError::Compare { .. }));
    }
}
