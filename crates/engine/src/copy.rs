//! File transfer into the replica tree.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

use crate::error::SyncError;

/// Copies `source` over `replica`, preserving permission bits and the
/// source modification time.
///
/// An existing replica file is overwritten in place. The caller has already
/// verified via `lstat` that `source` is a regular file, so following it here
/// cannot cross a symbolic link.
pub(crate) fn copy_file(source: &Path, replica: &Path) -> Result<(), SyncError> {
    let metadata = fs::metadata(source).map_err(|error| copy_error(source, error))?;

    fs::copy(source, replica).map_err(|error| copy_error(source, error))?;

    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(replica, mtime).map_err(|error| copy_error(source, error))?;
    Ok(())
}

fn copy_error(path: &Path, source: io::Error) -> SyncError {
    SyncError::Copy {
        path: path.to_path_buf(),
        source,
    }
}
