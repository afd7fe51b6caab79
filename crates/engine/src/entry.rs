use std::fs;
use std::io;
use std::path::Path;

use crate::error::SyncError;

/// Classification of a filesystem entry into the three categories the
/// reconciler distinguishes.
///
/// Classification is based on `lstat` semantics: a symbolic link is always
/// [`EntryKind::Special`], never the kind of its target. Only directories and
/// regular files are mirrored between the trees; everything else (symlinks,
/// sockets, devices, FIFOs) is reported and left untouched on both sides.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    RegularFile,
    /// Anything that is neither a directory nor a regular file.
    Special,
}

impl EntryKind {
    /// Classifies an already captured [`fs::Metadata`] value.
    #[must_use]
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::RegularFile
        } else {
            Self::Special
        }
    }

    /// Classifies the entry at `path` without following symbolic links.
    ///
    /// Returns `Ok(None)` when the path does not exist so callers can treat
    /// absence as an ordinary state rather than an error. A path whose parent
    /// chain crosses a non-directory (`ENOTDIR`) does not exist as an entry
    /// either; the pruner probes such paths when a source directory has been
    /// replaced by a regular file.
    pub fn probe(path: &Path) -> Result<Option<Self>, SyncError> {
        match fs::symlink_metadata(path) {
            Ok(metadata) => Ok(Some(Self::from_metadata(&metadata))),
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(None)
            }
            Err(source) => Err(SyncError::Metadata {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Indicates whether the entry is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Indicates whether the entry is a regular file.
    #[must_use]
    pub const fn is_regular_file(self) -> bool {
        matches!(self, Self::RegularFile)
    }
}

/// Reads the entry names of `dir`, sorted lexicographically.
///
/// Sorting keeps traversal order (and therefore event order) stable across
/// platforms; the reconciliation outcome itself does not depend on it since
/// operations are disjoint per entry.
pub(crate) fn sorted_entry_names(dir: &Path) -> Result<Vec<std::ffi::OsString>, SyncError> {
    let read_dir = fs::read_dir(dir).map_err(|source| SyncError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SyncError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}
