use std::io;
use std::path::PathBuf;

/// Errors raised while reconciling or pruning a tree.
///
/// Each variant captures the path being operated on together with the
/// underlying [`io::Error`] so callers can surface actionable diagnostics.
/// An error aborts the remainder of the current cycle; the scheduler's next
/// cycle will detect the same divergence and retry the operation.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A synchronization root is missing or is not a directory.
    #[error("'{path}' is not an existing directory")]
    InvalidRoot {
        /// Root path that failed validation.
        path: PathBuf,
    },

    /// Directory creation in the replica failed.
    #[error("failed to create directory '{path}': {source}")]
    Create {
        /// Replica directory that could not be created.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Copying a source file into the replica failed.
    #[error("failed to copy '{path}': {source}")]
    Copy {
        /// Source file that could not be copied.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Removing a stale replica file or directory failed.
    #[error("failed to remove '{path}': {source}")]
    Remove {
        /// Replica entry that could not be removed.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Reading the contents of a directory failed.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// Directory whose listing could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Querying metadata for an entry failed.
    #[error("failed to inspect '{path}': {source}")]
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },

    /// Comparing a source file against its replica counterpart failed.
    #[error("failed to compare '{path}': {source}")]
    Compare {
        /// File that could not be read for comparison.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// Returns the path the failed operation was acting on.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::InvalidRoot { path }
            | Self::Create { path, .. }
            | Self::Copy { path, .. }
            | Self::Remove { path, .. }
            | Self::ReadDir { path, .. }
            | Self::Metadata { path, .. }
            | Self::Compare { path, .. } => path,
        }
    }

    /// Indicates whether the failure happened while selecting the roots
    /// rather than during traversal.
    #[must_use]
    pub fn is_root_error(&self) -> bool {
        matches!(self, Self::InvalidRoot { .. })
    }
}
