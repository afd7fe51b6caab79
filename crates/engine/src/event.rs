use std::fmt;
use std::path::{Path, PathBuf};

/// A single observable action taken (or deliberately skipped) during a
/// synchronization pass.
///
/// The engine performs no logging of its own; it records one event per
/// state-changing action and one warning-class event per special entry
/// encountered in the forward pass. The caller decides how to render them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyncEvent {
    /// A directory was created in the replica.
    DirectoryCreated {
        /// Replica path of the new directory.
        path: PathBuf,
    },
    /// A source file was copied into the replica.
    FileCopied {
        /// Source path the content was read from.
        source: PathBuf,
        /// Replica path the content was written to.
        replica: PathBuf,
    },
    /// A stale file was removed from the replica.
    FileRemoved {
        /// Replica path of the removed file.
        path: PathBuf,
    },
    /// A stale directory was removed from the replica.
    DirectoryRemoved {
        /// Replica path of the removed directory.
        path: PathBuf,
    },
    /// A special entry (symlink, socket, device, FIFO) was left untreated.
    SpecialSkipped {
        /// Source path of the skipped entry.
        path: PathBuf,
    },
}

impl SyncEvent {
    /// Returns the path most relevant to the event: the replica path for
    /// mutations, the source path for skipped special entries.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::DirectoryCreated { path }
            | Self::FileRemoved { path }
            | Self::DirectoryRemoved { path }
            | Self::SpecialSkipped { path } => path,
            Self::FileCopied { replica, .. } => replica,
        }
    }

    /// Indicates whether the event is a warning rather than a state change.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::SpecialSkipped { .. })
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryCreated { path } => {
                write!(f, "directory '{}' created in replica", path.display())
            }
            Self::FileCopied { source, replica } => {
                write!(
                    f,
                    "file '{}' copied to '{}'",
                    source.display(),
                    replica.display()
                )
            }
            Self::FileRemoved { path } => {
                write!(f, "file '{}' removed from replica", path.display())
            }
            Self::DirectoryRemoved { path } => {
                write!(f, "directory '{}' removed from replica", path.display())
            }
            Self::SpecialSkipped { path } => {
                write!(
                    f,
                    "special file '{}' found, it stays untreated in replica",
                    path.display()
                )
            }
        }
    }
}
