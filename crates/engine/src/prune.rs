//! Backward pass: remove replica entries that no longer exist in the source.

use std::fs;
use std::path::Path;

use crate::entry::{EntryKind, sorted_entry_names};
use crate::error::SyncError;
use crate::event::SyncEvent;

/// Result of one backward pruning pass.
#[derive(Debug, Default)]
pub struct PruneOutcome {
    events: Vec<SyncEvent>,
}

impl PruneOutcome {
    /// Returns the recorded events in traversal order.
    #[must_use]
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    /// Replica paths of directories removed during the pass.
    #[must_use]
    pub fn removed_dirs(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SyncEvent::DirectoryRemoved { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Replica paths of files removed during the pass.
    #[must_use]
    pub fn removed_files(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SyncEvent::FileRemoved { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Consumes the outcome and returns the owned event list.
    #[must_use]
    pub fn into_events(self) -> Vec<SyncEvent> {
        self.events
    }

    fn record(&mut self, event: SyncEvent) {
        self.events.push(event);
    }
}

/// Walks `replica_dir` and removes every file or directory that has no
/// counterpart under `source_dir`.
///
/// A directory missing from the source is emptied bottom-up by recursion
/// before it is removed, so removal never fails on a non-empty directory.
/// A directory that still holds un-prunable special entries after recursion
/// stays behind; that residue is by design and not an error. Special replica
/// entries themselves are never inspected for removal.
pub fn prune(source_dir: &Path, replica_dir: &Path) -> Result<PruneOutcome, SyncError> {
    let mut outcome = PruneOutcome::default();
    prune_into(source_dir, replica_dir, &mut outcome)?;
    Ok(outcome)
}

fn prune_into(
    source_dir: &Path,
    replica_dir: &Path,
    outcome: &mut PruneOutcome,
) -> Result<(), SyncError> {
    for name in sorted_entry_names(replica_dir)? {
        let source_path = source_dir.join(&name);
        let replica_path = replica_dir.join(&name);

        match EntryKind::probe(&replica_path)? {
            Some(EntryKind::Directory) => {
                // Recurse either way: into a surviving directory to prune its
                // stale children, into a doomed one to empty it bottom-up.
                prune_into(&source_path, &replica_path, outcome)?;

                if EntryKind::probe(&source_path)? != Some(EntryKind::Directory)
                    && directory_is_empty(&replica_path)?
                {
                    fs::remove_dir(&replica_path).map_err(|source| SyncError::Remove {
                        path: replica_path.clone(),
                        source,
                    })?;
                    outcome.record(SyncEvent::DirectoryRemoved { path: replica_path });
                }
            }
            Some(EntryKind::RegularFile) => {
                if EntryKind::probe(&source_path)? != Some(EntryKind::RegularFile) {
                    fs::remove_file(&replica_path).map_err(|source| SyncError::Remove {
                        path: replica_path.clone(),
                        source,
                    })?;
                    outcome.record(SyncEvent::FileRemoved { path: replica_path });
                }
            }
            // Special entries are immune to pruning; a vanished entry needs none.
            Some(EntryKind::Special) | None => {}
        }
    }
    Ok(())
}

fn directory_is_empty(dir: &Path) -> Result<bool, SyncError> {
    let mut read_dir = fs::read_dir(dir).map_err(|source| SyncError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    match read_dir.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(source)) => Err(SyncError::ReadDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}
