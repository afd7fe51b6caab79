//! Forward pass: make the replica contain everything the source contains.

use std::fs;
use std::path::Path;

use crate::compare::files_identical;
use crate::copy::copy_file;
use crate::entry::{EntryKind, sorted_entry_names};
use crate::error::SyncError;
use crate::event::SyncEvent;

/// Result of one forward reconciliation pass.
#[derive(Debug, Default)]
pub struct ForwardOutcome {
    events: Vec<SyncEvent>,
}

impl ForwardOutcome {
    /// Returns the recorded events in traversal order.
    #[must_use]
    pub fn events(&self) -> &[SyncEvent] {
        &self.events
    }

    /// Replica paths of directories created during the pass.
    #[must_use]
    pub fn created(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SyncEvent::DirectoryCreated { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Replica paths of files copied during the pass.
    #[must_use]
    pub fn copied(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SyncEvent::FileCopied { replica, .. } => Some(replica.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Source paths of special entries that were left untreated.
    #[must_use]
    pub fn warnings(&self) -> Vec<&Path> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SyncEvent::SpecialSkipped { path } => Some(path.as_path()),
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

/// Walks `source_dir` and ensures every directory and regular file it finds
/// exists and is current under `replica_dir`.
///
/// Directories missing from the replica are created; files missing from the
/// replica or differing in content are copied with permission bits and
/// modification time preserved. Special entries are reported and skipped.
/// The first filesystem failure aborts the pass.
pub fn reconcile(source_dir: &Path, replica_dir: &Path) -> Result<ForwardOutcome, SyncError> {
    let mut outcome = ForwardOutcome::default();
    reconcile_into(source_dir, replica_dir, &mut outcome)?;
    Ok(outcome)
}

fn reconcile_into(
    source_dir: &Path,
    replica_dir: &Path,
    outcome: &mut ForwardOutcome,
) -> Result<(), SyncError> {
    for name in sorted_entry_names(source_dir)? {
        let source_path = source_dir.join(&name);
        let replica_path = replica_dir.join(&name);

        // The entry may vanish between listing and stat; nothing to mirror then.
        let Some(kind) = EntryKind::probe(&source_path)? else {
            continue;
        };

        match kind {
            EntryKind::Directory => {
                ensure_replica_directory(&replica_path, outcome)?;
                reconcile_into(&source_path, &replica_path, outcome)?;
            }
            EntryKind::RegularFile => {
                if replica_needs_copy(&source_path, &replica_path)? {
                    copy_file(&source_path, &replica_path)?;
                    outcome.record(SyncEvent::FileCopied {
                        source: source_path,
                        replica: replica_path,
                    });
                }
            }
            EntryKind::Special => {
                outcome.record(SyncEvent::SpecialSkipped { path: source_path });
            }
        }
    }
    Ok(())
}

fn ensure_replica_directory(
    replica_path: &Path,
    outcome: &mut ForwardOutcome,
) -> Result<(), SyncError> {
    if EntryKind::probe(replica_path)? == Some(EntryKind::Directory) {
        return Ok(());
    }

    // A colliding non-directory entry makes create_dir fail, which is the
    // contract: the collision surfaces as a creation error.
    fs::create_dir(replica_path).map_err(|source| SyncError::Create {
        path: replica_path.to_path_buf(),
        source,
    })?;
    outcome.record(SyncEvent::DirectoryCreated {
        path: replica_path.to_path_buf(),
    });
    Ok(())
}

fn replica_needs_copy(source_path: &Path, replica_path: &Path) -> Result<bool, SyncError> {
    match EntryKind::probe(replica_path)? {
        None => Ok(true),
        Some(EntryKind::RegularFile) => {
            Ok(!files_identical(source_path, replica_path)?)
        }
        // A directory or special entry occupies the replica path; copying
        // over it cannot succeed. The backward pass clears a stale directory
        // and the next cycle copies the file.
        Some(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tree() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).expect("create source");
        fs::create_dir(&replica).expect("create replica");
        (temp, source, replica)
    }

    #[test]
    fn creates_missing_directories_and_files() {
        let (_temp, source, replica) = tree();
        fs::create_dir(source.join("docs")).expect("mkdir docs");
        fs::write(source.join("docs/readme.txt"), b"v1").expect("write readme");
        fs::write(source.join("config.ini"), b"x").expect("write config");

        let outcome = reconcile(&source, &replica).expect("reconcile");

        assert_eq!(outcome.created(), vec![replica.join("docs").as_path()]);
        assert_eq!(
            outcome.copied(),
            vec![
                replica.join("config.ini").as_path(),
                replica.join("docs/readme.txt").as_path(),
            ]
        );
        assert!(outcome.warnings().is_empty());
        assert_eq!(fs::read(replica.join("docs/readme.txt")).expect("read"), b"v1");
        assert_eq!(fs::read(replica.join("config.ini")).expect("read"), b"x");
    }

    #[test]
    fn overwrites_file_with_changed_content() {
        let (_temp, source, replica) = tree();
        fs::write(source.join("file.txt"), b"new").expect("write source");
        fs::write(replica.join("file.txt"), b"old").expect("write replica");

        let outcome = reconcile(&source, &replica).expect("reconcile");
        assert_eq!(outcome.copied().len(), 1);
        assert_eq!(fs::read(replica.join("file.txt")).expect("read"), b"new");
    }

    #[test]
    fn matching_file_is_not_recopied() {
        let (_temp, source, replica) = tree();
        fs::write(source.join("file.txt"), b"same").expect("write source");
        fs::write(replica.join("file.txt"), b"same").expect("write replica");

        let outcome = reconcile(&source, &replica).expect("reconcile");
        assert!(outcome.events().is_empty());
    }

    #[test]
    fn second_pass_is_idempotent() {
        let (_temp, source, replica) = tree();
        fs::create_dir_all(source.join("a/b")).expect("mkdirs");
        fs::write(source.join("a/b/deep.txt"), b"data").expect("write");

        let first = reconcile(&source, &replica).expect("first pass");
        assert!(!first.events().is_empty());

        let second = reconcile(&source, &replica).expect("second pass");
        assert!(second.events().is_empty());
    }

    #[test]
    fn source_file_over_replica_directory_is_left_for_the_pruner() {
        let (_temp, source, replica) = tree();
        fs::write(source.join("entry"), b"now a file").expect("write source file");
        fs::create_dir(replica.join("entry")).expect("mkdir replica entry");
        fs::write(replica.join("entry/stale.txt"), b"old").expect("write child");

        let outcome = reconcile(&source, &replica).expect("reconcile");

        assert!(outcome.copied().is_empty());
        assert!(replica.join("entry").is_dir());
        assert!(replica.join("entry/stale.txt").exists());
    }

    #[test]
    fn replica_file_replaced_by_source_directory_raises_create_error() {
        let (_temp, source, replica) = tree();
        fs::create_dir(source.join("shared")).expect("mkdir");
        fs::write(replica.join("shared"), b"i am a file").expect("write collision");

        let error = reconcile(&source, &replica).expect_err("collision should fail");
        assert!(matches!(error, SyncError::Create { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn special_entries_are_reported_and_skipped() {
        use std::os::unix::net::UnixListener;

        let (_temp, source, replica) = tree();
        let socket = source.join("daemon.sock");
        let _listener = UnixListener::bind(&socket).expect("bind socket");
        fs::write(source.join("kept.txt"), b"data").expect("write file");

        let outcome = reconcile(&source, &replica).expect("reconcile");
        assert_eq!(outcome.warnings(), vec![socket.as_path()]);
        assert!(!replica.join("daemon.sock").exists());
        assert!(replica.join("kept.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn source_symlink_is_not_mirrored() {
        use std::os::unix::fs::symlink;

        let (_temp, source, replica) = tree();
        fs::write(source.join("target.txt"), b"data").expect("write target");
        symlink(source.join("target.txt"), source.join("link")).expect("symlink");

        let outcome = reconcile(&source, &replica).expect("reconcile");
        assert_eq!(outcome.warnings(), vec![source.join("link").as_path()]);
        assert!(!replica.join("link").exists());
        assert!(replica.join("target.txt").exists());
    }
}
