//! One synchronization cycle: a forward pass followed by a backward pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SyncError;
use crate::event::SyncEvent;
use crate::prune::{PruneOutcome, prune};
use crate::reconcile::{ForwardOutcome, reconcile};

/// The ephemeral state of one full reconciliation pass.
///
/// A session holds nothing but the two validated root paths; it is created at
/// the start of a cycle and consumed by [`run`](Self::run). Every cycle
/// recomputes everything from the current filesystem state, which is what
/// makes repeated cycles idempotent and convergent.
#[derive(Debug)]
pub struct SyncSession {
    source: PathBuf,
    replica: PathBuf,
}

impl SyncSession {
    /// Creates a session after checking that both roots are existing
    /// directories.
    ///
    /// Root validation follows symbolic links so a root named via a symlink
    /// is accepted.
    pub fn new<S: Into<PathBuf>, R: Into<PathBuf>>(
        source: S,
        replica: R,
    ) -> Result<Self, SyncError> {
        let source = source.into();
        let replica = replica.into();
        require_directory(&source)?;
        require_directory(&replica)?;
        Ok(Self { source, replica })
    }

    /// Returns the source root.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the replica root.
    #[must_use]
    pub fn replica(&self) -> &Path {
        &self.replica
    }

    /// Runs the forward pass to completion, then the backward pass to
    /// completion, consuming the session.
    ///
    /// The first filesystem failure aborts the rest of the cycle and
    /// propagates; no rollback is attempted, since the next cycle converges
    /// whatever state was left behind.
    pub fn run(self) -> Result<CycleReport, SyncError> {
        let forward = reconcile(&self.source, &self.replica)?;
        let backward = prune(&self.source, &self.replica)?;
        Ok(CycleReport { forward, backward })
    }
}

fn require_directory(path: &Path) -> Result<(), SyncError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(SyncError::InvalidRoot {
            path: path.to_path_buf(),
        }),
    }
}

/// Combined outcome of one synchronization cycle.
#[derive(Debug)]
pub struct CycleReport {
    forward: ForwardOutcome,
    backward: PruneOutcome,
}

impl CycleReport {
    /// All events of the cycle, forward pass first, in traversal order.
    pub fn events(&self) -> impl Iterator<Item = &SyncEvent> {
        self.forward.events().iter().chain(self.backward.events())
    }

    /// Outcome of the forward pass.
    #[must_use]
    pub fn forward(&self) -> &ForwardOutcome {
        &self.forward
    }

    /// Outcome of the backward pass.
    #[must_use]
    pub fn backward(&self) -> &PruneOutcome {
        &self.backward
    }

    /// Number of directories created in the replica.
    #[must_use]
    pub fn directories_created(&self) -> usize {
        self.forward.created().len()
    }

    /// Number of files copied into the replica.
    #[must_use]
    pub fn files_copied(&self) -> usize {
        self.forward.copied().len()
    }

    /// Number of files removed from the replica.
    #[must_use]
    pub fn files_removed(&self) -> usize {
        self.backward.removed_files().len()
    }

    /// Number of directories removed from the replica.
    #[must_use]
    pub fn directories_removed(&self) -> usize {
        self.backward.removed_dirs().len()
    }

    /// Number of special entries left untreated by the forward pass.
    #[must_use]
    pub fn specials_skipped(&self) -> usize {
        self.forward.warnings().len()
    }

    /// Total number of state-changing actions performed this cycle.
    #[must_use]
    pub fn changes(&self) -> usize {
        self.events().filter(|event| !event.is_warning()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_source_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let replica = temp.path().join("replica");
        fs::create_dir(&replica).expect("create replica");

        let error = SyncSession::new(temp.path().join("missing"), &replica)
            .expect_err("missing source must be rejected");
        assert!(error.is_root_error());
    }

    #[test]
    fn rejects_file_as_replica_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        fs::create_dir(&source).expect("create source");
        let file = temp.path().join("replica");
        fs::write(&file, b"not a dir").expect("write file");

        let error =
            SyncSession::new(&source, &file).expect_err("file replica must be rejected");
        assert!(matches!(error, SyncError::InvalidRoot { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn accepts_root_named_via_symlink() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).expect("create source");
        fs::create_dir(&replica).expect("create replica");
        let alias = temp.path().join("alias");
        symlink(&source, &alias).expect("symlink");

        SyncSession::new(&alias, &replica).expect("symlinked root accepted");
    }

    #[test]
    fn cycle_counts_reflect_both_passes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("source");
        let replica = temp.path().join("replica");
        fs::create_dir(&source).expect("create source");
        fs::create_dir(&replica).expect("create replica");
        fs::write(source.join("new.txt"), b"data").expect("write new");
        fs::write(replica.join("old.log"), b"y").expect("write stale");

        let report = SyncSession::new(&source, &replica)
            .expect("session")
            .run()
            .expect("cycle");

        assert_eq!(report.files_copied(), 1);
        assert_eq!(report.files_removed(), 1);
        assert_eq!(report.directories_created(), 0);
        assert_eq!(report.directories_removed(), 0);
        assert_eq!(report.changes(), 2);
    }
}
