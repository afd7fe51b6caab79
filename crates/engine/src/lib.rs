#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` implements the recursive tree-diff-and-reconcile core used by the
//! `syncdirs` binary to keep a replica directory tree identical to a source
//! directory tree. Each synchronization cycle runs two cooperating passes:
//!
//! - [`reconcile`] walks the source tree and ensures every directory and
//!   regular file it finds exists and is current in the replica.
//! - [`prune`] walks the replica tree and removes every file or directory
//!   that no longer has a counterpart in the source.
//!
//! [`SyncSession`] binds the two passes into the single "run one cycle"
//! operation consumed by the outer scheduler. The engine is deliberately
//! stateless: the filesystem is the only source of truth, nothing is cached
//! between cycles, and an interrupted or failed cycle is converged by simply
//! running another one.
//!
//! # Design
//!
//! - Both passes are plain functions over `(source_dir, replica_dir)` path
//!   pairs. Corresponding paths are always derived by joining the two roots
//!   with the same relative entry-name chain, so every replica path maps to
//!   exactly one source path and vice versa.
//! - Entries are classified by [`EntryKind`] into directories, regular files,
//!   and "special" entries (symlinks, sockets, devices, FIFOs). Only
//!   directories and regular files are mirrored; special entries are reported
//!   and otherwise left alone on both sides.
//! - The engine never logs. Every state-changing action is recorded as a
//!   [`SyncEvent`] in the pass outcome and rendered by the caller, which keeps
//!   the core testable without log capture.
//!
//! # Invariants
//!
//! - After a successful forward pass, every directory and regular file under
//!   the source root has a structurally corresponding entry with equal
//!   content under the replica root (special entries excepted).
//! - After a successful backward pass, every regular file or directory under
//!   the replica root without a source counterpart has been removed, except
//!   directories kept non-empty by un-prunable special residue.
//! - Running a pass twice with no intervening filesystem change performs no
//!   work on the second run.
//!
//! # Errors
//!
//! Filesystem failures surface as [`SyncError`] values carrying the offending
//! path and the underlying [`io::Error`](std::io::Error). Errors are not
//! caught or retried inside a pass; they abort the remainder of the cycle and
//! propagate to the scheduler, whose periodic re-invocation retries the same
//! divergence on the next cycle.
//!
//! # Examples
//!
//! Run one full cycle against a pair of temporary trees:
//!
//! ```
//! use engine::SyncSession;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let source = temp.path().join("source");
//! let replica = temp.path().join("replica");
//! fs::create_dir(&source)?;
//! fs::create_dir(&replica)?;
//! fs::write(source.join("hello.txt"), b"hi")?;
//!
//! let report = SyncSession::new(&source, &replica)?.run()?;
//! assert_eq!(report.files_copied(), 1);
//! assert_eq!(fs::read(replica.join("hello.txt"))?, b"hi");
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod compare;
mod copy;
mod entry;
mod error;
mod event;
mod prune;
mod reconcile;
mod session;

pub use compare::files_identical;
pub use entry::EntryKind;
pub use error::SyncError;
pub use event::SyncEvent;
pub use prune::{PruneOutcome, prune};
pub use reconcile::{ForwardOutcome, reconcile};
pub use session::{CycleReport, SyncSession};
