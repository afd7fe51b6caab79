use engine::SyncError;

/// Process exit codes for the `syncdirs` binary.
///
/// The numbering follows rsync's convention: usage errors are 1, problems
/// selecting the input/output directories are 3, a cycle aborted partway by
/// an I/O failure is 23, and termination by signal is 20.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ExitCode {
    /// Successful completion.
    Ok = 0,
    /// Syntax or usage error.
    Syntax = 1,
    /// The source or replica root is missing or not a directory.
    FileSelect = 3,
    /// Stopped by SIGINT or SIGTERM.
    Signal = 20,
    /// A cycle was aborted by an I/O error, leaving the replica partially
    /// synchronized.
    Partial = 23,
}

impl ExitCode {
    /// Maps an engine error to the exit code it should terminate with.
    #[must_use]
    pub fn from_error(error: &SyncError) -> Self {
        if error.is_root_error() {
            Self::FileSelect
        } else {
            Self::Partial
        }
    }

    /// Converts into the [`std::process::ExitCode`] returned from `main`.
    #[must_use]
    pub fn process(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self as u8)
    }
}
