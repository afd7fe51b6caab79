#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the thin command-line front-end for the `syncdirs`
//! binary. The crate owns everything the reconciliation engine deliberately
//! does not: argument parsing, logging configuration, the fixed-interval
//! scheduling loop, and signal-driven shutdown. The engine exposes exactly
//! one operation ("run one synchronization cycle"); this crate decides when
//! to call it and how to render the structured events it returns.
//!
//! # Design
//!
//! - [`run_with`] is the sole entry point, taking the raw argument iterator
//!   so binary tests can drive it without spawning a process.
//! - Cycles never overlap: the scheduler runs one cycle to completion, sleeps
//!   the configured interval in short slices so a termination signal is
//!   honoured promptly, and repeats. Without `--interval` a single cycle is
//!   run and the process exits, which is also what the end-to-end tests use.
//! - Engine events are rendered through `tracing`: one `info!` line per
//!   state-changing action, one `warn!` line per skipped special entry, and a
//!   per-cycle summary. A failed cycle is logged and retried on the next tick
//!   in periodic mode; the stateless engine re-detects the same divergence.
//!
//! # Errors
//!
//! Argument errors exit with the code chosen by clap. Root selection errors
//! (missing or non-directory source/replica) exit with code 3; an I/O error
//! that aborts a single-cycle run exits with code 23; a run stopped by
//! SIGINT/SIGTERM exits with code 20.

mod exit_code;
mod frontend;
mod logging;
mod scheduler;
mod signal;

pub use exit_code::ExitCode;
pub use frontend::Cli;

use std::ffi::OsString;
use std::process::ExitCode as ProcessExitCode;

use clap::Parser;

/// Parses arguments, initialises logging and signal handling, and runs the
/// scheduler to completion.
pub fn run_with<I, T>(args: I) -> ProcessExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            // clap renders --help/--version on stdout and errors on stderr.
            let _ = error.print();
            return ProcessExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1));
        }
    };

    if let Err(message) = logging::init(&cli.log_level, cli.log_file.as_deref()) {
        eprintln!("syncdirs: {message}");
        return ExitCode::Syntax.process();
    }

    if let Err(error) = signal::install() {
        eprintln!("syncdirs: failed to install signal handlers: {error}");
        return ExitCode::Syntax.process();
    }

    scheduler::run(&cli).process()
}
