//! The periodic driver loop around the engine's single-cycle entry point.

use std::thread;
use std::time::Duration;

use tracing::{error, info, warn};

use engine::{CycleReport, SyncError, SyncSession};

use crate::exit_code::ExitCode;
use crate::frontend::Cli;
use crate::signal;

/// Granularity at which the inter-cycle sleep checks the shutdown flag.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Runs synchronization cycles until the configured schedule ends or a
/// shutdown signal arrives.
///
/// Root selection errors are fatal in either mode. Other cycle errors are
/// fatal in single-cycle mode; in periodic mode they are logged and the next
/// cycle retries, since the stateless engine will detect the same divergence
/// again.
pub(crate) fn run(cli: &Cli) -> ExitCode {
    loop {
        if signal::shutdown_requested() {
            info!("stopped by signal");
            return ExitCode::Signal;
        }

        match run_cycle(cli) {
            Ok(report) => render(&report),
            Err(error) => {
                error!("cycle aborted: {error}");
                if cli.interval.is_none() || error.is_root_error() {
                    return ExitCode::from_error(&error);
                }
            }
        }

        let Some(interval) = cli.interval else {
            return ExitCode::Ok;
        };
        if !sleep_interruptibly(interval) {
            info!("stopped by signal");
            return ExitCode::Signal;
        }
    }
}

fn run_cycle(cli: &Cli) -> Result<CycleReport, SyncError> {
    SyncSession::new(&cli.source, &cli.replica)?.run()
}

fn render(report: &CycleReport) {
    for event in report.events() {
        if event.is_warning() {
            warn!("{event}");
        } else {
            info!("{event}");
        }
    }
    info!(
        "cycle complete: {} directories created, {} files copied, {} files removed, \
         {} directories removed, {} special entries skipped",
        report.directories_created(),
        report.files_copied(),
        report.files_removed(),
        report.directories_removed(),
        report.specials_skipped(),
    );
}

/// Sleeps for `duration` in short slices, returning `false` as soon as a
/// shutdown request is observed.
fn sleep_interruptibly(duration: Duration) -> bool {
    let mut remaining = duration;
    while remaining > Duration::ZERO {
        if signal::shutdown_requested() {
            return false;
        }
        let slice = remaining.min(SLEEP_SLICE);
        thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
    !signal::shutdown_requested()
}
