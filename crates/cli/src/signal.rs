//! Signal-driven shutdown flags.
//!
//! Handlers must be async-signal-safe, so they only set an atomic flag; the
//! scheduler polls the flag between cycles and between sleep slices. The
//! current cycle always runs to completion - an interrupted pass would leave
//! the replica partially synchronized, which the next run converges anyway,
//! but there is no reason to abandon work mid-entry.
#![allow(unsafe_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Reports whether SIGINT or SIGTERM has been received.
pub(crate) fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}

#[cfg(test)]
pub(crate) fn request_shutdown() {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

#[cfg(test)]
pub(crate) fn reset() {
    SHUTDOWN_REQUESTED.store(false, Ordering::SeqCst);
}

#[cfg(unix)]
extern "C" fn handle_signal(_signum: libc::c_int) {
    SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
}

/// Installs SIGINT and SIGTERM handlers that request a graceful stop.
#[cfg(unix)]
pub(crate) fn install() -> io::Result<()> {
    let handler = handle_signal as extern "C" fn(libc::c_int);
    for signal in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: the handler only stores to an atomic, which is
        // async-signal-safe.
        let previous = unsafe { libc::signal(signal, handler as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Non-Unix fallback: no handlers are installed and the default Ctrl+C
/// behaviour terminates the process.
#[cfg(not(unix))]
pub(crate) fn install() -> io::Result<()> {
    Ok(())
}
