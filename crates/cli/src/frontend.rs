//! Command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Arguments accepted by the `syncdirs` binary.
#[derive(Debug, Parser)]
#[command(
    name = "syncdirs",
    version,
    about = "One-way periodic directory synchronization",
    long_about = "Keeps a replica directory tree identical to a source tree: new and \
changed files and directories are copied forward, entries that no longer exist in the \
source are removed from the replica. With --interval the cycle repeats until the \
process is terminated; without it a single cycle is run."
)]
pub struct Cli {
    /// Source directory to synchronize from.
    #[arg(short, long, value_name = "DIR")]
    pub source: PathBuf,

    /// Replica directory kept identical to the source.
    #[arg(short, long, value_name = "DIR")]
    pub replica: PathBuf,

    /// Seconds between synchronization cycles; run a single cycle when omitted.
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Append log output to this file in addition to stdout.
    #[arg(short, long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

fn parse_interval(raw: &str) -> Result<Duration, String> {
    let seconds: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(String::from("interval must be a positive number of seconds"));
    }
    Ok(Duration::from_secs_f64(seconds))
}
