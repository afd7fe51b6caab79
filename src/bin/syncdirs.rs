#![deny(unsafe_code)]

use mimalloc::MiMalloc;

/// High-performance memory allocator for improved allocation throughput.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::{env, process::ExitCode};

fn main() -> ExitCode {
    cli::run_with(env::args_os())
}
