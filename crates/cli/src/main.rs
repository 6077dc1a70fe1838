//! envsetup - interactive editor for an application's `.env` file.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging and route to the command handlers.
//! - Translate failures into structured exit codes.
//!
//! Does NOT handle:
//! - File editing or configuration reloading (see `crates/config`).
//!
//! Invariants:
//! - The `.env` file is never loaded into the process environment; it is the
//!   file being edited, and loading it would turn it into a process overlay.
//! - Logs go to stderr so stdout carries only the setup transcript and command output.

mod args;
mod commands;
mod context;
mod dispatch;
mod error;
mod interactive;
mod plan;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(&cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => match e.exit_code() {
            ExitCode::Interrupted => {
                eprintln!("\nOperation cancelled by user");
                ExitCode::Interrupted
            }
            code => {
                eprintln!("{:#}", e);
                code
            }
        },
    };

    std::process::exit(exit_code.as_i32());
}
