//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `EnvError`, `PlanError`, and `CliError` to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit code 2 is left to clap for usage errors.
//! - Exit code 130 is reserved for an interrupted prompt (Unix standard: 128 + SIGINT).

use std::path::PathBuf;

use envsetup_config::EnvError;
use thiserror::Error;

use crate::plan::PlanError;

/// Structured exit codes for envsetup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// File system error - missing template, permission denied, disk full.
    FileSystem = 3,

    /// Key not found - no matching line in the env file, or key not set anywhere.
    NotFound = 4,

    /// Validation error - bad key name, multi-line value, malformed setup plan.
    ValidationError = 5,

    /// Reload failed - the env file could not be read or is not valid UTF-8.
    ReloadFailed = 6,

    /// A subordinate command failed during setup.
    CommandFailed = 7,

    /// Interrupted - Ctrl+C at a prompt (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Errors raised by the binary itself.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} is not set")]
    NotSet(String),

    #[error("Environment file {} does not exist; run `envsetup init` first", .0.display())]
    MissingEnvFile(PathBuf),
}

impl From<&EnvError> for ExitCode {
    fn from(err: &EnvError) -> Self {
        match err {
            EnvError::FileSystem { .. } => ExitCode::FileSystem,
            EnvError::KeyNotFound { .. } => ExitCode::NotFound,
            EnvError::ReloadParse { .. } | EnvError::ReloadIo { .. } => ExitCode::ReloadFailed,
            EnvError::InvalidKey(_) | EnvError::InvalidValue { .. } => ExitCode::ValidationError,
            EnvError::Prompt(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted => {
                ExitCode::Interrupted
            }
            EnvError::Prompt(_) | EnvError::Console(_) => ExitCode::GeneralError,
            EnvError::CommandFailed { .. } => ExitCode::CommandFailed,
        }
    }
}

impl From<&PlanError> for ExitCode {
    fn from(err: &PlanError) -> Self {
        match err {
            PlanError::Read { .. } => ExitCode::FileSystem,
            PlanError::Parse { .. } | PlanError::Invalid { .. } => ExitCode::ValidationError,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::NotSet(_) => ExitCode::NotFound,
            CliError::MissingEnvFile(_) => ExitCode::FileSystem,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<EnvError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<PlanError>() {
                return ExitCode::from(err);
            }
            if let Some(err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(err);
            }
        }

        ExitCode::GeneralError
    }
}
