//! Error types for environment file operations.
//!
//! Responsibilities:
//! - Define error variants for every failure of the read/modify/write/reload cycle.
//! - Carry the path, key, or command that failed so callers can report it.
//!
//! Does NOT handle:
//! - Exit code mapping (see the binary's `error.rs`).
//! - Retrying or recovering; all variants propagate to the immediate caller.
//!
//! Invariants:
//! - Reload errors NEVER include raw env file line contents to prevent secret leakage.
//! - Errors never include configuration values, only keys and paths.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while creating, editing, or reloading the environment file.
#[derive(Error, Debug)]
pub enum EnvError {
    /// Copy, read, or write failure on the named path.
    #[error("File system error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No line of the file matched `KEY=<current value>`.
    ///
    /// `drifted` is set when a line for the key exists but holds a value other
    /// than the one currently resolved, i.e. the file was edited behind our back.
    #[error("{}", key_not_found_message(.key, .path, .drifted))]
    KeyNotFound {
        key: String,
        path: PathBuf,
        drifted: bool,
    },

    /// The env file is not valid UTF-8.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error("Failed to parse env file at {path} (position {error_index})")]
    ReloadParse { path: PathBuf, error_index: usize },

    /// Failed to read the env file while reloading.
    #[error("Failed to read env file at {path}: {kind}")]
    ReloadIo { path: PathBuf, kind: ErrorKind },

    #[error("Invalid key '{0}': keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// The prompt collaborator failed (closed terminal, interrupted input).
    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// Writing the setup transcript failed.
    #[error("Failed to write console output: {0}")]
    Console(#[source] std::io::Error),

    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },
}

impl EnvError {
    /// Returns true for any of the reload failure variants.
    pub fn is_reload(&self) -> bool {
        matches!(
            self,
            EnvError::ReloadParse { .. } | EnvError::ReloadIo { .. }
        )
    }

    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EnvError::FileSystem {
            path: path.into(),
            source,
        }
    }
}

fn key_not_found_message(key: &str, path: &std::path::Path, drifted: &bool) -> String {
    if *drifted {
        format!(
            "Key {} in {} holds a different value than the loaded configuration; refusing to overwrite",
            key,
            path.display()
        )
    } else {
        format!("Key {} not found in {}", key, path.display())
    }
}
