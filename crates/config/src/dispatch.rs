//! Subordinate command dispatch.
//!
//! Responsibilities:
//! - Describe a subordinate command (program + arguments).
//! - Run it with its output either shown or discarded.
//! - Hand the resolved configuration to the child so it sees the values just written.
//!
//! Does NOT handle:
//! - Console framing around the command (see `sequencer`).
//! - Shell parsing; arguments are passed verbatim.

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::error::EnvError;
use crate::reload::ResolvedConfig;

/// Where a step's own output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSink {
    /// Shown on the operator's console.
    Inherit,
    /// Discarded.
    Null,
}

impl OutputSink {
    pub fn stdio(self) -> Stdio {
        match self {
            OutputSink::Inherit => Stdio::inherit(),
            OutputSink::Null => Stdio::null(),
        }
    }
}

/// A named subordinate operation, e.g. `php artisan config:clear`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl SubCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for SubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs subordinate commands on behalf of the setup sequence.
pub trait CommandDispatcher {
    /// Run `command`, sending its output to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::CommandFailed` if the command cannot be started or
    /// does not succeed.
    fn dispatch(
        &self,
        command: &SubCommand,
        sink: OutputSink,
        config: &ResolvedConfig,
    ) -> Result<(), EnvError>;
}

/// Dispatches commands as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessDispatcher {
    working_dir: Option<PathBuf>,
}

impl ProcessDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run children from `dir` instead of the current directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl CommandDispatcher for ProcessDispatcher {
    fn dispatch(
        &self,
        command: &SubCommand,
        sink: OutputSink,
        config: &ResolvedConfig,
    ) -> Result<(), EnvError> {
        let mut child = Command::new(&command.program);
        child
            .args(&command.args)
            .envs(config.iter())
            .stdin(Stdio::null())
            .stdout(sink.stdio())
            .stderr(sink.stdio());
        if let Some(dir) = &self.working_dir {
            child.current_dir(dir);
        }

        tracing::debug!(command = %command, ?sink, "Dispatching command");
        let status = child.status().map_err(|e| EnvError::CommandFailed {
            command: command.to_string(),
            message: e.to_string(),
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(EnvError::CommandFailed {
                command: command.to_string(),
                message: format!("exited with {}", status),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::{ConfigReloader, Overlay};
    use std::fs;
    use tempfile::TempDir;

    fn resolved(contents: &str) -> (TempDir, ResolvedConfig) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        let mut config = ConfigReloader::new(path).with_process_overlay(Overlay::Empty);
        let state = config.state().unwrap().clone();
        (dir, state)
    }

    #[test]
    fn test_display_joins_args() {
        let command = SubCommand::new("php", ["artisan", "config:clear"]);
        assert_eq!(command.to_string(), "php artisan config:clear");
    }

    #[cfg(unix)]
    #[test]
    fn test_child_sees_resolved_configuration() {
        let (_dir, state) = resolved("APP_URL=http://localhost\n");
        let command = SubCommand::new("sh", ["-c", "test \"$APP_URL\" = http://localhost"]);

        ProcessDispatcher::new()
            .dispatch(&command, OutputSink::Null, &state)
            .unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_command_failed() {
        let (_dir, state) = resolved("");
        let command = SubCommand::new("sh", ["-c", "exit 3"]);

        let err = ProcessDispatcher::new()
            .dispatch(&command, OutputSink::Null, &state)
            .unwrap_err();

        assert!(matches!(err, EnvError::CommandFailed { .. }));
    }

    #[test]
    fn test_missing_program_is_command_failed() {
        let (_dir, state) = resolved("");
        let command = SubCommand::new("envsetup-definitely-not-a-program", Vec::<String>::new());

        let err = ProcessDispatcher::new()
            .dispatch(&command, OutputSink::Null, &state)
            .unwrap_err();

        assert!(err.to_string().contains("envsetup-definitely-not-a-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_working_dir_is_applied() {
        let (dir, state) = resolved("");
        let command = SubCommand::new("sh", ["-c", "test -f .env"]);

        ProcessDispatcher::new()
            .with_working_dir(dir.path())
            .dispatch(&command, OutputSink::Null, &state)
            .unwrap();
    }
}
