//! Interaction sequencing for setup scripts.
//!
//! Responsibilities:
//! - Frame side-effecting steps with `<title>...` and `Done` markers.
//! - Route a step's own output to the console (verbose) or discard it (quiet).
//! - Group steps under section headers and print instruction lines.
//!
//! Does NOT handle:
//! - Prompting (see `editor` and `prompt`).
//! - Retrying failed steps.
//!
//! Invariants:
//! - `Done` is printed only after the action succeeded; a failed step never
//!   shows the completion marker and its error propagates unchanged.

use std::io::{self, Write};

use crate::constants::{INSTRUCTION_INDENT, STEP_DONE_MARKER, STEP_ELLIPSIS};
use crate::dispatch::{CommandDispatcher, OutputSink, SubCommand};
use crate::error::EnvError;
use crate::reload::ConfigReloader;

/// Prints the setup transcript and runs steps in order.
pub struct Sequencer<W: Write> {
    out: W,
    verbose: bool,
}

impl Sequencer<io::Stdout> {
    /// Sequencer writing to standard output.
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write> Sequencer<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self { out, verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Where step actions should send their own output.
    pub fn sink(&self) -> OutputSink {
        if self.verbose {
            OutputSink::Inherit
        } else {
            OutputSink::Null
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `<title>...`, run `action`, then print `Done`.
    ///
    /// In verbose mode the title and the marker sit on their own lines so the
    /// action's output appears between them; otherwise they share one line.
    pub fn run_step<T, E, F>(&mut self, title: &str, action: F) -> Result<T, E>
    where
        F: FnOnce(OutputSink) -> Result<T, E>,
        E: From<EnvError>,
    {
        if self.verbose {
            self.emit(|out| writeln!(out, "{}{}", title, STEP_ELLIPSIS))?;
        } else {
            self.emit(|out| write!(out, "{}{} ", title, STEP_ELLIPSIS))?;
        }

        match action(self.sink()) {
            Ok(value) => {
                self.emit(|out| writeln!(out, "{}", STEP_DONE_MARKER))?;
                Ok(value)
            }
            Err(e) => {
                if !self.verbose {
                    // Terminate the open title line; the caller reports the error.
                    // The action's error wins over any console error here.
                    let _ = writeln!(self.out);
                    let _ = self.out.flush();
                }
                Err(e)
            }
        }
    }

    /// Run a subordinate command as a step.
    pub fn run_command(
        &mut self,
        dispatcher: &dyn CommandDispatcher,
        command: &SubCommand,
        description: &str,
        config: &mut ConfigReloader,
    ) -> Result<(), EnvError> {
        self.run_step(description, |sink| {
            let state = config.state()?;
            dispatcher.dispatch(command, sink, state)
        })
    }

    /// Print `<title>:` and run `body`.
    pub fn section<T, E, F>(&mut self, title: &str, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<EnvError>,
    {
        self.emit(|out| writeln!(out, "{}:", title))?;
        body(self)
    }

    /// Print an indented instruction line.
    pub fn instruction(&mut self, text: &str) -> Result<(), EnvError> {
        self.emit(|out| writeln!(out, "{}{}", INSTRUCTION_INDENT, text))
    }

    fn emit(&mut self, write: impl FnOnce(&mut W) -> io::Result<()>) -> Result<(), EnvError> {
        write(&mut self.out)
            .and_then(|()| self.out.flush())
            .map_err(EnvError::Console)
    }
}
