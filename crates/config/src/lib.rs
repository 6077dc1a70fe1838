//! Environment file setup for applications configured through `.env` files.
//!
//! This crate provides the read/modify/write/reload cycle behind the
//! `envsetup` binary: creating the env file from its template, patching single
//! `KEY=VALUE` lines, keeping an in-memory view of the effective configuration
//! in sync with the file, and sequencing interactive setup steps.

pub mod constants;
pub mod dispatch;
pub mod editor;
mod error;
pub mod location;
pub mod prompt;
pub mod reload;
pub mod sequencer;
pub mod store;

pub use dispatch::{CommandDispatcher, OutputSink, ProcessDispatcher, SubCommand};
pub use editor::{VariableEditor, choice_list};
pub use error::EnvError;
pub use location::EnvLocation;
pub use prompt::{DefaultsPrompter, Prompter};
pub use reload::{ConfigReloader, Layer, Overlay, ResolvedConfig, ResolvedValue};
pub use sequencer::Sequencer;
pub use store::{EnsureOutcome, EnvFileStore};
