//! Set and choose command implementations.
//!
//! Responsibilities:
//! - Commit a value for one key, either given on the command line or prompted for.
//! - Offer a choice list seeded with the key's current value.
//!
//! Does NOT handle:
//! - Creating the env file; it must already exist (see `init`).
//!
//! Invariants:
//! - Only the single `KEY=<current value>` line changes; everything else in the
//!   file is preserved byte for byte.

use anyhow::{Context, Result};
use envsetup_config::VariableEditor;

use crate::commands::warn_if_shadowed;
use crate::context::EnvContext;
use crate::interactive::DialoguerPrompter;

/// Run the set command.
pub fn run_set(
    ctx: &mut EnvContext,
    key: &str,
    value: Option<&str>,
    question: Option<&str>,
) -> Result<()> {
    ctx.require_env_file()?;

    let mut prompter = DialoguerPrompter::new();
    let mut editor = VariableEditor::new(&ctx.store, &mut ctx.config, &mut prompter);
    let written = match value {
        Some(value) => editor.write_variable(key, value),
        None => editor.set_variable(key, question).map(drop),
    };
    written.with_context(|| format!("Failed to set {}", key))?;

    tracing::info!(key, path = %ctx.store.path().display(), "Key updated");
    warn_if_shadowed(&mut ctx.config, key)
}

/// Run the choose command.
pub fn run_choose(
    ctx: &mut EnvContext,
    key: &str,
    choices: &[String],
    question: Option<&str>,
) -> Result<()> {
    ctx.require_env_file()?;

    let mut prompter = DialoguerPrompter::new();
    let value = VariableEditor::new(&ctx.store, &mut ctx.config, &mut prompter)
        .choose_variable(key, choices, question)
        .with_context(|| format!("Failed to set {}", key))?;

    tracing::info!(key, path = %ctx.store.path().display(), "Key chosen");
    if value.is_empty() {
        eprintln!("note: {} was left empty", key);
    }
    warn_if_shadowed(&mut ctx.config, key)
}
