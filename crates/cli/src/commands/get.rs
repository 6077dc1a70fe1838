//! Get and show command implementations.
//!
//! Responsibilities:
//! - Print the effective value of one key, or of every key the env file declares.
//! - Report which layer (file, process, server) supplied each value.
//!
//! Does NOT handle:
//! - Modifying the env file (see `set`).

use std::fmt::Write as _;

use anyhow::{Context, Result};
use envsetup_config::{Layer, ResolvedConfig};
use serde::Serialize;

use crate::args::OutputFormat;
use crate::context::EnvContext;
use crate::error::CliError;

/// One row of `get`/`show` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    pub key: String,
    pub value: String,
    pub source: Layer,
}

/// Run the get command.
pub fn run_get(ctx: &mut EnvContext, key: &str, output: OutputFormat) -> Result<()> {
    let resolved = ctx
        .config
        .resolved(key)
        .with_context(|| format!("Failed to read {}", key))?
        .ok_or_else(|| CliError::NotSet(key.to_string()))?;

    let entry = KeyEntry {
        key: key.to_string(),
        value: resolved.value,
        source: resolved.layer,
    };
    match output {
        // Bare value so `$(envsetup get KEY)` works in scripts.
        OutputFormat::Table => println!("{}", entry.value),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }
    Ok(())
}

/// Run the show command.
pub fn run_show(ctx: &mut EnvContext, output: OutputFormat) -> Result<()> {
    let state = ctx
        .config
        .state()
        .with_context(|| format!("Failed to load {}", ctx.store.path().display()))?;
    let entries = declared_entries(state);

    match output {
        OutputFormat::Table => print!("{}", format_table(&entries)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
    }
    Ok(())
}

/// Keys declared in the env file, in file order, with their effective values.
pub fn declared_entries(state: &ResolvedConfig) -> Vec<KeyEntry> {
    state
        .file_keys()
        .iter()
        .filter_map(|key| {
            state.get(key).map(|resolved| KeyEntry {
                key: key.clone(),
                value: resolved.value.clone(),
                source: resolved.layer,
            })
        })
        .collect()
}

pub fn format_table(entries: &[KeyEntry]) -> String {
    let key_width = entries
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(0)
        .max("KEY".len());
    let value_width = entries
        .iter()
        .map(|e| e.value.chars().count())
        .max()
        .unwrap_or(0)
        .max("VALUE".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<kw$}  {:<vw$}  SOURCE",
        "KEY",
        "VALUE",
        kw = key_width,
        vw = value_width
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<kw$}  {:<vw$}  {}",
            entry.key,
            entry.value,
            entry.source,
            kw = key_width,
            vw = value_width
        );
    }
    out
}
