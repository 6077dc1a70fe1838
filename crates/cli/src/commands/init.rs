//! Init command implementation.
//!
//! Responsibilities:
//! - Create the env file from its template, or recreate it with `--reset`.
//!
//! Does NOT handle:
//! - Prompting for values (see `set` and `setup`).

use anyhow::{Context, Result};
use envsetup_config::{EnsureOutcome, Sequencer};

use crate::context::EnvContext;

/// Run the init command.
pub fn run(ctx: &mut EnvContext, reset: bool, verbose: bool) -> Result<()> {
    let template = ctx.location().template_path().to_path_buf();

    if ctx.store.exists() && !reset {
        println!(
            "{} already exists; pass --reset to recreate it from {}",
            ctx.store.path().display(),
            template.display()
        );
        return Ok(());
    }

    let mut sequencer = Sequencer::stdout(verbose);
    let outcome = sequencer
        .run_step("Creating environment file", |_| {
            ctx.store.ensure_file(&template, reset, &mut ctx.config)
        })
        .with_context(|| format!("Failed to create {}", ctx.store.path().display()))?;

    if outcome == EnsureOutcome::Created {
        tracing::info!(path = %ctx.store.path().display(), reset, "Env file initialized");
    }
    Ok(())
}
