//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the appropriate command handler.
//! - Build the environment context for commands that work on an env file.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Setup plan loading; `setup` builds its own context once the plan is read.

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::context::EnvContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: &Cli) -> Result<()> {
    let context = || EnvContext::new(cli, None);

    match &cli.command {
        Commands::Init { reset } => commands::init::run(&mut context(), *reset, cli.verbose),
        Commands::Get { key, output } => commands::get::run_get(&mut context(), key, *output),
        Commands::Show { output } => commands::get::run_show(&mut context(), *output),
        Commands::Set {
            key,
            value,
            question,
        } => commands::set::run_set(
            &mut context(),
            key,
            value.as_deref(),
            question.as_deref(),
        ),
        Commands::Choose {
            key,
            choices,
            question,
        } => commands::set::run_choose(&mut context(), key, choices, question.as_deref()),
        Commands::Setup {
            plan,
            reset,
            accept_defaults,
        } => commands::setup::run(cli, plan, *reset, *accept_defaults),
    }
}
