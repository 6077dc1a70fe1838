//! Setup command implementation.
//!
//! Responsibilities:
//! - Run a setup plan: create the env file if needed, then walk its sections,
//!   printing instructions, prompting for values, and running commands.
//!
//! Does NOT handle:
//! - Parsing the plan file (see `plan`).
//!
//! Invariants:
//! - Every write reloads the configuration before the next step runs, so later
//!   prompts and commands see earlier answers.
//! - Commands run from the plan's directory with the resolved configuration in
//!   their environment.
//! - A failing step stops the run; earlier writes are kept.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use envsetup_config::{
    CommandDispatcher, DefaultsPrompter, ProcessDispatcher, Prompter, Sequencer, SubCommand,
    VariableEditor,
};

use crate::args::Cli;
use crate::context::EnvContext;
use crate::interactive::DialoguerPrompter;
use crate::plan::{Section, SetupPlan, Step};

/// Run the setup command.
pub fn run(cli: &Cli, plan_path: &Path, reset: bool, accept_defaults: bool) -> Result<()> {
    let plan = SetupPlan::load(plan_path)?;
    let mut ctx = EnvContext::new(cli, Some(&plan));

    let mut prompter: Box<dyn Prompter> = if accept_defaults {
        Box::new(DefaultsPrompter)
    } else {
        Box::new(DialoguerPrompter::new())
    };
    let dispatcher = ProcessDispatcher::new().with_working_dir(&plan.base_dir);
    let mut sequencer = Sequencer::stdout(cli.verbose);

    run_plan(
        &mut sequencer,
        &plan,
        &mut ctx,
        prompter.as_mut(),
        &dispatcher,
        reset,
    )
}

/// Walk `plan` against `ctx`, writing the transcript to `sequencer`.
pub(crate) fn run_plan<W: Write>(
    sequencer: &mut Sequencer<W>,
    plan: &SetupPlan,
    ctx: &mut EnvContext,
    prompter: &mut dyn Prompter,
    dispatcher: &dyn CommandDispatcher,
    reset: bool,
) -> Result<()> {
    if reset || !ctx.store.exists() {
        let template = ctx.location().template_path().to_path_buf();
        sequencer
            .run_step("Creating environment file", |_| {
                ctx.store.ensure_file(&template, reset, &mut ctx.config)
            })
            .with_context(|| format!("Failed to create {}", ctx.store.path().display()))?;
    }

    for section in &plan.sections {
        sequencer.section(&section.title, |sequencer| {
            run_section(sequencer, section, &mut *ctx, &mut *prompter, dispatcher)
        })?;
    }

    tracing::info!(
        path = %ctx.store.path().display(),
        sections = plan.sections.len(),
        "Setup finished"
    );
    Ok(())
}

fn run_section<W: Write>(
    sequencer: &mut Sequencer<W>,
    section: &Section,
    ctx: &mut EnvContext,
    prompter: &mut dyn Prompter,
    dispatcher: &dyn CommandDispatcher,
) -> Result<()> {
    for step in &section.steps {
        match step {
            Step::Instruction { text } => sequencer.instruction(text)?,
            Step::Choose {
                key,
                choices,
                question,
            } => {
                VariableEditor::new(&ctx.store, &mut ctx.config, &mut *prompter)
                    .choose_variable(key, choices, question.as_deref())
                    .with_context(|| format!("Failed to set {}", key))?;
            }
            Step::Set { key, question } => {
                VariableEditor::new(&ctx.store, &mut ctx.config, &mut *prompter)
                    .set_variable(key, question.as_deref())
                    .with_context(|| format!("Failed to set {}", key))?;
            }
            Step::Write { key, value } => {
                VariableEditor::new(&ctx.store, &mut ctx.config, &mut *prompter)
                    .write_variable(key, value)
                    .with_context(|| format!("Failed to set {}", key))?;
            }
            Step::Command {
                description,
                program,
                args,
            } => {
                let command = SubCommand::new(program.as_str(), args.iter().cloned());
                sequencer
                    .run_command(dispatcher, &command, description, &mut ctx.config)
                    .with_context(|| format!("{} failed", description))?;
            }
        }
    }
    Ok(())
}
