//! Composition root for the environment file being edited.
//!
//! Responsibilities:
//! - Decide which env file and template a command works on.
//! - Build the `EnvFileStore` and `ConfigReloader` for that file.
//!
//! Does NOT handle:
//! - Loading the setup plan (see `plan`).
//!
//! Invariants:
//! - Path precedence is command-line flag (or its environment variable), then
//!   setup plan, then the default `.env` / `.env.example` pair.
//! - The process environment is the process overlay; there is no server
//!   overlay in the CLI.

use std::path::Path;

use envsetup_config::{ConfigReloader, EnvFileStore, EnvLocation};

use crate::args::Cli;
use crate::error::CliError;
use crate::plan::SetupPlan;

pub(crate) struct EnvContext {
    location: EnvLocation,
    pub(crate) store: EnvFileStore,
    pub(crate) config: ConfigReloader,
}

impl EnvContext {
    pub(crate) fn new(cli: &Cli, plan: Option<&SetupPlan>) -> Self {
        let env_file = cli
            .env_file_flag()
            .map(Path::to_path_buf)
            .or_else(|| plan.and_then(SetupPlan::env_file_path))
            .unwrap_or_else(|| cli.env_file_path());

        let mut location = EnvLocation::from_file_path(&env_file);
        if let Some(template) = cli
            .template_flag()
            .map(Path::to_path_buf)
            .or_else(|| plan.and_then(SetupPlan::template_path))
        {
            location = location.with_template(template);
        }

        tracing::debug!(
            env_file = %location.file_path().display(),
            template = %location.template_path().display(),
            "Environment context resolved"
        );

        Self {
            store: EnvFileStore::new(location.file_path()),
            config: ConfigReloader::new(location.file_path()),
            location,
        }
    }

    pub(crate) fn location(&self) -> &EnvLocation {
        &self.location
    }

    /// Fail unless the env file exists; editing commands never create it.
    pub(crate) fn require_env_file(&self) -> Result<(), CliError> {
        if self.store.exists() {
            Ok(())
        } else {
            Err(CliError::MissingEnvFile(self.store.path().to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    fn plan_in(dir: &str, env_file: Option<&str>, template: Option<&str>) -> SetupPlan {
        SetupPlan {
            env_file: env_file.map(PathBuf::from),
            template: template.map(PathBuf::from),
            base_dir: PathBuf::from(dir),
            ..SetupPlan::default()
        }
    }

    #[test]
    fn test_flag_beats_plan() {
        let cli = Cli::try_parse_from([
            "envsetup",
            "show",
            "--env-file",
            "flag/.env",
            "--template",
            "flag/.env.dist",
        ])
        .unwrap();
        let plan = plan_in("app", Some(".env.local"), Some(".env.example"));

        let ctx = EnvContext::new(&cli, Some(&plan));

        assert_eq!(ctx.location().file_path(), PathBuf::from("flag/.env"));
        assert_eq!(ctx.location().template_path(), Path::new("flag/.env.dist"));
    }

    #[test]
    fn test_plan_paths_resolve_against_plan_dir() {
        let cli = Cli::try_parse_from(["envsetup", "show"]).unwrap();
        if cli.env_file_flag().is_some() || cli.template_flag().is_some() {
            // Host environment sets ENVSETUP_*; precedence is covered above.
            return;
        }
        let plan = plan_in("app", Some(".env.local"), None);

        let ctx = EnvContext::new(&cli, Some(&plan));

        assert_eq!(ctx.location().file_path(), PathBuf::from("app/.env.local"));
        assert_eq!(ctx.location().template_path(), Path::new("app/.env.example"));
    }
}
