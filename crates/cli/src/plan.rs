//! Setup plan files.
//!
//! Responsibilities:
//! - Parse the TOML setup plan that drives `envsetup setup`.
//! - Resolve the plan's file paths relative to the plan's own directory.
//! - Reject plans with invalid keys or empty choice lists before anything runs.
//!
//! Does NOT handle:
//! - Executing the plan (see `commands::setup`).
//!
//! Example:
//!
//! ```toml
//! template = ".env.example"
//!
//! [[section]]
//! title = "Database"
//!
//! [[section.step]]
//! kind = "instruction"
//! text = "Pick the database your app talks to."
//!
//! [[section.step]]
//! kind = "choose"
//! key = "DB_CONNECTION"
//! choices = ["mysql", "pgsql", "sqlite"]
//!
//! [[section.step]]
//! kind = "command"
//! description = "Running migrations"
//! program = "php"
//! args = ["artisan", "migrate"]
//! ```

use std::path::{Path, PathBuf};

use envsetup_config::store::is_valid_key;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a setup plan.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to read setup plan at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse setup plan at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid setup plan at {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// A setup script: where the env file lives and what to ask for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupPlan {
    /// Template path, relative to the plan file.
    pub template: Option<PathBuf>,
    /// Env file path, relative to the plan file.
    pub env_file: Option<PathBuf>,
    #[serde(default, rename = "section")]
    pub sections: Vec<Section>,
    /// Directory the plan was loaded from.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub title: String,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    /// Print an instruction line.
    Instruction { text: String },
    /// Pick a value from a list.
    Choose {
        key: String,
        choices: Vec<String>,
        question: Option<String>,
    },
    /// Type a value.
    Set {
        key: String,
        question: Option<String>,
    },
    /// Write a fixed value without asking.
    Write { key: String, value: String },
    /// Run a subordinate command.
    Command {
        description: String,
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl SetupPlan {
    /// Read and validate the plan at `path`.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path).map_err(|source| PlanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut plan: SetupPlan = toml::from_str(&content).map_err(|source| PlanError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        plan.base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        plan.validate().map_err(|message| PlanError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;

        tracing::debug!(
            path = %path.display(),
            sections = plan.sections.len(),
            "Setup plan loaded"
        );
        Ok(plan)
    }

    /// Env file path resolved against the plan directory.
    pub fn env_file_path(&self) -> Option<PathBuf> {
        self.env_file.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Template path resolved against the plan directory.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_ref().map(|p| self.base_dir.join(p))
    }

    fn validate(&self) -> Result<(), String> {
        for section in &self.sections {
            for step in &section.steps {
                let key = match step {
                    Step::Choose { key, choices, .. } => {
                        if choices.is_empty() {
                            return Err(format!(
                                "section '{}': choose step for {} has no choices",
                                section.title, key
                            ));
                        }
                        key
                    }
                    Step::Set { key, .. } | Step::Write { key, .. } => key,
                    Step::Instruction { .. } | Step::Command { .. } => continue,
                };
                if !is_valid_key(key) {
                    return Err(format!("section '{}': invalid key '{}'", section.title, key));
                }
            }
        }
        Ok(())
    }
}
