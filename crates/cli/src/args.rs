//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the env file and template locations from flags and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the reloader or store (see `context` module).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use envsetup_config::constants::DEFAULT_ENV_FILE_NAME;

#[derive(Parser)]
#[command(name = "envsetup")]
#[command(about = "Create and edit an application's .env file interactively", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envsetup init\n  envsetup setup --plan envsetup.toml\n  envsetup choose DB_CONNECTION mysql pgsql sqlite\n  envsetup set APP_URL https://example.test\n  envsetup get APP_URL --output json\n"
)]
pub struct Cli {
    /// Path to the environment file
    #[arg(long, global = true, env = "ENVSETUP_ENV_FILE", value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Path to the template the environment file is created from
    /// (defaults to .env.example next to the env file)
    #[arg(long, global = true, env = "ENVSETUP_TEMPLATE", value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Show the output of commands run during setup
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The env file given by flag or environment variable. Blank values are ignored.
    pub fn env_file_flag(&self) -> Option<&Path> {
        self.env_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    pub fn template_flag(&self) -> Option<&Path> {
        self.template
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// The env file path requested on the command line, or `./.env`.
    pub fn env_file_path(&self) -> PathBuf {
        self.env_file_flag()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_FILE_NAME))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the environment file from its template
    Init {
        /// Overwrite an existing environment file
        #[arg(long)]
        reset: bool,
    },

    /// Print the effective value of a key
    Get {
        key: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Print every key declared in the environment file with its effective value
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },

    /// Set a key, prompting for the value when none is given
    Set {
        key: String,

        /// New value; omit to be prompted
        value: Option<String>,

        /// Question shown in the prompt
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Choose a key's value from a list
    Choose {
        key: String,

        /// Values to offer
        #[arg(required = true)]
        choices: Vec<String>,

        /// Question shown in the prompt
        #[arg(short, long)]
        question: Option<String>,
    },

    /// Run a setup plan: create the env file, prompt for values, run commands
    Setup {
        /// Setup plan file
        #[arg(long, default_value = "envsetup.toml", value_name = "FILE")]
        plan: PathBuf,

        /// Recreate the environment file from the template first
        #[arg(long)]
        reset: bool,

        /// Accept the current value for every prompt instead of asking
        #[arg(long)]
        accept_defaults: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
