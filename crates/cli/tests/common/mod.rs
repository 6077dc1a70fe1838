//! Shared test utilities for envsetup integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//! - Lay out throwaway project directories with a template and env file.
//!
//! Invariants / Assumptions:
//! - `ENVSETUP_*` variables and the keys used by fixtures are cleared so the
//!   host environment cannot act as a process overlay.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Keys the fixtures declare; removed from the child environment.
pub const FIXTURE_KEYS: &[&str] = &["APP_NAME", "APP_URL", "APP_ENV", "DB_CONNECTION", "DB_HOST"];

pub const TEMPLATE: &str = "\
# Application
APP_NAME=Demo
APP_URL=http://localhost

DB_CONNECTION=mysql
DB_HOST=127.0.0.1
";

/// Returns a hermetic `envsetup` command running inside `dir`.
pub fn envsetup_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envsetup");
    cmd.current_dir(dir)
        .env_remove("ENVSETUP_ENV_FILE")
        .env_remove("ENVSETUP_TEMPLATE")
        .env_remove("RUST_LOG");
    for key in FIXTURE_KEYS {
        cmd.env_remove(key);
    }
    cmd
}

/// A project directory holding `.env.example` and optionally `.env`.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn with_template() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env.example"), TEMPLATE).unwrap();
        Self { dir }
    }

    pub fn initialized() -> Self {
        let project = Self::with_template();
        fs::write(project.env_path(), TEMPLATE).unwrap();
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn env_path(&self) -> PathBuf {
        self.dir.path().join(".env")
    }

    pub fn env_contents(&self) -> String {
        fs::read_to_string(self.env_path()).unwrap()
    }

    pub fn cmd(&self) -> Command {
        envsetup_cmd(self.path())
    }
}
