//! Environment file location.
//!
//! Responsibilities:
//! - Describe where the environment file and its template live.
//! - Expose the accessor surface the rest of the crate needs (path, declared file name).
//!
//! Does NOT handle:
//! - File I/O (see `store`).
//! - Discovering the application root; callers pass the directory explicitly.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_ENV_FILE_NAME, DEFAULT_TEMPLATE_FILE_NAME};

/// Where the environment file and its template live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLocation {
    dir: PathBuf,
    file_name: String,
    template: PathBuf,
}

impl EnvLocation {
    /// Location for `.env` and `.env.example` inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            template: dir.join(DEFAULT_TEMPLATE_FILE_NAME),
            dir,
            file_name: DEFAULT_ENV_FILE_NAME.to_string(),
        }
    }

    /// Build a location from an explicit env file path.
    ///
    /// The template defaults to `.env.example` next to the env file.
    pub fn from_file_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_ENV_FILE_NAME.to_string());
        Self {
            template: dir.join(DEFAULT_TEMPLATE_FILE_NAME),
            dir,
            file_name,
        }
    }

    /// Override the env file name (e.g. `.env.local`).
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Override the template path.
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = template.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The declared env file name, without directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the environment file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn template_path(&self) -> &Path {
        &self.template
    }
}
