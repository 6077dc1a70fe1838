//! Reloadable configuration state derived from the env file.
//!
//! Responsibilities:
//! - Read `KEY=VALUE` lines from the env file without touching the process environment.
//! - Layer process-level and server-level overlays over the file values.
//! - Answer "what is the effective value of KEY right now".
//!
//! Does NOT handle:
//! - Writing the env file (see `store`).
//! - Exporting values into the process environment.
//!
//! Invariants / Assumptions:
//! - `reload()` replaces the cached state wholesale or not at all.
//! - A failed reload keeps the previous state (stale but consistent).
//! - A missing env file is an empty file layer, not an error.
//! - Values are never logged; keys and paths are.

mod overlay;
mod parse;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::EnvError;
pub use overlay::{Layer, Overlay};

/// A value together with the layer that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedValue {
    pub value: String,
    pub layer: Layer,
}

/// One consistent view of the configuration.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ResolvedValue>,
    /// Raw file-layer values, before overlays.
    file_values: BTreeMap<String, String>,
    /// Keys declared in the env file, in file order.
    file_keys: Vec<String>,
}

impl ResolvedConfig {
    fn build(
        file: Vec<(String, String)>,
        process: BTreeMap<String, String>,
        server: BTreeMap<String, String>,
    ) -> Self {
        let mut values = BTreeMap::new();
        let mut file_values = BTreeMap::new();
        let mut file_keys = Vec::new();

        for (key, value) in file {
            if !file_keys.contains(&key) {
                file_keys.push(key.clone());
            }
            file_values.insert(key.clone(), value.clone());
            values.insert(
                key,
                ResolvedValue {
                    value,
                    layer: Layer::File,
                },
            );
        }
        for (layer, vars) in [(Layer::Process, process), (Layer::Server, server)] {
            for (key, value) in vars {
                values.insert(key, ResolvedValue { value, layer });
            }
        }

        Self {
            values,
            file_values,
            file_keys,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.values.get(key)
    }

    /// The value the env file declared for `key`, ignoring overlays.
    pub fn file_value(&self, key: &str) -> Option<&str> {
        self.file_values.get(key).map(String::as_str)
    }

    /// Keys declared in the env file, in the order they first appear.
    pub fn file_keys(&self) -> &[String] {
        &self.file_keys
    }

    /// Every resolved key/value pair, overlays included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.value.as_str()))
    }
}

/// Owns the process-wide configuration state for one env file.
#[derive(Debug)]
pub struct ConfigReloader {
    env_path: PathBuf,
    process: Overlay,
    server: Overlay,
    state: Option<ResolvedConfig>,
    stale: bool,
}

impl ConfigReloader {
    /// Create a reloader for `env_path` with the live process environment as
    /// the process overlay and no server overlay.
    pub fn new(env_path: impl Into<PathBuf>) -> Self {
        Self {
            env_path: env_path.into(),
            process: Overlay::ProcessEnv,
            server: Overlay::Empty,
            state: None,
            stale: true,
        }
    }

    pub fn with_process_overlay(mut self, overlay: Overlay) -> Self {
        self.process = overlay;
        self.stale = true;
        self
    }

    pub fn with_server_overlay(mut self, overlay: Overlay) -> Self {
        self.server = overlay;
        self.stale = true;
        self
    }

    pub fn env_path(&self) -> &Path {
        &self.env_path
    }

    /// True once a reload has succeeded at least once.
    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Mark the cached state stale so the next read reloads.
    ///
    /// The cached values are kept until a reload succeeds.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Rebuild the configuration state from the env file and overlays.
    ///
    /// # Errors
    ///
    /// Returns a reload error (`ReloadParse`, `ReloadIo`) if the
    /// env file exists but cannot be read or parsed. The previous state is kept.
    pub fn reload(&mut self) -> Result<(), EnvError> {
        let file = match read_file_layer(&self.env_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    path = %self.env_path.display(),
                    error = %e,
                    retained = self.state.is_some(),
                    "Reload failed; keeping previous configuration"
                );
                return Err(e);
            }
        };

        let state = ResolvedConfig::build(file, self.process.snapshot(), self.server.snapshot());
        tracing::debug!(
            path = %self.env_path.display(),
            file_keys = state.file_keys.len(),
            "Configuration reloaded"
        );
        self.state = Some(state);
        self.stale = false;
        Ok(())
    }

    /// The freshest configuration state, reloading first if needed.
    pub fn state(&mut self) -> Result<&ResolvedConfig, EnvError> {
        if self.stale || self.state.is_none() {
            self.reload()?;
        }
        Ok(self.state.get_or_insert_with(ResolvedConfig::default))
    }

    /// The effective value of `key`, or `None` if no layer sets it.
    pub fn current_value(&mut self, key: &str) -> Result<Option<String>, EnvError> {
        Ok(self.state()?.get(key).map(|resolved| resolved.value.clone()))
    }

    /// The value the loaded configuration believes the env file holds for `key`.
    ///
    /// Equals [`current_value`](Self::current_value) unless an overlay shadows the key.
    pub fn file_value(&mut self, key: &str) -> Result<Option<String>, EnvError> {
        Ok(self.state()?.file_value(key).map(str::to_string))
    }

    /// The effective value of `key` together with the layer it came from.
    pub fn resolved(&mut self, key: &str) -> Result<Option<ResolvedValue>, EnvError> {
        Ok(self.state()?.get(key).cloned())
    }
}

/// Read the env file into ordered key/value pairs.
///
/// SAFETY: errors never carry file contents, only a byte index or an I/O kind.
fn read_file_layer(path: &Path) -> Result<Vec<(String, String)>, EnvError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Env file missing; file layer is empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(EnvError::ReloadIo {
                path: path.to_path_buf(),
                kind: e.kind(),
            });
        }
    };

    let contents = String::from_utf8(bytes).map_err(|e| EnvError::ReloadParse {
        path: path.to_path_buf(),
        error_index: e.utf8_error().valid_up_to(),
    })?;
    Ok(parse::parse_assignments(&contents))
}
