//! Environment file storage.
//!
//! Responsibilities:
//! - Create the env file from its template (byte-exact copy, optional reset).
//! - Update a single `KEY=VALUE` line in place, atomically.
//! - Reload the configuration state after every successful mutation.
//!
//! Does NOT handle:
//! - Resolving current values (see `reload`); the store asks the reloader.
//! - Prompting (see `editor`).
//!
//! Invariants:
//! - A failed update leaves the file byte-identical.
//! - Callers never observe stale configuration after a committed write.
//! - The env file is never deleted.

mod atomic;
mod patch;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EnvError;
use crate::reload::ConfigReloader;
pub use patch::{Patch, is_valid_key, replace_key_line};

/// Result of [`EnvFileStore::ensure_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    Created,
    AlreadyExists,
}

/// Reads and line-patches one environment file.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    path: PathBuf,
}

impl EnvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Copy `template` over the env file if it is missing or `force_reset` is set.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FileSystem` naming the template if it cannot be read,
    /// or naming the env file if the copy fails. On `Created`, any reload error
    /// from `config` is returned as well.
    pub fn ensure_file(
        &self,
        template: &Path,
        force_reset: bool,
        config: &mut ConfigReloader,
    ) -> Result<EnsureOutcome, EnvError> {
        if self.path.exists() && !force_reset {
            tracing::debug!(path = %self.path.display(), "Env file already exists");
            return Ok(EnsureOutcome::AlreadyExists);
        }

        fs::metadata(template).map_err(|e| EnvError::fs(template, e))?;
        let bytes = fs::copy(template, &self.path).map_err(|e| EnvError::fs(&self.path, e))?;
        tracing::debug!(
            template = %template.display(),
            path = %self.path.display(),
            bytes,
            reset = force_reset,
            "Env file created from template"
        );

        config.reload()?;
        Ok(EnsureOutcome::Created)
    }

    /// Replace the line `key=<believed value>` with `key=new_value`.
    ///
    /// The believed value is the file-layer value of the freshest reload in
    /// `config` (the resolved value unless an overlay shadows the key), so the
    /// line is matched on the value the system believes is set, not on the key
    /// alone. If the file was edited behind our back and the believed value no
    /// longer appears, this fails instead of guessing which line to replace.
    ///
    /// # Errors
    ///
    /// - `EnvError::InvalidKey` / `EnvError::InvalidValue` before any I/O.
    /// - `EnvError::KeyNotFound` if no line matches; the file is untouched.
    /// - `EnvError::FileSystem` if the file cannot be read or replaced.
    /// - Any reload error raised after the write.
    pub fn write_key(
        &self,
        key: &str,
        new_value: &str,
        config: &mut ConfigReloader,
    ) -> Result<(), EnvError> {
        if !is_valid_key(key) {
            return Err(EnvError::InvalidKey(key.to_string()));
        }
        if new_value.contains(['\n', '\r']) {
            return Err(EnvError::InvalidValue {
                key: key.to_string(),
                message: "values must fit on a single line".to_string(),
            });
        }

        let current = config.file_value(key)?.unwrap_or_default();
        let contents = fs::read_to_string(&self.path).map_err(|e| EnvError::fs(&self.path, e))?;

        let patched = match replace_key_line(&contents, key, &current, new_value) {
            Patch::Replaced(patched) => patched,
            Patch::Missing => return Err(self.key_not_found(key, false)),
            Patch::Drifted => {
                tracing::warn!(
                    key,
                    path = %self.path.display(),
                    "Env file value differs from loaded configuration; not overwriting"
                );
                return Err(self.key_not_found(key, true));
            }
        };

        if patched != contents {
            atomic::atomic_write(&self.path, patched.as_bytes())?;
        }
        tracing::debug!(key, path = %self.path.display(), "Env key updated");

        config.reload()
    }

    fn key_not_found(&self, key: &str, drifted: bool) -> EnvError {
        EnvError::KeyNotFound {
            key: key.to_string(),
            path: self.path.clone(),
            drifted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::Overlay;
    use tempfile::TempDir;

    const TEMPLATE: &str = "APP_URL=http://localhost\nDB_CONNECTION=mysql\n";

    struct Fixture {
        _dir: TempDir,
        template: PathBuf,
        store: EnvFileStore,
        config: ConfigReloader,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join(".env.example");
        fs::write(&template, TEMPLATE).unwrap();
        let env_path = dir.path().join(".env");
        Fixture {
            store: EnvFileStore::new(&env_path),
            config: ConfigReloader::new(&env_path).with_process_overlay(Overlay::Empty),
            template,
            _dir: dir,
        }
    }

    #[test]
    fn test_ensure_file_creates_then_is_noop() {
        let mut f = fixture();

        let first = f.store.ensure_file(&f.template, false, &mut f.config).unwrap();
        assert_eq!(first, EnsureOutcome::Created);
        assert_eq!(fs::read(f.store.path()).unwrap(), TEMPLATE.as_bytes());

        fs::write(f.store.path(), "APP_URL=http://edited\n").unwrap();
        let second = f.store.ensure_file(&f.template, false, &mut f.config).unwrap();
        assert_eq!(second, EnsureOutcome::AlreadyExists);
        assert_eq!(
            fs::read_to_string(f.store.path()).unwrap(),
            "APP_URL=http://edited\n"
        );
    }

    #[test]
    fn test_ensure_file_reset_overwrites() {
        let mut f = fixture();
        fs::write(f.store.path(), "APP_URL=http://edited\n").unwrap();

        let outcome = f.store.ensure_file(&f.template, true, &mut f.config).unwrap();

        assert_eq!(outcome, EnsureOutcome::Created);
        assert_eq!(fs::read_to_string(f.store.path()).unwrap(), TEMPLATE);
        assert_eq!(
            f.config.current_value("DB_CONNECTION").unwrap().as_deref(),
            Some("mysql")
        );
    }

    #[test]
    fn test_ensure_file_missing_template_names_path() {
        let mut f = fixture();
        let missing = f.template.with_file_name("nope.example");

        let err = f.store.ensure_file(&missing, false, &mut f.config).unwrap_err();

        match err {
            EnvError::FileSystem { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!f.store.exists());
    }

    #[test]
    fn test_write_key_reloads_before_returning() {
        let mut f = fixture();
        f.store.ensure_file(&f.template, false, &mut f.config).unwrap();

        f.store
            .write_key("DB_CONNECTION", "pgsql", &mut f.config)
            .unwrap();

        assert_eq!(
            fs::read_to_string(f.store.path()).unwrap(),
            "APP_URL=http://localhost\nDB_CONNECTION=pgsql\n"
        );
        assert_eq!(
            f.config.current_value("DB_CONNECTION").unwrap().as_deref(),
            Some("pgsql")
        );
    }

    #[test]
    fn test_write_same_value_is_idempotent() {
        let mut f = fixture();
        f.store.ensure_file(&f.template, false, &mut f.config).unwrap();

        f.store.write_key("APP_URL", "http://localhost", &mut f.config).unwrap();
        f.store.write_key("APP_URL", "http://localhost", &mut f.config).unwrap();

        assert_eq!(fs::read_to_string(f.store.path()).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_write_missing_key_leaves_file_unchanged() {
        let mut f = fixture();
        f.store.ensure_file(&f.template, false, &mut f.config).unwrap();
        let before = fs::read(f.store.path()).unwrap();

        let err = f
            .store
            .write_key("MAIL_HOST", "smtp", &mut f.config)
            .unwrap_err();

        assert!(matches!(err, EnvError::KeyNotFound { drifted: false, .. }));
        assert_eq!(fs::read(f.store.path()).unwrap(), before);
    }

    #[test]
    fn test_write_after_external_edit_fails_closed() {
        let mut f = fixture();
        f.store.ensure_file(&f.template, false, &mut f.config).unwrap();
        f.config.current_value("DB_CONNECTION").unwrap();

        // Edited behind the reloader's back.
        fs::write(
            f.store.path(),
            "APP_URL=http://localhost\nDB_CONNECTION=sqlite\n",
        )
        .unwrap();

        let err = f
            .store
            .write_key("DB_CONNECTION", "pgsql", &mut f.config)
            .unwrap_err();

        assert!(matches!(err, EnvError::KeyNotFound { drifted: true, .. }));
        assert_eq!(
            fs::read_to_string(f.store.path()).unwrap(),
            "APP_URL=http://localhost\nDB_CONNECTION=sqlite\n"
        );
    }

    #[test]
    fn test_write_rejects_bad_key_and_multiline_value() {
        let mut f = fixture();
        f.store.ensure_file(&f.template, false, &mut f.config).unwrap();

        assert!(matches!(
            f.store.write_key("APP-URL", "x", &mut f.config),
            Err(EnvError::InvalidKey(_))
        ));
        assert!(matches!(
            f.store.write_key("APP_URL", "a\nINJECTED=1", &mut f.config),
            Err(EnvError::InvalidValue { .. })
        ));
        assert_eq!(fs::read_to_string(f.store.path()).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_write_without_file_is_file_system_error() {
        let mut f = fixture();
        let err = f
            .store
            .write_key("APP_URL", "http://new", &mut f.config)
            .unwrap_err();
        assert!(matches!(err, EnvError::FileSystem { .. }));
    }
}
