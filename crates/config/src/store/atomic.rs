//! Atomic file replacement.
//!
//! Invariants:
//! - Contents go to a uniquely named temporary file in the target's directory
//!   and are persisted over the target, so readers see either the old or the
//!   new file, never a mix.
//! - No fixed sibling name is used; an operator's own files are never clobbered.
//! - The temporary file is removed when any step fails.
//! - Permissions of an existing target are carried over.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::EnvError;

/// Replace `path` with `contents` via write-to-temp and persist.
pub(crate) fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), EnvError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping `temp` on any early return deletes it.
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| EnvError::fs(dir, e))?;
    let temp_path = temp.path().to_path_buf();

    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| EnvError::fs(&temp_path, e))?;

    if let Ok(meta) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| EnvError::fs(&temp_path, e))?;
    }

    temp.persist(path).map_err(|e| EnvError::fs(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Env file saved atomically");
    Ok(())
}
