//! Line-level patching of env file contents.
//!
//! Invariants:
//! - Only the first line reading exactly `KEY=<current>` is replaced.
//! - Key and current value are matched literally; every regex metacharacter is
//!   escaped before the pattern is built, so values like `a.b*c` never match
//!   `axbbc`.
//! - Line count, ordering, line terminators (`\n` / `\r\n`), and a missing
//!   trailing newline are preserved.

use regex::Regex;

/// Outcome of looking for the line to patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// The patched contents.
    Replaced(String),
    /// No line for the key at all.
    Missing,
    /// A line for the key exists but holds a different value.
    Drifted,
}

/// Returns true if `key` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Replace the line `key=current` in `contents` with `key=new_value`.
///
/// `key` must already be validated with [`is_valid_key`]; `current` and
/// `new_value` are taken literally.
pub fn replace_key_line(contents: &str, key: &str, current: &str, new_value: &str) -> Patch {
    // The current value comes from the loaded configuration and may contain
    // anything; it must be escaped, never interpreted as a pattern.
    let pattern = format!(
        r"(?m)^{}={}(\r?)$",
        regex::escape(key),
        regex::escape(current)
    );
    let line = match Regex::new(&pattern) {
        Ok(line) => line,
        Err(_) => return Patch::Missing,
    };

    let Some(caps) = line.captures(contents) else {
        return if has_key_line(contents, key) {
            Patch::Drifted
        } else {
            Patch::Missing
        };
    };
    let (Some(whole), Some(cr)) = (caps.get(0), caps.get(1)) else {
        return Patch::Missing;
    };

    let mut patched = String::with_capacity(contents.len() + new_value.len());
    patched.push_str(&contents[..whole.start()]);
    patched.push_str(key);
    patched.push('=');
    patched.push_str(new_value);
    patched.push_str(cr.as_str());
    patched.push_str(&contents[whole.end()..]);
    Patch::Replaced(patched)
}

fn has_key_line(contents: &str, key: &str) -> bool {
    let prefix = format!("{}=", key);
    contents.lines().any(|line| line.starts_with(&prefix))
}
