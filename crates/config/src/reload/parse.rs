//! Line-level reading of env file contents.
//!
//! A line is an assignment when the text before its first `=` is a valid key.
//! The value is the rest of the line taken literally: no quotes, escapes,
//! comments, or `$VAR` substitution. A trailing `\r` belongs to the line
//! ending. Every other line (comments, blanks, anything else) is skipped.
//!
//! This is the same grammar `store::replace_key_line` writes, so any value the
//! store accepts reads back unchanged.

use crate::store::is_valid_key;

/// Assignments in file order. Duplicated keys appear once per line.
pub(crate) fn parse_assignments(contents: &str) -> Vec<(String, String)> {
    contents
        .split('\n')
        .filter_map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            is_valid_key(key).then(|| (key.to_string(), value.to_string()))
        })
        .collect()
}
