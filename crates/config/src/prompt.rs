//! Prompt capability used by the variable editor.
//!
//! The terminal rendering lives in the binary (`dialoguer`); the library only
//! needs "pick one of these" and "type a value".

use std::io;

/// Asks the operator for a value.
pub trait Prompter {
    /// Single choice from `items`, with `default` preselected. Returns the chosen index.
    fn select(&mut self, question: &str, items: &[String], default: usize) -> io::Result<usize>;

    /// Free-text entry seeded with `seed` and autocompleted from `completions`.
    fn input(&mut self, question: &str, seed: &str, completions: &[String]) -> io::Result<String>;
}

/// Accepts every default without asking; used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn select(&mut self, _question: &str, items: &[String], default: usize) -> io::Result<usize> {
        if default < items.len() {
            Ok(default)
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no default choice available",
            ))
        }
    }

    fn input(&mut self, _question: &str, seed: &str, _completions: &[String]) -> io::Result<String> {
        Ok(seed.to_string())
    }
}
