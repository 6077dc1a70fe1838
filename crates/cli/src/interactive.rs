//! User interaction utilities for the CLI.
//!
//! Responsibilities:
//! - Render choice lists and free-text prompts with `dialoguer`.
//! - Offer the current value as autocompletion in free-text prompts.
//!
//! Does NOT handle:
//! - Deciding what to ask or committing answers (see `envsetup_config::VariableEditor`).

use std::io;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Completion, Input, Select};
use envsetup_config::Prompter;

/// Terminal prompter backed by `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, question: &str, items: &[String], default: usize) -> io::Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(items)
            .default(default)
            .interact()
            .map_err(io::Error::from)
    }

    fn input(&mut self, question: &str, seed: &str, completions: &[String]) -> io::Result<String> {
        let completion = PrefixCompletion {
            candidates: completions,
        };
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .default(seed.to_string())
            .allow_empty(true)
            .completion_with(&completion)
            .interact_text()
            .map_err(io::Error::from)
    }
}

/// Completes the typed text to the first candidate it is a prefix of.
struct PrefixCompletion<'a> {
    candidates: &'a [String],
}

impl Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        complete(self.candidates, input)
    }
}

fn complete(candidates: &[String], input: &str) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| candidate.starts_with(input) && candidate.as_str() != input)
        .cloned()
}
