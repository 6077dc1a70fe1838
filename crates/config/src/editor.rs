//! Interactive editing of environment variables.
//!
//! Responsibilities:
//! - Offer a choice list or free-text prompt seeded with the current value.
//! - Commit the operator's answer through the store (which reloads).
//!
//! Invariants:
//! - The current value is always selectable: when it is not among the offered
//!   choices it is listed first.
//! - An absent key is presented as an empty value; only the commit can fail
//!   with `KeyNotFound`.

use crate::constants::default_question;
use crate::error::EnvError;
use crate::prompt::Prompter;
use crate::reload::ConfigReloader;
use crate::store::EnvFileStore;

/// Build the list offered to the operator and the index to preselect.
pub fn choice_list(current: &str, choices: &[String]) -> (Vec<String>, usize) {
    match choices.iter().position(|choice| choice == current) {
        Some(index) => (choices.to_vec(), index),
        None => {
            let mut items = Vec::with_capacity(choices.len() + 1);
            items.push(current.to_string());
            items.extend_from_slice(choices);
            (items, 0)
        }
    }
}

/// Prompts for and commits variables in one env file.
pub struct VariableEditor<'a, P: Prompter + ?Sized> {
    store: &'a EnvFileStore,
    config: &'a mut ConfigReloader,
    prompter: &'a mut P,
}

impl<'a, P: Prompter + ?Sized> VariableEditor<'a, P> {
    pub fn new(store: &'a EnvFileStore, config: &'a mut ConfigReloader, prompter: &'a mut P) -> Self {
        Self {
            store,
            config,
            prompter,
        }
    }

    /// Let the operator pick a value for `key` from `choices`.
    ///
    /// Returns the committed value.
    pub fn choose_variable(
        &mut self,
        key: &str,
        choices: &[String],
        question: Option<&str>,
    ) -> Result<String, EnvError> {
        let question = question.map_or_else(|| default_question(key), str::to_string);
        let current = self.config.current_value(key)?.unwrap_or_default();

        let (items, default) = choice_list(&current, choices);
        let index = self
            .prompter
            .select(&question, &items, default)
            .map_err(EnvError::Prompt)?;
        let value = items
            .get(index)
            .cloned()
            .ok_or_else(|| EnvError::Prompt(std::io::Error::other("selection out of range")))?;

        self.write_variable(key, &value)?;
        Ok(value)
    }

    /// Ask the operator to type a value for `key`, seeded with the current one.
    ///
    /// The answer is committed even if unchanged. Returns the committed value.
    pub fn set_variable(&mut self, key: &str, question: Option<&str>) -> Result<String, EnvError> {
        let question = question.map_or_else(|| default_question(key), str::to_string);
        let current = self.config.current_value(key)?.unwrap_or_default();

        let value = self
            .prompter
            .input(&question, &current, std::slice::from_ref(&current))
            .map_err(EnvError::Prompt)?;

        self.write_variable(key, &value)?;
        Ok(value)
    }

    /// Commit `value` for `key` without prompting.
    pub fn write_variable(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        self.store.write_key(key, value, &mut *self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::Overlay;
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Answers with a fixed index / text and records what it was shown.
    #[derive(Default)]
    struct ScriptedPrompter {
        pick: Option<usize>,
        typed: Option<String>,
        shown_items: Vec<String>,
        shown_default: Option<usize>,
        shown_question: String,
        shown_seed: Option<String>,
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, question: &str, items: &[String], default: usize) -> io::Result<usize> {
            self.shown_question = question.to_string();
            self.shown_items = items.to_vec();
            self.shown_default = Some(default);
            Ok(self.pick.unwrap_or(default))
        }

        fn input(&mut self, question: &str, seed: &str, completions: &[String]) -> io::Result<String> {
            self.shown_question = question.to_string();
            self.shown_seed = Some(seed.to_string());
            self.shown_items = completions.to_vec();
            Ok(self.typed.clone().unwrap_or_else(|| seed.to_string()))
        }
    }

    fn setup(contents: &str) -> (TempDir, EnvFileStore, ConfigReloader) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, contents).unwrap();
        let config = ConfigReloader::new(&path).with_process_overlay(Overlay::Empty);
        (dir, EnvFileStore::new(path), config)
    }

    #[test]
    fn test_choice_list_prepends_novel_current_value() {
        let choices = strings(&["mysql", "pgsql"]);

        assert_eq!(
            choice_list("sqlite", &choices),
            (strings(&["sqlite", "mysql", "pgsql"]), 0)
        );
        assert_eq!(choice_list("mysql", &choices), (strings(&["mysql", "pgsql"]), 0));
        assert_eq!(choice_list("pgsql", &choices), (strings(&["mysql", "pgsql"]), 1));
    }

    #[test]
    fn test_choose_variable_presents_current_first_and_commits() {
        let (_dir, store, mut config) = setup("DRIVER=sqlite\n");
        let mut prompter = ScriptedPrompter {
            pick: Some(2),
            ..Default::default()
        };

        let value = VariableEditor::new(&store, &mut config, &mut prompter)
            .choose_variable("DRIVER", &strings(&["mysql", "pgsql"]), None)
            .unwrap();

        assert_eq!(value, "pgsql");
        assert_eq!(prompter.shown_items, strings(&["sqlite", "mysql", "pgsql"]));
        assert_eq!(prompter.shown_default, Some(0));
        assert_eq!(prompter.shown_question, "Set a value for DRIVER:");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "DRIVER=pgsql\n");
        assert_eq!(config.current_value("DRIVER").unwrap().as_deref(), Some("pgsql"));
    }

    #[test]
    fn test_choose_variable_uses_custom_question() {
        let (_dir, store, mut config) = setup("DRIVER=mysql\n");
        let mut prompter = ScriptedPrompter::default();

        VariableEditor::new(&store, &mut config, &mut prompter)
            .choose_variable("DRIVER", &strings(&["mysql", "pgsql"]), Some("Database driver?"))
            .unwrap();

        assert_eq!(prompter.shown_question, "Database driver?");
        assert_eq!(prompter.shown_items, strings(&["mysql", "pgsql"]));
        assert_eq!(prompter.shown_default, Some(0));
    }

    #[test]
    fn test_set_variable_seeds_with_current_value() {
        let (_dir, store, mut config) =
            setup("APP_URL=http://localhost\nDB_CONNECTION=mysql\n");
        let mut prompter = ScriptedPrompter {
            typed: Some("pgsql".to_string()),
            ..Default::default()
        };

        VariableEditor::new(&store, &mut config, &mut prompter)
            .set_variable("DB_CONNECTION", None)
            .unwrap();

        assert_eq!(prompter.shown_seed.as_deref(), Some("mysql"));
        assert_eq!(prompter.shown_items, strings(&["mysql"]));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "APP_URL=http://localhost\nDB_CONNECTION=pgsql\n"
        );
    }

    #[test]
    fn test_set_variable_unchanged_still_commits_cleanly() {
        let (_dir, store, mut config) = setup("APP_NAME=demo\n");
        let mut prompter = ScriptedPrompter::default();

        let value = VariableEditor::new(&store, &mut config, &mut prompter)
            .set_variable("APP_NAME", None)
            .unwrap();

        assert_eq!(value, "demo");
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "APP_NAME=demo\n");
    }

    #[test]
    fn test_absent_key_is_presented_empty_and_fails_only_on_commit() {
        let (_dir, store, mut config) = setup("APP_NAME=demo\n");
        let mut prompter = ScriptedPrompter {
            typed: Some("smtp.local".to_string()),
            ..Default::default()
        };

        let err = VariableEditor::new(&store, &mut config, &mut prompter)
            .set_variable("MAIL_HOST", None)
            .unwrap_err();

        assert_eq!(prompter.shown_seed.as_deref(), Some(""));
        assert!(matches!(err, EnvError::KeyNotFound { .. }));
    }

    #[test]
    fn test_empty_declared_key_can_be_filled() {
        let (_dir, store, mut config) = setup("MAIL_HOST=\n");
        let mut prompter = ScriptedPrompter {
            pick: Some(1),
            ..Default::default()
        };

        VariableEditor::new(&store, &mut config, &mut prompter)
            .choose_variable("MAIL_HOST", &strings(&["smtp.local"]), None)
            .unwrap();

        assert_eq!(prompter.shown_items, strings(&["", "smtp.local"]));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "MAIL_HOST=smtp.local\n");
    }
}
