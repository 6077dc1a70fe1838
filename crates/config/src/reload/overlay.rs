//! Overlay layers applied on top of the env file.
//!
//! Responsibilities:
//! - Name the precedence tiers a resolved value can come from.
//! - Snapshot process-level and server-level variable stores at reload time.
//!
//! Invariants:
//! - Precedence (highest first): server, process, file.
//! - Empty or whitespace-only process variables are treated as unset.

use std::collections::BTreeMap;

use serde::Serialize;

/// The precedence tier a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Declared in the environment file (base layer).
    File,
    /// Set in the process environment.
    Process,
    /// Set by the hosting server; always wins.
    Server,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Layer::File => "file",
            Layer::Process => "process",
            Layer::Server => "server",
        };
        f.write_str(name)
    }
}

/// A source of variables layered over the env file.
#[derive(Debug, Clone, Default)]
pub enum Overlay {
    /// Contributes nothing.
    #[default]
    Empty,
    /// The live process environment, read on every reload.
    ProcessEnv,
    /// A fixed set of variables supplied by the composition root.
    Fixed(BTreeMap<String, String>),
}

impl Overlay {
    /// Build a fixed overlay from key/value pairs.
    pub fn fixed<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Overlay::Fixed(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Current variables of this overlay.
    pub(crate) fn snapshot(&self) -> BTreeMap<String, String> {
        match self {
            Overlay::Empty => BTreeMap::new(),
            Overlay::ProcessEnv => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .filter(|(_, v)| !v.trim().is_empty())
                .collect(),
            Overlay::Fixed(vars) => vars.clone(),
        }
    }
}
