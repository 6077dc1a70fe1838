//! Centralized constants for the envsetup workspace.
//!
//! This module contains default values used across crates to avoid
//! literal duplication between the library and the binary.

// =============================================================================
// File Names
// =============================================================================

/// Default name of the operator-specific environment file.
pub const DEFAULT_ENV_FILE_NAME: &str = ".env";

/// Default name of the versioned template the environment file is created from.
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = ".env.example";

// =============================================================================
// Console Transcript
// =============================================================================

/// Suffix printed after a step title while the step runs.
pub const STEP_ELLIPSIS: &str = "...";

/// Marker printed once a step has completed successfully.
pub const STEP_DONE_MARKER: &str = "Done";

/// Indentation prefix for instruction lines inside a section.
pub const INSTRUCTION_INDENT: &str = " ";

/// Builds the default question shown when a caller does not supply one.
pub fn default_question(key: &str) -> String {
    format!("Set a value for {}:", key)
}
