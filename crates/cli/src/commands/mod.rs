//! CLI command implementations.

pub mod get;
pub mod init;
pub mod set;
pub mod setup;

use envsetup_config::{ConfigReloader, Layer};

/// Tell the operator when the value just written is shadowed by an overlay.
pub(crate) fn warn_if_shadowed(config: &mut ConfigReloader, key: &str) -> anyhow::Result<()> {
    if let Some(resolved) = config.resolved(key)?
        && resolved.layer != Layer::File
    {
        eprintln!(
            "note: {} is also set in the {} environment, which takes precedence over the env file",
            key, resolved.layer
        );
    }
    Ok(())
}
