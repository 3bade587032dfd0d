// src/core/paths.rs

//! Where the inventory file lives.

use crate::constants::{CHOP_DIR, CONFIG_ENV_VAR, INVENTORY_FILENAME};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while working out the inventory location.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform has no per-user config directory.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// `~` or a `$VAR` in an explicit path could not be expanded.
    #[error("Could not expand inventory path '{template}': {reason}")]
    Expansion {
        /// The path as given.
        template: String,
        /// What `shellexpand` reported.
        reason: String,
    },
}

/// Returns the default inventory location (`~/.config/chop/chop.toml` on Linux).
pub fn default_inventory_path() -> Result<PathBuf, PathError> {
    let config_dir = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
    Ok(config_dir.join(CHOP_DIR).join(INVENTORY_FILENAME))
}

/// Determines which inventory file this invocation works on.
///
/// Priority: the `--config` flag, then `CHOP_CONFIG`, then the platform
/// default. Explicit paths may use `~` and environment variables.
pub fn resolve_inventory_path(flag: Option<&str>) -> Result<PathBuf, PathError> {
    let from_env = env::var(CONFIG_ENV_VAR).ok();
    resolve_with(flag, from_env.as_deref())
}

fn resolve_with(flag: Option<&str>, from_env: Option<&str>) -> Result<PathBuf, PathError> {
    let explicit = flag
        .or(from_env)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match explicit {
        Some(template) => expand_path_template(template),
        None => default_inventory_path(),
    }
}

/// Expands home directory (`~`) and environment variables (`$VAR`) in a path.
pub fn expand_path_template(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(dunce::simplified(Path::new(&*expanded)).to_path_buf())
}
