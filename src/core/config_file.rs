// src/core/config_file.rs

//! Reading and writing the inventory file.

use crate::constants::QUARANTINE_EXTENSION;
use crate::core::store::StoreResult;
use crate::models::Configuration;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads the inventory from `path`.
///
/// Returns `Ok(None)` when the file does not exist yet. Stale active pointers
/// found in the file are dropped (and logged) before the configuration is
/// handed back.
pub fn load(path: &Path) -> StoreResult<Option<Configuration>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No inventory file at {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut config: Configuration = toml::from_str(&content)?;
    for repair in config.enforce_invariants() {
        log::warn!("Inventory {}: {}", path.display(), repair);
    }
    log::info!(
        "Loaded {} account(s) from {}",
        config.accounts.len(),
        path.display()
    );
    Ok(Some(config))
}

/// Writes the inventory to `path`, creating parent directories as needed.
///
/// The document is written to a temporary file in the same directory and then
/// renamed over the target, so the file on disk is always either the old or
/// the new version.
pub fn save(path: &Path, config: &Configuration) -> StoreResult<()> {
    let toml_string = toml::to_string_pretty(config)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp_file = NamedTempFile::new_in(&dir)?;
    temp_file.write_all(toml_string.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path)?;

    log::info!("Saved inventory to {}", path.display());
    Ok(())
}

/// Moves an unreadable inventory out of the way (`chop.toml` -> `chop.toml.bak`)
/// so that a later save cannot overwrite it. Returns the backup path.
pub fn quarantine(path: &Path) -> StoreResult<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".");
    backup.push(QUARANTINE_EXTENSION);
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup)?;
    log::warn!(
        "Moved unreadable inventory {} to {}",
        path.display(),
        backup.display()
    );
    Ok(backup)
}
