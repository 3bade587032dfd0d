// src/state.rs

//! Per-invocation session with change tracking.

use crate::core::config_file;
use crate::core::store::StoreResult;
use crate::models::Configuration;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// Represents the state of the in-memory inventory.
/// It holds the current state and, once a mutation has been requested, a
/// snapshot of the state as it was loaded.
#[derive(Debug)]
enum InventoryState {
    /// The state is clean, no mutations have been requested yet.
    Pristine(Configuration),
    /// A mutation has been requested. We now hold both the original snapshot
    /// and the current, mutable state.
    Dirty {
        original: Configuration,
        current: Configuration,
    },
}

/// The inventory of one invocation, bound to the file it was loaded from.
///
/// Reads go through `Deref`. The first `DerefMut` takes a snapshot, and
/// [`Session::needs_saving`] compares against it, so commands that only read
/// (or whose mutations all failed) never rewrite the file.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    state: InventoryState,
}

impl Session {
    /// Wraps an already loaded configuration.
    pub fn new(path: PathBuf, config: Configuration) -> Self {
        Self {
            path,
            state: InventoryState::Pristine(config),
        }
    }

    /// Starts from an empty inventory at `path`.
    pub fn empty(path: PathBuf) -> Self {
        Self::new(path, Configuration::default())
    }

    /// Loads the inventory stored at `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist yet.
    pub fn load(path: PathBuf) -> StoreResult<Option<Self>> {
        Ok(config_file::load(&path)?.map(|config| Self::new(path, config)))
    }

    /// The file this session reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks if the state needs to be saved by comparing the current state
    /// against the original snapshot, if one exists.
    pub fn needs_saving(&self) -> bool {
        match &self.state {
            InventoryState::Pristine(_) => false,
            InventoryState::Dirty { original, current } => original != current,
        }
    }

    /// Provides read-only access to the current inventory.
    pub fn config(&self) -> &Configuration {
        match &self.state {
            InventoryState::Pristine(config) => config,
            InventoryState::Dirty { current, .. } => current,
        }
    }

    /// Writes the current inventory to disk unconditionally. Afterwards the
    /// session is pristine again.
    pub fn save(&mut self) -> StoreResult<()> {
        config_file::save(&self.path, self.config())?;
        let state = std::mem::replace(
            &mut self.state,
            InventoryState::Pristine(Configuration::default()),
        );
        self.state = match state {
            InventoryState::Dirty { current, .. } => InventoryState::Pristine(current),
            pristine => pristine,
        };
        Ok(())
    }

    /// Saves only if something changed. Returns whether a write happened.
    pub fn save_if_needed(&mut self) -> StoreResult<bool> {
        if !self.needs_saving() {
            log::debug!("Inventory unchanged, nothing to save");
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

impl Deref for Session {
    type Target = Configuration;

    fn deref(&self) -> &Self::Target {
        self.config()
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Configuration {
        // First mutable access: move to Dirty, keeping the loaded state as the snapshot.
        if let InventoryState::Pristine(_) = self.state {
            let state = std::mem::replace(
                &mut self.state,
                InventoryState::Pristine(Configuration::default()),
            );
            if let InventoryState::Pristine(config) = state {
                self.state = InventoryState::Dirty {
                    original: config.clone(),
                    current: config,
                };
            }
        }

        match &mut self.state {
            InventoryState::Dirty { current, .. } => current,
            InventoryState::Pristine(config) => config,
        }
    }
}
