// src/constants.rs

//! Names and defaults shared across the crate.

/// The name of the directory holding chop's files (inside the platform config dir).
pub const CHOP_DIR: &str = "chop";

/// The name of the inventory file (in ~/.config/chop/).
pub const INVENTORY_FILENAME: &str = "chop.toml";

/// Extension appended to an inventory file that could not be read.
pub const QUARANTINE_EXTENSION: &str = "bak";

/// Environment variable overriding the inventory file location.
pub const CONFIG_ENV_VAR: &str = "CHOP_CONFIG";

/// Environment variable overriding the cloud CLI command line.
pub const GCLOUD_ENV_VAR: &str = "CHOP_GCLOUD";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "CHOP_LOG";

/// The cloud CLI used by `chop fetch` when `CHOP_GCLOUD` is not set.
pub const DEFAULT_GCLOUD_PROGRAM: &str = "gcloud";
