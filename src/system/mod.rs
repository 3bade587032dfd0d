//! # System Interaction Layer
//!
//! This module provides abstractions for interacting with the underlying operating system.
//! It serves as a boundary between the inventory and the external tools it learns from.
//!
//! ## Modules
//!
//! - **`executor`**: Spawns an external program and captures its standard output.
//! - **`gcloud`**: Builds `gcloud` invocations and turns their JSON output into plain
//!   lists of account and project names for `chop fetch`.

pub mod executor;
pub mod gcloud;
