// src/cli/handlers/mod.rs

//! One module per verb. `commons` holds what they share.

pub mod add;
pub mod commons;
pub mod fetch;
pub mod list;
pub mod prune;
pub mod rm;
pub mod set;
pub mod unset;
