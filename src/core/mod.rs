// src/core/mod.rs

//! Inventory logic that does not talk to the terminal or to other programs.

pub mod config_file;
pub mod paths;
pub mod store;
pub mod table_display;
