// src/bin/chop.rs

//! The `chop` command-line entry point.

use anyhow::{Context, Result, anyhow};
use chop::{
    cli::{Cli, dispatcher},
    constants::LOG_ENV_VAR,
    core::{config_file, paths},
    state::Session,
    t,
};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

/// The main entry point of the `chop` application.
/// It sets up logging, loads the inventory, dispatches to the verb's handler,
/// saves what changed and performs centralized error handling.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV_VAR, "warn")).init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let path = paths::resolve_inventory_path(cli.config.as_deref())?;
    let mut session = open_session(path)?;

    dispatcher::dispatch(cli.args, &mut session)?;

    session.save_if_needed().with_context(|| {
        format!(
            t!("startup.error.save_failed"),
            path = session.path().display()
        )
    })?;
    Ok(())
}

/// Loads the inventory, creating it on first use.
///
/// A file that exists but cannot be read is reported and moved aside, and the
/// invocation continues with an empty inventory.
fn open_session(path: PathBuf) -> Result<Session> {
    match Session::load(path.clone()) {
        Ok(Some(session)) => Ok(session),
        Ok(None) => {
            let mut session = Session::empty(path);
            match session.save() {
                Ok(()) => println!(
                    "{}",
                    format!(t!("startup.info.created"), path = session.path().display()).dimmed()
                ),
                Err(e) => log::warn!(
                    "Could not create inventory at {}: {}",
                    session.path().display(),
                    e
                ),
            }
            Ok(session)
        }
        Err(load_error) => {
            eprintln!(
                "{} {}",
                "Warning:".yellow().bold(),
                format_args!(
                    t!("startup.warning.load_failed"),
                    path = path.display(),
                    error = load_error
                )
            );
            if path.exists() {
                let backup = config_file::quarantine(&path).map_err(|e| {
                    anyhow!(
                        t!("startup.error.quarantine_failed"),
                        path = path.display(),
                        error = e
                    )
                })?;
                eprintln!(
                    "  {}",
                    format!(t!("startup.info.quarantined"), path = backup.display()).yellow()
                );
            }
            Ok(Session::empty(path))
        }
    }
}
