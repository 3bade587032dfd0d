// src/cli/handlers/commons.rs

//! Helpers shared by the verb handlers: sub-parsing, target resolution and
//! the one-line status output every verb prints.

use anyhow::{Result, anyhow};
use clap::{Parser, error::ErrorKind};
use colored::Colorize;
use std::fmt::Display;

use crate::{core::store::StoreError, state::Session};

/// Parses a handler's own arguments.
///
/// Help and version requests are printed and end the process right away, the
/// way they would for a top-level clap parser.
pub fn parse_args<T: Parser>(args: &[String]) -> Result<T> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(parsed),
        Err(e)
            if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            e.exit()
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves the account a command works on: `--account` if given, otherwise
/// the active account.
pub fn resolve_account(session: &Session, explicit: Option<&str>) -> Result<String> {
    session.resolve_account(explicit).map_err(|e| match e {
        StoreError::NoActiveAccount => anyhow!(t!("common.error.no_account")),
        other => other.into(),
    })
}

/// Resolves the project a command works on: `--project` if given, otherwise
/// the active project of `account`.
pub fn resolve_project(session: &Session, account: &str, explicit: Option<&str>) -> Result<String> {
    session
        .resolve_project(account, explicit)
        .map_err(|e| match e {
            StoreError::NoActiveProject { account } => {
                anyhow!(t!("common.error.no_project"), account = account)
            }
            other => other.into(),
        })
}

/// Rejects names that are empty or only whitespace.
pub fn validate_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(anyhow!(t!("common.error.empty_name")));
    }
    Ok(name)
}

/// Prints a success line.
pub fn report_success(message: impl Display) {
    println!("{} {}", "✔".green().bold(), message);
}

/// Prints an informational line, e.g. for an idempotent no-op.
pub fn report_info(message: impl Display) {
    println!("{} {}", "•".dimmed(), message);
}

/// Prints the failure of a single operation. The command carries on with the
/// next name and its exit code is not affected.
pub fn report_failure(context: impl Display, error: impl Display) {
    eprintln!("{} {}: {}", "✘".red().bold(), context, error);
}

/// Prints an error that stopped a verb before it touched the inventory, such as
/// an account that could not be resolved or a `gcloud` call that failed.
/// Like [`report_failure`], it does not change the exit code.
pub fn report_aborted(error: &anyhow::Error) {
    eprintln!("{} {:#}", "✘".red().bold(), error);
}

/// `account/project`, highlighted for terminal output.
pub fn qualified(parts: &[&str]) -> String {
    parts.join("/").cyan().to_string()
}
