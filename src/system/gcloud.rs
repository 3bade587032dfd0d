// src/system/gcloud.rs

//! Discovery of accounts and projects through the `gcloud` CLI.
//!
//! Uses gcloud's `--format=json` output rather than parsing its human-readable
//! tables. Every function returns a sorted, deduplicated list of names; turning
//! them into inventory entries is up to the caller.

use crate::constants::{DEFAULT_GCLOUD_PROGRAM, GCLOUD_ENV_VAR};
use crate::system::executor::{self, ExecutionError};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use thiserror::Error;

/// Errors from asking `gcloud` for accounts or projects.
#[derive(Error, Debug)]
pub enum FetchError {
    /// `gcloud` could not be run or failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// `gcloud` printed something that is not the expected JSON list.
    #[error("Could not understand the output of '{command}': {source}")]
    MalformedOutput {
        /// The gcloud subcommand, e.g. `projects list`.
        command: String,
        /// The parse error.
        #[source]
        source: serde_json::Error,
    },
}

// --- gcloud JSON shapes (only the fields we read) ---

#[derive(Deserialize, Debug, Default)]
struct ConfigurationEntry {
    #[serde(default)]
    properties: ConfigurationProperties,
}

#[derive(Deserialize, Debug, Default)]
struct ConfigurationProperties {
    #[serde(default)]
    core: CoreProperties,
}

#[derive(Deserialize, Debug, Default)]
struct CoreProperties {
    account: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    project_id: Option<String>,
}

/// The gcloud command line, honouring `CHOP_GCLOUD` (e.g. `"gcloud --verbosity=error"`).
fn base_command() -> Result<Vec<String>, ExecutionError> {
    match env::var(GCLOUD_ENV_VAR) {
        Ok(line) if !line.trim().is_empty() => executor::split_command_line(&line),
        _ => Ok(vec![DEFAULT_GCLOUD_PROGRAM.to_string()]),
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(
    command: &str,
    output: &str,
) -> Result<Vec<T>, FetchError> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(output).map_err(|source| FetchError::MalformedOutput {
        command: command.to_string(),
        source,
    })
}

fn collect_names(names: impl Iterator<Item = Option<String>>) -> Vec<String> {
    names
        .flatten()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Extracts the accounts from `gcloud config configurations list --format=json`.
/// Configurations without an account are skipped.
pub fn parse_accounts(output: &str) -> Result<Vec<String>, FetchError> {
    let entries: Vec<ConfigurationEntry> = parse_json("config configurations list", output)?;
    Ok(collect_names(
        entries.into_iter().map(|e| e.properties.core.account),
    ))
}

/// Extracts the project ids from `gcloud projects list --format=json`.
pub fn parse_projects(output: &str) -> Result<Vec<String>, FetchError> {
    let entries: Vec<ProjectEntry> = parse_json("projects list", output)?;
    Ok(collect_names(entries.into_iter().map(|e| e.project_id)))
}

/// Lists the accounts of all local gcloud configurations.
pub fn fetch_accounts() -> Result<Vec<String>, FetchError> {
    let mut argv = base_command()?;
    argv.extend(
        ["config", "configurations", "list", "--format=json"].map(String::from),
    );
    let output = executor::execute_and_capture_output(&argv)?;
    parse_accounts(&output)
}

/// Lists the projects visible to `account` (or to gcloud's current account).
pub fn fetch_projects(account: Option<&str>) -> Result<Vec<String>, FetchError> {
    let mut argv = base_command()?;
    argv.extend(["projects", "list", "--format=json"].map(String::from));
    if let Some(account) = account {
        argv.push(format!("--account={account}"));
    }
    let output = executor::execute_and_capture_output(&argv)?;
    parse_projects(&output)
}
