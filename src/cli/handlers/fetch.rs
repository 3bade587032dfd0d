//! `chop fetch accounts|projects`: imports names reported by `gcloud`.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use crate::{
    cli::handlers::commons::{self, qualified},
    state::Session,
    system::gcloud,
};

#[derive(Parser, Debug)]
#[command(
    name = "chop fetch",
    no_binary_name = true,
    subcommand_required = true,
    arg_required_else_help = true,
    about = "Fetches accounts or projects from gcloud. (Azure and AWS are not supported yet.)"
)]
struct FetchArgs {
    #[command(subcommand)]
    target: FetchTarget,
}

#[derive(Subcommand, Debug)]
enum FetchTarget {
    /// Add the account of every local gcloud configuration.
    Accounts,
    /// Add every project gcloud can list to an account (the active one by default).
    Projects {
        /// The account to add the projects to.
        #[arg(long)]
        account: Option<String>,
        /// Credentialed gcloud account to list projects with (passed as `--account`).
        #[arg(long, value_name = "EMAIL")]
        gcloud_account: Option<String>,
    },
}

/// Imports accounts or projects from `gcloud`.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let fetch_args: FetchArgs = commons::parse_args(&args)?;
    if let Err(e) = run(fetch_args.target, session) {
        commons::report_aborted(&e);
    }
    Ok(())
}

fn run(target: FetchTarget, session: &mut Session) -> Result<()> {
    match target {
        FetchTarget::Accounts => {
            let accounts = gcloud::fetch_accounts().context(t!("fetch.error.gcloud_failed"))?;
            ingest(&accounts, |name| Ok(session.add_account(name)), |name| {
                qualified(&[name])
            });
        }
        FetchTarget::Projects {
            account,
            gcloud_account,
        } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            if !session.accounts.contains_key(&account) {
                return Err(anyhow!(t!("fetch.error.unknown_account"), account = account));
            }
            let projects = gcloud::fetch_projects(gcloud_account.as_deref())
                .context(t!("fetch.error.gcloud_failed"))?;
            ingest(
                &projects,
                |name| Ok(session.add_project(&account, name)?),
                |name| qualified(&[account.as_str(), name]),
            );
        }
    }
    Ok(())
}

/// Feeds discovered names into the inventory one by one and reports each.
fn ingest(
    names: &[String],
    mut add: impl FnMut(&str) -> Result<bool>,
    label: impl Fn(&str) -> String,
) {
    if names.is_empty() {
        commons::report_info(t!("fetch.info.nothing_found"));
        return;
    }
    for name in names {
        match add(name) {
            Ok(true) => commons::report_success(format_args!(
                t!("fetch.success.added"),
                name = label(name)
            )),
            Ok(false) => commons::report_info(format_args!(
                t!("fetch.info.already_known"),
                name = label(name)
            )),
            Err(e) => commons::report_failure(t!("fetch.error.add_failed"), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_calls_add_for_every_name() {
        let mut seen = Vec::new();
        let names = vec!["a".to_string(), "b".to_string()];
        ingest(
            &names,
            |name| {
                seen.push(name.to_string());
                Ok(name == "a")
            },
            str::to_string,
        );
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_fetch_projects_requires_known_account() {
        let mut session = Session::empty(std::path::PathBuf::from("unused.toml"));
        let target = FetchTarget::Projects {
            account: Some("ghost".to_string()),
            gcloud_account: None,
        };
        let message = run(target, &mut session).unwrap_err().to_string();
        assert!(message.contains("ghost"));
    }

    #[test]
    fn test_fetch_projects_without_account_is_reported_not_returned() {
        let mut session = Session::empty(std::path::PathBuf::from("unused.toml"));
        assert!(handle(vec!["projects".to_string()], &mut session).is_ok());
        assert!(!session.needs_saving());
    }
}
