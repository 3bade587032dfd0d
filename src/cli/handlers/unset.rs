//! `chop unset account|project`.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    cli::handlers::commons::{self, qualified},
    state::Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "chop unset",
    no_binary_name = true,
    subcommand_required = true,
    arg_required_else_help = true,
    about = "Clears the active account or project."
)]
struct UnsetArgs {
    #[command(subcommand)]
    target: UnsetTarget,
}

#[derive(Subcommand, Debug)]
enum UnsetTarget {
    /// Clear the active account. Active projects are kept.
    Account,
    /// Clear the active project of an account (the active one by default).
    Project {
        /// The account to clear the active project of.
        #[arg(long)]
        account: Option<String>,
    },
}

/// Clears the active account or project.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let unset_args: UnsetArgs = commons::parse_args(&args)?;

    match unset_args.target {
        UnsetTarget::Account => match session.unset_active_account() {
            Some(previous) => commons::report_success(format_args!(
                t!("unset.success.account"),
                name = qualified(&[previous.as_str()])
            )),
            None => commons::report_info(t!("unset.info.no_active_account")),
        },
        UnsetTarget::Project { account } => {
            match session.unset_active_project(account.as_deref()) {
                Ok((account, project)) => commons::report_success(format_args!(
                    t!("unset.success.project"),
                    name = qualified(&[account.as_str(), project.as_str()])
                )),
                Err(e) => commons::report_failure(t!("unset.error.project"), e),
            }
        }
    }
    Ok(())
}
