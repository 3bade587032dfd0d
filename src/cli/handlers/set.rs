//! `chop set account|project`.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    cli::handlers::commons::{self, qualified},
    state::Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "chop set",
    no_binary_name = true,
    subcommand_required = true,
    arg_required_else_help = true,
    about = "Sets the active account or project."
)]
struct SetArgs {
    #[command(subcommand)]
    target: SetTarget,
}

#[derive(Subcommand, Debug)]
enum SetTarget {
    /// Make an account the active one. This clears the active project of every account.
    Account {
        #[arg(value_name = "ACCOUNT")]
        name: String,
    },
    /// Set the active project of an account (the active one by default).
    Project {
        #[arg(value_name = "PROJECT")]
        name: String,
        /// The account to set the project for.
        #[arg(long)]
        account: Option<String>,
    },
}

/// Sets the active account or project.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let set_args: SetArgs = commons::parse_args(&args)?;
    if let Err(e) = run(set_args.target, session) {
        commons::report_aborted(&e);
    }
    Ok(())
}

fn run(target: SetTarget, session: &mut Session) -> Result<()> {
    match target {
        SetTarget::Account { name } => match session.set_active_account(&name) {
            Ok(()) => commons::report_success(format_args!(
                t!("set.success.account"),
                name = qualified(&[name.as_str()])
            )),
            Err(e) => commons::report_failure(t!("set.error.account"), e),
        },
        SetTarget::Project { name, account } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            match session.set_active_project(&account, &name) {
                Ok(()) => commons::report_success(format_args!(
                    t!("set.success.project"),
                    name = qualified(&[account.as_str(), name.as_str()])
                )),
                Err(e) => commons::report_failure(t!("set.error.project"), e),
            }
        }
    }
    Ok(())
}
