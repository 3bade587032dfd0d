//! `chop rm account|project|machine`. Removal cascades to children.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    cli::handlers::commons::{self, qualified},
    state::Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "chop rm",
    no_binary_name = true,
    subcommand_required = true,
    arg_required_else_help = true,
    about = "Removes accounts, projects or machines."
)]
struct RmArgs {
    #[command(subcommand)]
    target: RmTarget,
}

#[derive(Subcommand, Debug)]
enum RmTarget {
    /// Remove one or more accounts with all of their projects and machines.
    Account {
        #[arg(required = true, value_name = "ACCOUNT")]
        names: Vec<String>,
    },
    /// Remove one or more projects with all of their machines.
    Project {
        #[arg(required = true, value_name = "PROJECT")]
        names: Vec<String>,
        /// The account to remove the projects from.
        #[arg(long)]
        account: Option<String>,
    },
    /// Remove one or more machines from a project.
    Machine {
        #[arg(required = true, value_name = "MACHINE")]
        names: Vec<String>,
        /// The account holding the project.
        #[arg(long)]
        account: Option<String>,
        /// The project to remove the machines from.
        #[arg(long)]
        project: Option<String>,
    },
}

/// Removes accounts, projects or machines.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let rm_args: RmArgs = commons::parse_args(&args)?;
    if let Err(e) = run(rm_args.target, session) {
        commons::report_aborted(&e);
    }
    Ok(())
}

fn run(target: RmTarget, session: &mut Session) -> Result<()> {
    match target {
        RmTarget::Account { names } => {
            for name in &names {
                match session.delete_account(name) {
                    Ok(removed) => commons::report_success(format_args!(
                        t!("rm.success.account"),
                        name = qualified(&[name.as_str()]),
                        count = removed.projects.len()
                    )),
                    Err(e) => commons::report_failure(t!("rm.error.account"), e),
                }
            }
        }
        RmTarget::Project { names, account } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            for name in &names {
                match session.delete_project(&account, name) {
                    Ok(removed) => commons::report_success(format_args!(
                        t!("rm.success.project"),
                        name = qualified(&[account.as_str(), name.as_str()]),
                        count = removed.machines.len()
                    )),
                    Err(e) => commons::report_failure(t!("rm.error.project"), e),
                }
            }
        }
        RmTarget::Machine {
            names,
            account,
            project,
        } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            let project = commons::resolve_project(session, &account, project.as_deref())?;
            for name in &names {
                match session.delete_machine(&account, &project, name) {
                    Ok(_) => commons::report_success(format_args!(
                        t!("rm.success.machine"),
                        name = qualified(&[account.as_str(), project.as_str(), name.as_str()])
                    )),
                    Err(e) => commons::report_failure(t!("rm.error.machine"), e),
                }
            }
        }
    }
    Ok(())
}
