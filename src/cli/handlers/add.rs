//! `chop add account|project|machine`.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    cli::handlers::commons::{self, qualified},
    state::Session,
};

#[derive(Parser, Debug)]
#[command(
    name = "chop add",
    no_binary_name = true,
    subcommand_required = true,
    arg_required_else_help = true,
    about = "Adds accounts, projects or machines."
)]
struct AddArgs {
    #[command(subcommand)]
    target: AddTarget,
}

#[derive(Subcommand, Debug)]
enum AddTarget {
    /// Add one or more accounts.
    Account {
        #[arg(required = true, value_name = "ACCOUNT")]
        names: Vec<String>,
    },
    /// Add one or more projects to an account (the active one by default).
    Project {
        #[arg(required = true, value_name = "PROJECT")]
        names: Vec<String>,
        /// The account to add the projects to.
        #[arg(long)]
        account: Option<String>,
    },
    /// Add one or more machines to a project (the active one by default).
    Machine {
        #[arg(required = true, value_name = "MACHINE")]
        names: Vec<String>,
        /// The account holding the project.
        #[arg(long)]
        account: Option<String>,
        /// The project to add the machines to.
        #[arg(long)]
        project: Option<String>,
    },
}

/// Adds accounts, projects or machines.
///
/// Only argument errors are returned; everything after parsing is reported
/// on the terminal.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let add_args: AddArgs = commons::parse_args(&args)?;
    if let Err(e) = run(add_args.target, session) {
        commons::report_aborted(&e);
    }
    Ok(())
}

fn run(target: AddTarget, session: &mut Session) -> Result<()> {
    match target {
        AddTarget::Account { names } => add_accounts(session, &names),
        AddTarget::Project { names, account } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            add_projects(session, &account, &names);
        }
        AddTarget::Machine {
            names,
            account,
            project,
        } => {
            let account = commons::resolve_account(session, account.as_deref())?;
            // Without --project the store resolves the active project itself,
            // but we resolve it here too so a missing one fails the whole command.
            let project_name = commons::resolve_project(session, &account, project.as_deref())?;
            add_machines(session, &account, project.as_deref(), &project_name, &names);
        }
    }
    Ok(())
}

fn add_accounts(session: &mut Session, names: &[String]) {
    for name in names {
        if let Err(e) = commons::validate_name(name) {
            commons::report_failure(t!("add.error.account"), e);
            continue;
        }
        if session.add_account(name) {
            commons::report_success(format_args!(
                t!("add.success.account"),
                name = qualified(&[name.as_str()])
            ));
        } else {
            commons::report_info(format_args!(
                t!("add.info.account_exists"),
                name = qualified(&[name.as_str()])
            ));
        }
    }
}

fn add_projects(session: &mut Session, account: &str, names: &[String]) {
    for name in names {
        let result = commons::validate_name(name)
            .and_then(|name| Ok(session.add_project(account, name)?));
        match result {
            Ok(true) => commons::report_success(format_args!(
                t!("add.success.project"),
                name = qualified(&[account, name.as_str()])
            )),
            Ok(false) => commons::report_info(format_args!(
                t!("add.info.project_exists"),
                name = qualified(&[account, name.as_str()])
            )),
            Err(e) => commons::report_failure(t!("add.error.project"), e),
        }
    }
}

fn add_machines(
    session: &mut Session,
    account: &str,
    explicit_project: Option<&str>,
    project_name: &str,
    names: &[String],
) {
    for name in names {
        let result = commons::validate_name(name).and_then(|name| {
            Ok(match explicit_project {
                Some(project) => session.add_machine_to_project(account, project, name)?,
                None => session.add_machine(account, name)?,
            })
        });
        match result {
            Ok(true) => commons::report_success(format_args!(
                t!("add.success.machine"),
                name = qualified(&[account, project_name, name.as_str()])
            )),
            Ok(false) => commons::report_info(format_args!(
                t!("add.info.machine_exists"),
                name = qualified(&[account, project_name, name.as_str()])
            )),
            Err(e) => commons::report_failure(t!("add.error.machine"), e),
        }
    }
}
