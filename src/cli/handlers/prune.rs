//! `chop prune`: forget the whole inventory.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::{cli::handlers::commons, state::Session};

#[derive(Parser, Debug, Default)]
#[command(
    name = "chop prune",
    no_binary_name = true,
    about = "Deletes the entire inventory: every account, project and machine."
)]
struct PruneArgs {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

/// Empties the inventory after confirmation.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let prune_args: PruneArgs = commons::parse_args(&args)?;

    if session.accounts.is_empty() && session.active_account.is_none() {
        commons::report_info(t!("prune.info.already_empty"));
        return Ok(());
    }

    if !prune_args.yes {
        println!(
            "\n{}",
            format!(
                t!("prune.warning.header"),
                count = session.accounts.len()
            )
            .red()
            .bold()
        );
        if !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(t!("common.prompt.are_you_sure"))
            .default(false)
            .interact()?
        {
            println!("\n{}", t!("common.info.operation_cancelled"));
            return Ok(());
        }
    }

    session.prune();
    commons::report_success(t!("prune.success"));
    Ok(())
}
