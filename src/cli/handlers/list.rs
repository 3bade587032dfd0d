//! `chop list`.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{
    cli::handlers::commons,
    core::table_display,
    state::Session,
};

#[derive(Parser, Debug, Default)]
#[command(
    name = "chop list",
    no_binary_name = true,
    about = "Lists all accounts, projects and machines."
)]
struct ListArgs {
    /// Also print the location of the inventory file.
    #[arg(long, short)]
    path: bool,
}

/// Prints the inventory table.
pub fn handle(args: Vec<String>, session: &mut Session) -> Result<()> {
    let list_args: ListArgs = commons::parse_args(&args)?;
    let config = session.config();

    if list_args.path {
        println!(
            "{}",
            format!(t!("list.info.inventory_path"), path = session.path().display()).dimmed()
        );
    }

    if config.accounts.is_empty() {
        println!("{}", t!("list.info.empty"));
        return Ok(());
    }

    println!("{}", table_display::render_table(config));
    Ok(())
}
