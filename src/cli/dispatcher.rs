//! Verb registry and routing.

use anyhow::{Result, anyhow};

use crate::{cli::handlers, state::Session};

// --- Command Definition and Registry ---

/// Defines a verb, its aliases, and its handler.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut Session) -> Result<()>,
}

/// The single source of truth for all verbs.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "add",
        aliases: &[],
        handler: handlers::add::handle,
    },
    CommandDefinition {
        name: "fetch",
        aliases: &[],
        handler: handlers::fetch::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "prune",
        aliases: &[],
        handler: handlers::prune::handle,
    },
    CommandDefinition {
        name: "rm",
        aliases: &["remove", "del"],
        handler: handlers::rm::handle,
    },
    CommandDefinition {
        name: "set",
        aliases: &[],
        handler: handlers::set::handle,
    },
    CommandDefinition {
        name: "unset",
        aliases: &[],
        handler: handlers::unset::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `chop <verb> [args...]` to the verb's handler.
pub fn dispatch(all_args: Vec<String>, session: &mut Session) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(verb) = args.next() else {
        println!("{}", t!("cli.info.no_command"));
        return Ok(());
    };

    let command = find_command(&verb)
        .ok_or_else(|| anyhow!(t!("cli.error.unknown_command"), command = verb))?;

    (command.handler)(args.collect(), session)
}
