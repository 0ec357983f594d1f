use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands().iter().find(|command| {
        command.name.eq_ignore_ascii_case(name)
            || command
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        aliases: &[],
        help: "Show available commands and usage information.",
        handler: super::handle_help,
    },
    Command {
        name: "clear",
        aliases: &[],
        help: "Clear the conversation history.",
        handler: super::handle_clear,
    },
    Command {
        name: "model",
        aliases: &[],
        help: "Show or switch the active model.",
        handler: super::handle_model,
    },
    Command {
        name: "temperature",
        aliases: &["temp"],
        help: "Show or set the sampling temperature (0.0-1.0).",
        handler: super::handle_temperature,
    },
    Command {
        name: "log",
        aliases: &[],
        help: "Toggle logging or set the log file path.",
        handler: super::handle_log,
    },
    Command {
        name: "dump",
        aliases: &[],
        help: "Export the current conversation to a file.",
        handler: super::handle_dump,
    },
    Command {
        name: "quit",
        aliases: &[],
        help: "Exit the application.",
        handler: super::handle_quit,
    },
];
