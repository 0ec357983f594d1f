mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::app::App;
use crate::core::message::Role;
use crate::core::settings::ModelId;
use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

/// Route one line of input: slash commands run their handler, everything
/// else goes to the assistant. Unknown commands fall through as plain
/// messages rather than erroring.
pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation {
            input: trimmed,
            args,
        };
        (command.handler)(app, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from("Available commands:\n");
    for command in all_commands() {
        help.push_str(&format!("  /{:<12} {}\n", command.name, command.help));
        for alias in command.aliases {
            help.push_str(&format!("  /{:<12} Alias for /{}.\n", alias, command.name));
        }
    }
    help.push_str("\nAnything else you type is sent to the assistant.");
    app.notice = Some(help);
    CommandResult::Continue
}

pub(super) fn handle_clear(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.clear_conversation();
    app.set_status("Conversation cleared");
    CommandResult::Continue
}

pub(super) fn handle_model(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let parts: Vec<&str> = invocation.input.split_whitespace().collect();

    match parts.len() {
        1 => {
            app.set_status(format!(
                "Model: {} (options: {})",
                app.session.settings.model,
                ModelId::options()
            ));
            CommandResult::Continue
        }
        2 => {
            match app.session.settings.set_model(parts[1]) {
                Ok(()) => {
                    let model = app.session.settings.model;
                    app.set_status(format!("Model set: {model}"));
                }
                Err(e) => app.set_status(e),
            }
            CommandResult::Continue
        }
        _ => {
            app.set_status("Usage: /model [name]");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_temperature(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let parts: Vec<&str> = invocation.input.split_whitespace().collect();

    match parts.len() {
        1 => {
            app.set_status(format!(
                "Temperature: {}",
                app.session.settings.temperature
            ));
            CommandResult::Continue
        }
        2 => {
            match parts[1].parse::<f64>() {
                Ok(value) => match app.session.settings.set_temperature(value) {
                    Ok(()) => app.set_status(format!("Temperature set: {value}")),
                    Err(e) => app.set_status(e),
                },
                Err(_) => app.set_status("Usage: /temperature <0.0-1.0>"),
            }
            CommandResult::Continue
        }
        _ => {
            app.set_status("Usage: /temperature <0.0-1.0>");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let parts: Vec<&str> = invocation.input.split_whitespace().collect();

    match parts.len() {
        1 => {
            match app.session.logging.toggle_logging() {
                Ok(message) => app.set_status(message),
                Err(e) => app.set_status(format!("Log error: {}", e)),
            }
            CommandResult::Continue
        }
        2 => {
            let filename = parts[1];
            match app.session.logging.set_log_file(filename.to_string()) {
                Ok(message) => app.set_status(message),
                Err(e) => app.set_status(format!("Logfile error: {}", e)),
            }
            CommandResult::Continue
        }
        _ => {
            app.set_status("Usage: /log [filename]");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let parts: Vec<&str> = invocation.input.split_whitespace().collect();

    match parts.len() {
        1 => {
            let timestamp = Utc::now().format("%Y-%m-%d").to_string();
            let filename = format!("charmeur-log-{}.txt", timestamp);
            handle_dump_result(app, dump_conversation(app, &filename), &filename)
        }
        2 => {
            let filename = parts[1];
            handle_dump_result(app, dump_conversation(app, filename), filename)
        }
        _ => {
            app.set_status("Usage: /dump [filename]");
            CommandResult::Continue
        }
    }
}

pub(super) fn handle_quit(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    app.exit_requested = true;
    CommandResult::Continue
}

/// Write the conversation to a plain-text file, matching the on-screen
/// layout. System turns never appear in dumps.
fn dump_conversation(app: &App, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conversation_turns: Vec<_> = app
        .session
        .transcript
        .iter()
        .filter(|msg| msg.role != Role::System)
        .collect();

    if conversation_turns.is_empty() {
        return Err("No conversation to dump - the chat history is empty.".into());
    }

    if std::path::Path::new(filename).exists() {
        return Err(format!(
            "File '{}' already exists. Please specify a different filename with /dump <filename>.",
            filename
        )
        .into());
    }

    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    for msg in conversation_turns {
        if msg.is_user() {
            writeln!(writer, "You: {}", msg.content)?;
        } else {
            writeln!(writer, "{}", msg.content)?;
        }
        writeln!(writer)?; // Empty line for spacing
    }

    writer.flush()?;
    Ok(())
}

fn handle_dump_result(
    app: &mut App,
    result: Result<(), Box<dyn std::error::Error>>,
    filename: &str,
) -> CommandResult {
    match result {
        Ok(_) => {
            app.set_status(format!("Dumped: {}", filename));
            CommandResult::Continue
        }
        Err(e) => {
            app.set_status(format!("Dump error: {}", e));
            CommandResult::Continue
        }
    }
}
