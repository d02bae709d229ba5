//! List the commands of a playground file.

use std::path::Path;

use hfm_core::playground::{Command, PlaygroundCommands};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::util::{read_input, to_json};

/// Playground command handler
pub fn cmd_playground(file: &Path, format: OutputFormat) -> Result<(), CliError> {
    let source = read_input(file)?;
    let commands = PlaygroundCommands::scan(&source);
    let listed: Vec<Command> = commands.iter().collect();

    match format {
        OutputFormat::Text => {
            if listed.is_empty() {
                println!("No commands found.");
            }
            for command in &listed {
                println!("{}", format_command(command));
            }
        }
        OutputFormat::Json => println!("{}", to_json(&listed)?),
    }
    Ok(())
}

/// Formats a command as a header line followed by its indented source
#[must_use]
pub fn format_command(command: &Command) -> String {
    let header = format!(
        "[{}] lines {}-{}",
        command.index,
        command.lines.start(),
        command.lines.end()
    );
    let body: Vec<String> = command
        .text
        .trim_end()
        .lines()
        .map(|line| format!("    {line}"))
        .collect();
    if body.is_empty() {
        header
    } else {
        format!("{header}\n{}", body.join("\n"))
    }
}
