//! Command handler modules for the CLI.

mod completions;
mod config;
mod diagnostics;
mod highlight;
mod outline;
mod playground;
mod replay;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Outline { fixture, format } => outline::cmd_outline(&fixture, format),
        Commands::Replay {
            fixture,
            script,
            format,
        } => replay::cmd_replay(config_path, &fixture, &script, format),
        Commands::Playground { file, format } => playground::cmd_playground(&file, format),
        Commands::Diagnostics { file, format } => diagnostics::cmd_diagnostics(&file, format),
        Commands::Highlight {
            file,
            lines,
            format,
        } => highlight::cmd_highlight(&file, lines.as_deref(), format),
        Commands::Config(subcmd) => config::cmd_config(config_path, subcmd),
        Commands::Completions { shell } => completions::cmd_completions(shell),
    }
}
