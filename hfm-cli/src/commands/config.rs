//! Preference commands.

use std::path::Path;

use crate::cli::ConfigCommands;
use crate::error::CliError;
use crate::util::create_config_manager;

/// Config command handler
pub fn cmd_config(config_path: Option<&Path>, subcmd: ConfigCommands) -> Result<(), CliError> {
    let manager = create_config_manager(config_path)?;

    match subcmd {
        ConfigCommands::Show => {
            let prefs = manager.load_preferences()?;
            let text = toml::to_string_pretty(&prefs)
                .map_err(|e| CliError::Output(format!("Failed to serialize preferences: {e}")))?;
            print!("{text}");
            if let Some(editor) = prefs.external_editor_path() {
                println!("# external editor resolves to {}", editor.display());
            }
        }
        ConfigCommands::Path => println!("{}", manager.preferences_path().display()),
        ConfigCommands::Init => {
            if manager.init()? {
                println!(
                    "Wrote default preferences to {}",
                    manager.preferences_path().display()
                );
            } else {
                println!(
                    "Preferences already exist at {}",
                    manager.preferences_path().display()
                );
            }
        }
    }
    Ok(())
}
