//! Shared utility functions used across command modules.

use std::io::Read as _;
use std::path::Path;

use hfm_core::config::ConfigManager;
use hfm_core::outline::ProjectOutline;
use serde::Serialize;

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Reads a whole input file; `-` reads stdin.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {e}", path.display()),
        ))
    })
}

/// Loads a project outline from a TOML fixture file.
pub fn load_outline(path: &Path) -> Result<ProjectOutline, CliError> {
    let text = read_input(path)?;
    let outline = ProjectOutline::from_toml_str(&text)?;
    tracing::debug!(fixture = %path.display(), items = outline.len(), "Loaded outline fixture");
    Ok(outline)
}

/// Serializes `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}
