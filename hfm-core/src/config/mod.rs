//! Configuration management
//!
//! Preferences live in `preferences.toml` inside the configuration
//! directory, which [`ConfigManager`] resolves and reads.

mod manager;
mod preferences;

pub use manager::{CONFIG_DIR_ENV, ConfigManager, PREFERENCES_FILE};
pub use preferences::{MAX_INDENTATION_WIDTH, MAX_LOG_LEVEL, MIN_INDENTATION_WIDTH, Preferences};
