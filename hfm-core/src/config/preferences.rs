//! Application preferences
//!
//! [`Preferences`] is persisted as `preferences.toml`. Every field has a
//! default, so a partial or empty file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Smallest accepted indentation width
pub const MIN_INDENTATION_WIDTH: u8 = 1;
/// Largest accepted indentation width
pub const MAX_INDENTATION_WIDTH: u8 = 16;
/// Largest accepted log level
pub const MAX_LOG_LEVEL: u8 = 4;

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Spaces inserted per indentation step in the text editor
    pub indentation_width: u8,
    /// Command used to open files externally; `None` uses the system default
    /// application for the file type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_text_editor: Option<String>,
    /// Whether cloud features are shown
    pub enable_cloud: bool,
    /// Whether module items get a playground next to the editor
    pub playground_enabled: bool,
    /// Compiler log verbosity (0 to 4)
    pub ghc_log_level: u8,
    /// Sprite rendering log verbosity (0 to 4)
    pub spritekit_log_level: u8,
    /// Cloud log verbosity (0 to 4)
    pub cloud_log_level: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            indentation_width: 2,
            external_text_editor: None,
            enable_cloud: false,
            playground_enabled: true,
            ghc_log_level: 0,
            spritekit_log_level: 0,
            cloud_log_level: 0,
        }
    }
}

impl Preferences {
    /// Checks every field and returns the first problem found.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(MIN_INDENTATION_WIDTH..=MAX_INDENTATION_WIDTH).contains(&self.indentation_width) {
            return Err(ConfigError::Invalid {
                field: "indentation_width".to_string(),
                reason: format!(
                    "must be between {MIN_INDENTATION_WIDTH} and {MAX_INDENTATION_WIDTH}, got {}",
                    self.indentation_width
                ),
            });
        }
        for (field, level) in [
            ("ghc_log_level", self.ghc_log_level),
            ("spritekit_log_level", self.spritekit_log_level),
            ("cloud_log_level", self.cloud_log_level),
        ] {
            if level > MAX_LOG_LEVEL {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: format!("must be at most {MAX_LOG_LEVEL}, got {level}"),
                });
            }
        }
        if self
            .external_text_editor
            .as_deref()
            .is_some_and(|cmd| cmd.trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                field: "external_text_editor".to_string(),
                reason: "must not be blank; omit it to use the default application".to_string(),
            });
        }
        Ok(())
    }

    /// The external editor command with `~` and environment variables
    /// expanded, if one is configured.
    #[must_use]
    pub fn external_editor_path(&self) -> Option<PathBuf> {
        self.external_text_editor.as_deref().map(|cmd| {
            let expanded = shellexpand::full(cmd).map_or_else(
                |_| shellexpand::tilde(cmd).into_owned(),
                std::borrow::Cow::into_owned,
            );
            PathBuf::from(expanded)
        })
    }
}
