//! Loading and saving of preference files

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::trace_operation;
use crate::tracing::span_names;

use super::preferences::Preferences;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "HFM_CONFIG_DIR";

/// Name of the preferences file inside the configuration directory
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Reads and writes configuration files in one directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the default configuration directory.
    ///
    /// `HFM_CONFIG_DIR` wins when set and non-empty; otherwise the platform
    /// configuration directory plus `hfm` is used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if neither is available.
    pub fn new() -> ConfigResult<Self> {
        Self::default_config_dir().map(Self::with_config_dir)
    }

    /// Creates a manager for an explicit directory.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Resolves the default configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if it cannot be determined.
    pub fn default_config_dir() -> ConfigResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(&dir).into_owned()));
        }
        dirs::config_dir()
            .map(|dir| dir.join("hfm"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// The directory this manager works in
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the preferences file
    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    /// Loads preferences, falling back to defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_preferences(&self) -> ConfigResult<Preferences> {
        let path = self.preferences_path();
        let _span = trace_operation!(span_names::CONFIG_LOAD, path = %path.display()).entered();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No preferences file, using defaults");
                return Ok(Preferences::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        let prefs: Preferences = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            reason: e.message().to_string(),
        })?;
        prefs.validate()?;
        tracing::debug!("Preferences loaded");
        Ok(prefs)
    }

    /// Validates and writes preferences, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization or writing fails.
    pub fn save_preferences(&self, prefs: &Preferences) -> ConfigResult<()> {
        let path = self.preferences_path();
        let _span = trace_operation!(span_names::CONFIG_SAVE, path = %path.display()).entered();

        prefs.validate()?;
        let text =
            toml::to_string_pretty(prefs).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;
        fs::write(&path, text).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Preferences saved");
        Ok(())
    }

    /// Writes default preferences unless a preferences file already exists.
    ///
    /// Returns `true` if a file was written.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn init(&self) -> ConfigResult<bool> {
        if self.preferences_path().exists() {
            return Ok(false);
        }
        self.save_preferences(&Preferences::default())?;
        Ok(true)
    }
}
