//! Error types for `hfm-core`
//!
//! Each module defines its own error enum; [`HfmError`] wraps them for
//! callers (such as the CLI) that handle errors from several modules at once.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::composition::{ConstructionError, StaleSelectionError};
pub use crate::diagnostics::DiagnosticsError;
pub use crate::outline::OutlineError;
pub use crate::tracing::TracingError;

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a configuration file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be parsed
    #[error("Failed to parse {}: {reason}", path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Preferences could not be serialized
    #[error("Failed to serialize preferences: {0}")]
    Serialize(String),

    /// A preference has an invalid value
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Preference key
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// No configuration directory could be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Crate-level error type
#[derive(Debug, Error)]
pub enum HfmError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Outline error
    #[error(transparent)]
    Outline(#[from] OutlineError),

    /// Diagnostics error
    #[error(transparent)]
    Diagnostics(#[from] DiagnosticsError),

    /// View construction error
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    /// Tracing setup error
    #[error(transparent)]
    Tracing(#[from] TracingError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `HfmError`
pub type HfmResult<T> = Result<T, HfmError>;
