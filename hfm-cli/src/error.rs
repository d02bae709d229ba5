//! CLI error types and exit codes.

use hfm_core::error::ConfigError;
use hfm_core::outline::OutlineError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, parsing, I/O or script errors
    pub const GENERAL_ERROR: i32 = 1;
    /// A replay script named an item the project does not contain
    pub const UNKNOWN_ITEM: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Project fixture error
    #[error("Outline error: {0}")]
    Outline(String),

    /// A script referred to an item that does not exist
    #[error("Unknown item on line {line}: {query}")]
    UnknownItem {
        /// Script line (1-based)
        line: usize,
        /// Path or name as written in the script
        query: String,
    },

    /// A script line could not be understood
    #[error("Script error on line {line}: {reason}")]
    Script {
        /// Script line (1-based)
        line: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A command-line argument has an invalid value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be produced
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<OutlineError> for CliError {
    fn from(err: OutlineError) -> Self {
        Self::Outline(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error
    /// - 2: Unknown item in a replay script
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownItem { .. } => exit_codes::UNKNOWN_ITEM,
            Self::Config(_)
            | Self::Outline(_)
            | Self::Script { .. }
            | Self::InvalidArgument(_)
            | Self::Output(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
