//! Error types for diagnostics

/// Errors that can occur while reading compiler diagnostics.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DiagnosticsError {
    /// A source location could not be interpreted.
    #[error("invalid source location: {0}")]
    InvalidLocation(String),
}

/// Result type for diagnostics operations
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;
