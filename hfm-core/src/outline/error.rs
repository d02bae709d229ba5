//! Error types for outline model operations

use super::types::ItemId;

/// Errors that can occur while editing the project outline.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OutlineError {
    /// The specified item was not found.
    #[error("outline item not found: {0}")]
    ItemNotFound(ItemId),

    /// Children can only be added to folders (or the project root).
    #[error("outline item {0} is not a folder")]
    NotAFolder(ItemId),

    /// The project root is not removable.
    #[error("cannot remove the project root")]
    CannotRemoveRoot,

    /// The outline fixture could not be read.
    #[error("invalid outline fixture: {0}")]
    InvalidFixture(String),
}

/// Result type for outline operations
pub type OutlineResult<T> = Result<T, OutlineError>;
