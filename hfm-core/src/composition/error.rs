//! Error types for view composition
//!
//! Neither error ever leaves the composition controller. Both are logged at
//! the boundary and degrade the affected slot to empty.

use std::path::PathBuf;

use crate::outline::{ItemId, ItemKind};

/// A factory could not build a view controller.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConstructionError {
    /// The factory has no controller for this kind of item.
    #[error("no view controller for {0} items")]
    UnsupportedKind(ItemKind),

    /// A file or resource the controller needs is missing.
    #[error("missing resource: {}", .0.display())]
    ResourceMissing(PathBuf),

    /// Construction failed for another reason.
    #[error("view controller construction failed: {0}")]
    Failed(String),
}

/// The selected item no longer exists in the outline.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("selected item {item} no longer exists")]
pub struct StaleSelectionError {
    /// The item that vanished.
    pub item: ItemId,
}
