//! Identifier and kind types for project outline items
//!
//! Every item shown in the outline view carries an [`ItemId`] that stays
//! stable across renames, and an [`ItemKind`] that decides which editor (and
//! whether a playground) the window shows when the item is selected.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an item in the project outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    /// Creates a new random item ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an item ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// The kind of a project item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// The package description (header) of the project.
    Package,
    /// A Haskell source module.
    Module,
    /// Any other text file (README, changelog, notes).
    Text,
    /// An image resource.
    Image,
    /// A grouping node without content of its own.
    Folder,
    /// A data file bundled with the project.
    DataFile,
}

impl ItemKind {
    /// All item kinds, in outline display order.
    pub const ALL: [Self; 6] = [
        Self::Package,
        Self::Module,
        Self::Text,
        Self::Image,
        Self::Folder,
        Self::DataFile,
    ];

    /// Returns the editor kind that displays items of this kind.
    ///
    /// Folders have no editor; selecting one empties the editor slot.
    #[must_use]
    pub const fn editor_kind(self) -> Option<EditorKind> {
        match self {
            Self::Package => Some(EditorKind::HeaderEditor),
            Self::Module | Self::Text | Self::DataFile => Some(EditorKind::TextEditor),
            Self::Image => Some(EditorKind::ImageViewer),
            Self::Folder => None,
        }
    }

    /// Returns true if items of this kind get a playground next to the editor.
    #[must_use]
    pub const fn has_playground(self) -> bool {
        matches!(self, Self::Module)
    }

    /// Returns the lowercase identifier used in fixtures and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Module => "module",
            Self::Text => "text",
            Self::Image => "image",
            Self::Folder => "folder",
            Self::DataFile => "data_file",
        }
    }

    /// Infers the kind of a file from its name.
    ///
    /// `.cabal` files are the package header, `.hs`/`.lhs` files are modules,
    /// common image extensions are images, and prose-like files (no extension,
    /// `.md`, `.txt`) are text. Everything else is a data file.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("cabal") => Self::Package,
            Some("hs" | "lhs" | "hsig") => Self::Module,
            Some("png" | "jpg" | "jpeg" | "gif" | "tiff" | "bmp") => Self::Image,
            Some("md" | "markdown" | "txt" | "rst") | None => Self::Text,
            Some(_) => Self::DataFile,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package" | "header" => Ok(Self::Package),
            "module" => Ok(Self::Module),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "folder" | "group" => Ok(Self::Folder),
            "data_file" | "data" => Ok(Self::DataFile),
            other => Err(format!("unknown item kind: {other}")),
        }
    }
}

/// The kind of editor view controller shown for a selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKind {
    /// Form-style editor for the package description.
    HeaderEditor,
    /// Code/text editor.
    TextEditor,
    /// Read-only image viewer.
    ImageViewer,
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeaderEditor => write!(f, "header-editor"),
            Self::TextEditor => write!(f, "text-editor"),
            Self::ImageViewer => write!(f, "image-viewer"),
        }
    }
}

/// A resolved outline selection.
///
/// This is recomputed from the outline model on every selection event and is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    /// Identifier of the selected item.
    pub id: ItemId,
    /// Kind of the selected item.
    pub kind: ItemKind,
    /// Display name in the outline.
    pub name: String,
    /// Project-relative file path, if the item is backed by a file.
    pub file_path: Option<PathBuf>,
}

impl SelectedItem {
    /// Returns the editor kind required for this item.
    #[must_use]
    pub const fn editor_kind(&self) -> Option<EditorKind> {
        self.kind.editor_kind()
    }

    /// Returns true if this item's kind comes with a playground.
    #[must_use]
    pub const fn has_playground(&self) -> bool {
        self.kind.has_playground()
    }
}
