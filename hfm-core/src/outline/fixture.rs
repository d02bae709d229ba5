//! Outline fixtures
//!
//! A small serde description of a project tree, used by the CLI and tests to
//! stand up a [`ProjectOutline`] without reading a project from disk.
//!
//! ```toml
//! name = "demo"
//!
//! [[items]]
//! path = "demo.cabal"
//!
//! [[items]]
//! name = "src"
//! kind = "folder"
//! children = [{ path = "src/Main.hs" }]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::{OutlineError, OutlineResult};
use super::model::ProjectOutline;
use super::types::{ItemId, ItemKind};

/// Top-level fixture document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineFixture {
    /// Project name, shown as the outline root.
    #[serde(default = "default_project_name")]
    pub name: String,
    /// Top-level items.
    #[serde(default)]
    pub items: Vec<FixtureItem>,
}

fn default_project_name() -> String {
    "project".to_string()
}

/// One item in a fixture.
///
/// Either `name` or `path` must be given. A missing name is taken from the
/// path's file name, and a missing kind is inferred from the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureItem {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Item kind.
    #[serde(default)]
    pub kind: Option<ItemKind>,
    /// Project-relative path.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Child items (folders only).
    #[serde(default)]
    pub children: Vec<FixtureItem>,
}

impl FixtureItem {
    fn resolved_name(&self) -> OutlineResult<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| OutlineError::InvalidFixture("item without name or path".to_string()))
    }

    fn resolved_kind(&self) -> ItemKind {
        match (self.kind, &self.path) {
            (Some(kind), _) => kind,
            (None, _) if !self.children.is_empty() => ItemKind::Folder,
            (None, Some(path)) => ItemKind::from_path(path),
            (None, None) => ItemKind::Folder,
        }
    }
}

impl ProjectOutline {
    /// Builds an outline from a fixture description.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::InvalidFixture` if an item has neither name nor
    /// path, or if a non-folder item declares children.
    pub fn from_fixture(fixture: &OutlineFixture) -> OutlineResult<Self> {
        let mut outline = Self::new(fixture.name.clone());
        let root = outline.root_id();
        for item in &fixture.items {
            insert(&mut outline, root, item)?;
        }
        tracing::debug!(
            project = %fixture.name,
            item_count = outline.len(),
            "Outline built from fixture"
        );
        Ok(outline)
    }

    /// Parses a TOML fixture and builds an outline from it.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::InvalidFixture` if the TOML doesn't parse or
    /// describes an invalid tree.
    pub fn from_toml_str(source: &str) -> OutlineResult<Self> {
        let fixture: OutlineFixture =
            toml::from_str(source).map_err(|e| OutlineError::InvalidFixture(e.to_string()))?;
        Self::from_fixture(&fixture)
    }
}

fn insert(outline: &mut ProjectOutline, parent: ItemId, item: &FixtureItem) -> OutlineResult<()> {
    let name = item.resolved_name()?;
    let kind = item.resolved_kind();
    if kind != ItemKind::Folder && !item.children.is_empty() {
        return Err(OutlineError::InvalidFixture(format!(
            "{name} is a {kind} and cannot have children"
        )));
    }
    let id = outline.add_item(parent, name, kind, item.path.clone())?;
    for child in &item.children {
        insert(outline, id, child)?;
    }
    Ok(())
}
