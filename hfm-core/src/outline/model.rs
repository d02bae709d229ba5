//! In-memory project outline
//!
//! [`ProjectOutline`] is a tree of [`ProjectItem`]s rooted at the project
//! itself. It implements [`OutlineModel`], the read-only view the composition
//! controller resolves selections against. [`SharedOutline`] is the
//! single-threaded handle shared between the window and its collaborators.

use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;

use super::error::{OutlineError, OutlineResult};
use super::types::{ItemId, ItemKind, SelectedItem};

/// Read access to the outline that selection events are resolved against.
pub trait OutlineModel {
    /// Resolves an item ID to the current item, or `None` if it no longer exists.
    fn resolve(&self, id: ItemId) -> Option<SelectedItem>;

    /// Monotonic counter bumped on every structural or naming change.
    fn revision(&self) -> u64;

    /// Flattened rows in display order, excluding the project root.
    fn rows(&self) -> Vec<OutlineRow>;
}

/// A single row of the flattened outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineRow {
    /// Item shown on this row.
    pub id: ItemId,
    /// Nesting depth; top-level items have depth 0.
    pub depth: usize,
    /// Display name.
    pub name: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Whether the row can be expanded.
    pub has_children: bool,
}

/// A node in the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    /// Stable identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Project-relative file path, if backed by a file.
    pub file_path: Option<PathBuf>,
    /// Ordered children.
    pub children: Vec<ProjectItem>,
}

impl ProjectItem {
    /// Creates a childless item with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ItemKind, file_path: Option<PathBuf>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            kind,
            file_path,
            children: Vec::new(),
        }
    }

    fn find(&self, id: ItemId) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: ItemId) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn remove_descendant(&mut self, id: ItemId) -> Option<Self> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Number of items in this subtree, including this one.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    fn collect_rows(&self, depth: usize, rows: &mut Vec<OutlineRow>) {
        rows.push(OutlineRow {
            id: self.id,
            depth,
            name: self.name.clone(),
            kind: self.kind,
            has_children: !self.children.is_empty(),
        });
        for child in &self.children {
            child.collect_rows(depth + 1, rows);
        }
    }

    fn to_selected(&self) -> SelectedItem {
        SelectedItem {
            id: self.id,
            kind: self.kind,
            name: self.name.clone(),
            file_path: self.file_path.clone(),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(Self::iter)))
    }
}

/// The project tree shown in the outline view.
#[derive(Debug, Clone)]
pub struct ProjectOutline {
    root: ProjectItem,
    revision: u64,
}

impl ProjectOutline {
    /// Creates an outline containing only the project root.
    #[must_use]
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            root: ProjectItem::new(project_name, ItemKind::Folder, None),
            revision: 0,
        }
    }

    /// Returns the ID of the project root.
    #[must_use]
    pub const fn root_id(&self) -> ItemId {
        self.root.id
    }

    /// Returns the project root.
    #[must_use]
    pub const fn root(&self) -> &ProjectItem {
        &self.root
    }

    /// Returns the item with the given ID.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ProjectItem> {
        self.root.find(id)
    }

    /// Returns true if the outline contains the item.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Number of items below the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.subtree_len() - 1
    }

    /// Returns true if the project has no items besides its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Adds a new item below `parent`.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::ItemNotFound` if the parent doesn't exist and
    /// `OutlineError::NotAFolder` if the parent can't hold children.
    pub fn add_item(
        &mut self,
        parent: ItemId,
        name: impl Into<String>,
        kind: ItemKind,
        file_path: Option<PathBuf>,
    ) -> OutlineResult<ItemId> {
        let root_id = self.root.id;
        let parent_item = self
            .root
            .find_mut(parent)
            .ok_or(OutlineError::ItemNotFound(parent))?;
        if parent_item.id != root_id && parent_item.kind != ItemKind::Folder {
            return Err(OutlineError::NotAFolder(parent));
        }
        let item = ProjectItem::new(name, kind, file_path);
        let id = item.id;
        parent_item.children.push(item);
        self.revision += 1;
        Ok(id)
    }

    /// Removes an item together with its subtree.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::CannotRemoveRoot` for the root and
    /// `OutlineError::ItemNotFound` for unknown items.
    pub fn remove_item(&mut self, id: ItemId) -> OutlineResult<ProjectItem> {
        if id == self.root.id {
            return Err(OutlineError::CannotRemoveRoot);
        }
        let removed = self
            .root
            .remove_descendant(id)
            .ok_or(OutlineError::ItemNotFound(id))?;
        self.revision += 1;
        Ok(removed)
    }

    /// Renames an item. The file path, if any, keeps its directory and takes
    /// the new name as its file name.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::ItemNotFound` for unknown items.
    pub fn rename_item(&mut self, id: ItemId, name: impl Into<String>) -> OutlineResult<()> {
        let item = self
            .root
            .find_mut(id)
            .ok_or(OutlineError::ItemNotFound(id))?;
        let name = name.into();
        if let Some(path) = item.file_path.as_mut() {
            path.set_file_name(&name);
        }
        item.name = name;
        self.revision += 1;
        Ok(())
    }

    /// Changes the kind of an item in place.
    ///
    /// # Errors
    ///
    /// Returns `OutlineError::ItemNotFound` for unknown items.
    pub fn set_kind(&mut self, id: ItemId, kind: ItemKind) -> OutlineResult<()> {
        let item = self
            .root
            .find_mut(id)
            .ok_or(OutlineError::ItemNotFound(id))?;
        item.kind = kind;
        self.revision += 1;
        Ok(())
    }

    /// Finds the item backed by the given project-relative path.
    #[must_use]
    pub fn find_by_path(&self, path: &Path) -> Option<ItemId> {
        self.root
            .iter()
            .find(|item| item.file_path.as_deref() == Some(path))
            .map(|item| item.id)
    }

    /// Finds the first item with the given display name (depth-first).
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        self.root
            .children
            .iter()
            .flat_map(ProjectItem::iter)
            .find(|item| item.name == name)
            .map(|item| item.id)
    }

    /// Looks an item up by path first, then by name.
    #[must_use]
    pub fn lookup(&self, query: &str) -> Option<ItemId> {
        self.find_by_path(Path::new(query))
            .or_else(|| self.find_by_name(query))
    }
}

impl OutlineModel for ProjectOutline {
    fn resolve(&self, id: ItemId) -> Option<SelectedItem> {
        self.get(id).map(ProjectItem::to_selected)
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn rows(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::with_capacity(self.len());
        for child in &self.root.children {
            child.collect_rows(0, &mut rows);
        }
        rows
    }
}

/// Shared handle to a [`ProjectOutline`].
///
/// The outline is owned by the project document; the window and its
/// collaborators all hold clones of this handle on the UI thread.
#[derive(Debug, Clone)]
pub struct SharedOutline(Rc<RefCell<ProjectOutline>>);

impl SharedOutline {
    /// Wraps an outline in a shared handle.
    #[must_use]
    pub fn new(outline: ProjectOutline) -> Self {
        Self(Rc::new(RefCell::new(outline)))
    }

    /// Borrows the outline for reading.
    ///
    /// # Panics
    ///
    /// Panics if the outline is currently borrowed mutably.
    #[must_use]
    pub fn read(&self) -> Ref<'_, ProjectOutline> {
        self.0.borrow()
    }

    /// Borrows the outline for editing.
    ///
    /// # Panics
    ///
    /// Panics if the outline is currently borrowed.
    #[must_use]
    pub fn write(&self) -> RefMut<'_, ProjectOutline> {
        self.0.borrow_mut()
    }

    /// Runs an edit against the outline and returns its result.
    pub fn update<R>(&self, edit: impl FnOnce(&mut ProjectOutline) -> R) -> R {
        edit(&mut self.0.borrow_mut())
    }
}

impl OutlineModel for SharedOutline {
    fn resolve(&self, id: ItemId) -> Option<SelectedItem> {
        self.0.borrow().resolve(id)
    }

    fn revision(&self) -> u64 {
        self.0.borrow().revision()
    }

    fn rows(&self) -> Vec<OutlineRow> {
        self.0.borrow().rows()
    }
}
