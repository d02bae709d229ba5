//! Collaborator contracts
//!
//! The composition controller owns editors and playgrounds but knows nothing
//! about how they are built or drawn. These traits are the seams: a factory
//! builds controllers, the split layout arranges panes, and an optional
//! outline view shows the project tree.

use crate::diagnostics::IssuesForFile;
use crate::outline::{EditorKind, ItemId, OutlineRow, SelectedItem};

use super::error::ConstructionError;
use super::types::{ActivePanes, LoadTicket};

/// A live editor view controller.
///
/// Notification hooks default to no-ops; only `kind` and `teardown` are
/// required.
pub trait EditorController {
    /// Kind of editor this controller is.
    fn kind(&self) -> EditorKind;

    /// Releases every resource the editor holds. Called exactly once, before
    /// the controller is dropped.
    fn teardown(&mut self);

    /// The compiler reported new issues for the edited file.
    fn update_issues(&mut self, _issues: &IssuesForFile) {}

    /// The module shown in the editor was (re)loaded by the compiler.
    fn module_loaded(&mut self) {}

    /// The edited item was renamed or moved.
    fn item_renamed(&mut self, _item: &SelectedItem) {}

    /// An asynchronous content load finished.
    fn content_loaded(&mut self) {}
}

/// A live playground controller.
pub trait PlaygroundController {
    /// Releases every resource the playground holds. Called exactly once,
    /// before the controller is dropped.
    fn teardown(&mut self);

    /// The module the playground evaluates against was (re)loaded.
    fn module_loaded(&mut self) {}

    /// An asynchronous content load finished.
    fn content_loaded(&mut self) {}
}

/// Builds view controllers for selected items.
///
/// Construction is synchronous. A factory that needs to load content in the
/// background returns a controller right away and later reports completion
/// with the ticket it was given.
pub trait ViewControllerFactory {
    /// Editor controller type.
    type Editor: EditorController;
    /// Playground controller type.
    type Playground: PlaygroundController;

    /// Builds the editor for `item`.
    ///
    /// # Errors
    ///
    /// Returns a `ConstructionError` if no editor can be built.
    fn make_editor(
        &mut self,
        item: &SelectedItem,
        ticket: LoadTicket,
    ) -> Result<Self::Editor, ConstructionError>;

    /// Builds the playground for `item`, or `None` if it has none.
    ///
    /// # Errors
    ///
    /// Returns a `ConstructionError` if the playground can't be built.
    fn make_playground(
        &mut self,
        item: &SelectedItem,
        ticket: LoadTicket,
    ) -> Result<Option<Self::Playground>, ConstructionError>;
}

/// Arranges the editor and playground panes.
pub trait SplitLayoutCoordinator {
    /// Shows the given panes. Called once per handled event.
    fn set_active_panes(&mut self, panes: ActivePanes);
}

/// Displays the project outline.
pub trait OutlineView {
    /// Replaces the displayed rows.
    fn reload(&mut self, rows: &[OutlineRow]);
}

/// Receives outline notifications.
pub trait OutlineObserver {
    /// The outline selection changed.
    fn outline_selection_changed(&mut self, selection: Option<ItemId>);

    /// Items were added, removed, renamed or changed kind.
    fn outline_model_changed(&mut self);
}

impl<T: SplitLayoutCoordinator + ?Sized> SplitLayoutCoordinator for Box<T> {
    fn set_active_panes(&mut self, panes: ActivePanes) {
        (**self).set_active_panes(panes);
    }
}
