//! Selection-driven composition of the editor and playground panes
//!
//! [`SelectionCompositionController`] owns the two slots of a project window.
//! Every event is handled to completion before the next one starts:
//!
//! 1. resolve the current selection against the outline model,
//! 2. tear down every occupant whose key no longer matches,
//! 3. construct the replacements through the factory,
//! 4. tell the split layout about the resulting pair of panes, once.
//!
//! A slot remembers the key it was last asked to show even if construction
//! failed, so repeating an event never retries or rebuilds anything.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::diagnostics::IssuesForFile;
use crate::outline::{ItemId, OutlineModel, SelectedItem};
use crate::tracing::span_names;
use crate::{trace_operation, trace_operation_debug};

use super::error::StaleSelectionError;
use super::events::{CompositionEvent, CompositionReceiver, LoadOutcome};
use super::slot::{Occupant, Slot, SlotState};
use super::traits::{
    EditorController, OutlineObserver, OutlineView, PlaygroundController, SplitLayoutCoordinator,
    ViewControllerFactory,
};
use super::types::{ActivePanes, ControllerId, LoadTicket, PaneKind, SlotKey, SlotKind};

/// Decides which editor and playground a project window shows, and owns them.
pub struct SelectionCompositionController<M, F, L>
where
    M: OutlineModel,
    F: ViewControllerFactory,
    L: SplitLayoutCoordinator,
{
    model: M,
    factory: F,
    layout: L,
    outline_view: Option<Box<dyn OutlineView>>,
    selection: Option<ItemId>,
    selected: Option<SelectedItem>,
    editor: Slot<F::Editor>,
    playground: Slot<F::Playground>,
    editor_target: Option<SlotKey>,
    playground_target: Option<SlotKey>,
    issues: HashMap<PathBuf, IssuesForFile>,
    playground_enabled: bool,
    generation: u64,
    torn_down: bool,
}

impl<M, F, L> SelectionCompositionController<M, F, L>
where
    M: OutlineModel,
    F: ViewControllerFactory,
    L: SplitLayoutCoordinator,
{
    /// Creates a controller with empty slots and nothing selected.
    #[must_use]
    pub fn new(model: M, factory: F, layout: L) -> Self {
        Self {
            model,
            factory,
            layout,
            outline_view: None,
            selection: None,
            selected: None,
            editor: Slot::Empty,
            playground: Slot::Empty,
            editor_target: None,
            playground_target: None,
            issues: HashMap::new(),
            playground_enabled: true,
            generation: 0,
            torn_down: false,
        }
    }

    /// Attaches an outline view that receives rows on refresh.
    #[must_use]
    pub fn with_outline_view(mut self, view: Box<dyn OutlineView>) -> Self {
        self.outline_view = Some(view);
        self
    }

    /// Sets whether modules get a playground, without re-evaluating anything.
    #[must_use]
    pub fn with_playground_enabled(mut self, enabled: bool) -> Self {
        self.playground_enabled = enabled;
        self
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    /// The panes currently installed.
    #[must_use]
    pub fn active_panes(&self) -> ActivePanes {
        ActivePanes {
            editor: self.editor.pane_ref(),
            playground: self.playground.pane_ref(),
        }
    }

    /// The live editor, if any.
    #[must_use]
    pub fn editor(&self) -> Option<&F::Editor> {
        self.editor.occupant().map(|o| &o.controller)
    }

    /// The live playground, if any.
    #[must_use]
    pub fn playground(&self) -> Option<&F::Playground> {
        self.playground.occupant().map(|o| &o.controller)
    }

    /// State of the editor slot.
    #[must_use]
    pub const fn editor_state(&self) -> SlotState {
        self.editor.state()
    }

    /// State of the playground slot.
    #[must_use]
    pub const fn playground_state(&self) -> SlotState {
        self.playground.state()
    }

    /// The selected item ID, if the selection still resolves.
    #[must_use]
    pub const fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    /// The selected item as last resolved.
    #[must_use]
    pub const fn selected_item(&self) -> Option<&SelectedItem> {
        self.selected.as_ref()
    }

    /// Number of constructions requested so far; also the last ticket generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true once the window has been torn down.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Whether modules currently get a playground.
    #[must_use]
    pub const fn playground_enabled(&self) -> bool {
        self.playground_enabled
    }

    /// The outline model.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// The view controller factory.
    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// The view controller factory, mutably.
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// The split layout coordinator.
    #[must_use]
    pub const fn layout(&self) -> &L {
        &self.layout
    }

    /// Latest issues reported for `path`, if any.
    #[must_use]
    pub fn issues_for(&self, path: &std::path::Path) -> Option<&IssuesForFile> {
        self.issues.values().find(|set| set.is_for(path))
    }

    // ---------------------------------------------------------------------
    // Inbound notifications
    // ---------------------------------------------------------------------

    /// Reacts to a new outline selection.
    ///
    /// Re-selecting what is already shown changes nothing beyond one layout
    /// notification. This includes a slot whose construction failed: the
    /// factory is asked again only once the selection or the item's kind
    /// changes, and the same holds after a failed load.
    pub fn on_selection_changed(&mut self, selection: Option<ItemId>) {
        if self.ignore_after_teardown("selection change") {
            return;
        }
        let _span = trace_operation!(span_names::SELECTION_CHANGED, item = ?selection).entered();

        self.selection = selection;
        let resolved = self.resolve_selection();
        self.selected = resolved.clone();
        self.reconcile(resolved.as_ref());
    }

    /// Re-resolves the selection after the outline model changed.
    ///
    /// A vanished item clears the selection. A renamed item keeps its
    /// controllers and the editor is told about the new name. An item whose
    /// kind changed gets new controllers.
    pub fn on_outline_model_changed(&mut self) {
        if self.ignore_after_teardown("outline model change") {
            return;
        }
        let _span = trace_operation!(
            span_names::MODEL_CHANGED,
            revision = self.model.revision()
        )
        .entered();

        let resolved = self.resolve_selection();
        let renamed = match (self.selected.as_ref(), resolved.as_ref()) {
            (Some(old), Some(new)) => {
                old.id == new.id && (old.name != new.name || old.file_path != new.file_path)
            }
            _ => false,
        };
        if renamed && let Some(new) = resolved.as_ref() {
            self.apply_rename(new);
        }
        self.selected = resolved.clone();
        self.reload_outline_view();
        self.reconcile(resolved.as_ref());
    }

    /// Pushes the current outline rows to the outline view.
    ///
    /// Live controllers are only touched if the selected item has vanished,
    /// in which case the deselection path runs.
    pub fn refresh_outline_view(&mut self) {
        if self.ignore_after_teardown("outline refresh") {
            return;
        }
        let _span = trace_operation_debug!(span_names::REFRESH_OUTLINE).entered();

        self.reload_outline_view();
        if let Some(id) = self.selection
            && self.model.resolve(id).is_none()
        {
            let error = StaleSelectionError { item: id };
            tracing::debug!(%error, "Selection vanished during refresh");
            self.selection = None;
            self.selected = None;
            self.reconcile(None);
        }
    }

    /// Releases both slots because the window is closing.
    ///
    /// The layout is told to show nothing. Calling this again does nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let _span = trace_operation!(span_names::TEARDOWN).entered();
        self.torn_down = true;

        if let Some(mut occupant) = self.editor.take() {
            tracing::debug!(controller_id = %occupant.id, "Tearing down editor");
            occupant.controller.teardown();
        }
        if let Some(mut occupant) = self.playground.take() {
            tracing::debug!(controller_id = %occupant.id, "Tearing down playground");
            occupant.controller.teardown();
        }
        self.editor_target = None;
        self.playground_target = None;
        self.selection = None;
        self.selected = None;
        self.issues.clear();
        self.layout.set_active_panes(ActivePanes::NONE);
        tracing::info!("Project window torn down");
    }

    /// Handles the completion of an asynchronous load.
    ///
    /// Completions for controllers that have since been replaced are dropped.
    /// A failed load tears the controller down and empties its slot.
    pub fn on_load_completed(&mut self, ticket: LoadTicket, outcome: LoadOutcome) {
        if self.ignore_after_teardown("load completion") {
            return;
        }
        let _span = trace_operation!(
            span_names::LOAD_COMPLETED,
            slot = %ticket.slot,
            generation = ticket.generation
        )
        .entered();

        let current = match ticket.slot {
            SlotKind::Editor => self.editor.occupant().map(|o| o.id),
            SlotKind::Playground => self.playground.occupant().map(|o| o.id),
        };
        if current != Some(ControllerId(ticket.generation)) {
            tracing::debug!(%ticket, "Discarding load completion for superseded controller");
            return;
        }

        match (ticket.slot, outcome) {
            (SlotKind::Editor, LoadOutcome::Loaded) => {
                if let Some(occupant) = self.editor.occupant_mut() {
                    occupant.controller.content_loaded();
                }
            }
            (SlotKind::Playground, LoadOutcome::Loaded) => {
                if let Some(occupant) = self.playground.occupant_mut() {
                    occupant.controller.content_loaded();
                }
            }
            (SlotKind::Editor, LoadOutcome::Failed(error)) => {
                if let Some(mut occupant) = self.editor.take() {
                    tracing::warn!(%error, item = %occupant.key.item, "Editor failed to load");
                    occupant.controller.teardown();
                }
                self.notify_layout();
            }
            (SlotKind::Playground, LoadOutcome::Failed(error)) => {
                if let Some(mut occupant) = self.playground.take() {
                    tracing::warn!(%error, item = %occupant.key.item, "Playground failed to load");
                    occupant.controller.teardown();
                }
                self.notify_layout();
            }
        }
    }

    /// Stores the latest issues for a file and forwards them to the editor
    /// showing that file.
    ///
    /// The new set replaces every stored set for the same file, including
    /// sets reported under a longer absolute path. An empty issue set only
    /// clears.
    pub fn on_issues_reported(&mut self, issues: IssuesForFile) {
        if self.ignore_after_teardown("issue report") {
            return;
        }
        let _span = trace_operation_debug!(
            span_names::ISSUES_REPORTED,
            file = %issues.file.display(),
            issue_count = issues.len()
        )
        .entered();

        if let Some(occupant) = self.editor.occupant_mut()
            && occupant
                .item
                .file_path
                .as_deref()
                .is_some_and(|path| issues.is_for(path))
        {
            occupant.controller.update_issues(&issues);
        }
        self.issues
            .retain(|file, stored| !stored.is_for(&issues.file) && !issues.is_for(file));
        if !issues.is_empty() {
            self.issues.insert(issues.file.clone(), issues);
        }
    }

    /// Tells the editor and playground of `item` that its module was loaded.
    pub fn on_module_loaded(&mut self, item: ItemId) {
        if self.ignore_after_teardown("module load") {
            return;
        }
        let _span = trace_operation_debug!(span_names::MODULE_LOADED, item = %item).entered();

        if let Some(occupant) = self.editor.occupant_mut()
            && occupant.key.item == item
        {
            occupant.controller.module_loaded();
        }
        if let Some(occupant) = self.playground.occupant_mut()
            && occupant.key.item == item
        {
            occupant.controller.module_loaded();
        }
    }

    /// Turns playgrounds on or off and re-evaluates the current selection.
    pub fn set_playground_enabled(&mut self, enabled: bool) {
        if self.ignore_after_teardown("playground toggle") {
            return;
        }
        let _span = trace_operation!(span_names::PLAYGROUND_TOGGLED, enabled).entered();

        self.playground_enabled = enabled;
        let resolved = self.resolve_selection();
        self.selected = resolved.clone();
        self.reconcile(resolved.as_ref());
    }

    /// Dispatches one event to the matching handler.
    pub fn handle_event(&mut self, event: CompositionEvent) {
        match event {
            CompositionEvent::SelectionChanged(selection) => self.on_selection_changed(selection),
            CompositionEvent::OutlineModelChanged => self.on_outline_model_changed(),
            CompositionEvent::RefreshOutlineView => self.refresh_outline_view(),
            CompositionEvent::LoadCompleted { ticket, outcome } => {
                self.on_load_completed(ticket, outcome);
            }
            CompositionEvent::IssuesReported(issues) => self.on_issues_reported(issues),
            CompositionEvent::ModuleLoaded(item) => self.on_module_loaded(item),
            CompositionEvent::PlaygroundEnabled(enabled) => self.set_playground_enabled(enabled),
            CompositionEvent::WindowClosed => self.teardown(),
        }
    }

    /// Handles every event queued so far, in arrival order.
    ///
    /// Returns the number of events handled.
    pub fn pump(&mut self, receiver: &mut CompositionReceiver) -> usize {
        let mut handled = 0;
        while let Ok((span, event)) = receiver.try_recv() {
            span.in_scope(|| self.handle_event(event));
            handled += 1;
        }
        handled
    }

    /// Handles events until every sender has been dropped.
    pub async fn run(&mut self, mut receiver: CompositionReceiver) {
        while let Some((span, event)) = receiver.recv().await {
            span.in_scope(|| self.handle_event(event));
        }
        tracing::debug!("Composition event queue closed");
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn ignore_after_teardown(&self, what: &str) -> bool {
        if self.torn_down {
            tracing::debug!(event = what, "Ignoring event after teardown");
        }
        self.torn_down
    }

    fn resolve_selection(&mut self) -> Option<SelectedItem> {
        let id = self.selection?;
        let resolved = self.model.resolve(id);
        if resolved.is_none() {
            let error = StaleSelectionError { item: id };
            tracing::debug!(%error, "Treating stale selection as deselection");
            self.selection = None;
        }
        resolved
    }

    fn apply_rename(&mut self, item: &SelectedItem) {
        tracing::debug!(item = %item.id, name = %item.name, "Selected item renamed");
        if let Some(occupant) = self.editor.occupant_mut()
            && occupant.key.item == item.id
            && occupant.key.item_kind == item.kind
        {
            occupant.item = item.clone();
            occupant.controller.item_renamed(item);
        }
        if let Some(occupant) = self.playground.occupant_mut()
            && occupant.key.item == item.id
            && occupant.key.item_kind == item.kind
        {
            occupant.item = item.clone();
        }
    }

    fn editor_key(item: &SelectedItem) -> Option<SlotKey> {
        item.editor_kind()
            .map(|kind| SlotKey::new(item.id, item.kind, PaneKind::Editor(kind)))
    }

    fn playground_key(&self, item: &SelectedItem) -> Option<SlotKey> {
        (self.playground_enabled && item.has_playground())
            .then(|| SlotKey::new(item.id, item.kind, PaneKind::Playground))
    }

    fn next_ticket(&mut self, slot: SlotKind) -> LoadTicket {
        self.generation += 1;
        LoadTicket::new(slot, self.generation)
    }

    /// Brings both slots in line with `selected` and notifies the layout once.
    fn reconcile(&mut self, selected: Option<&SelectedItem>) {
        let editor_key = selected.and_then(Self::editor_key);
        let playground_key = selected.and_then(|item| self.playground_key(item));

        let replace_editor = editor_key != self.editor_target;
        let replace_playground = playground_key != self.playground_target;

        if replace_editor && let Some(mut old) = self.editor.begin_replacement() {
            tracing::debug!(controller_id = %old.id, item = %old.key.item, "Tearing down editor");
            old.controller.teardown();
        }
        if replace_playground && let Some(mut old) = self.playground.begin_replacement() {
            tracing::debug!(controller_id = %old.id, item = %old.key.item, "Tearing down playground");
            old.controller.teardown();
        }

        if replace_editor {
            self.editor_target = editor_key;
            self.install_editor(selected, editor_key);
        }
        if replace_playground {
            self.playground_target = playground_key;
            self.install_playground(selected, playground_key);
        }

        self.notify_layout();
    }

    fn install_editor(&mut self, selected: Option<&SelectedItem>, key: Option<SlotKey>) {
        let (Some(item), Some(key)) = (selected, key) else {
            self.editor = Slot::Empty;
            return;
        };
        let ticket = self.next_ticket(SlotKind::Editor);
        match self.factory.make_editor(item, ticket) {
            Ok(mut controller) => {
                if let Some(issues) = item
                    .file_path
                    .as_deref()
                    .and_then(|path| self.issues.values().find(|set| set.is_for(path)))
                {
                    controller.update_issues(issues);
                }
                let id = ControllerId(ticket.generation);
                tracing::debug!(controller_id = %id, item = %item.id, kind = %key.pane, "Editor installed");
                self.editor.install(Occupant {
                    id,
                    key,
                    item: item.clone(),
                    controller,
                });
            }
            Err(error) => {
                tracing::warn!(%error, item = %item.id, name = %item.name, "Could not construct editor");
                self.editor = Slot::Empty;
            }
        }
    }

    fn install_playground(&mut self, selected: Option<&SelectedItem>, key: Option<SlotKey>) {
        let (Some(item), Some(key)) = (selected, key) else {
            self.playground = Slot::Empty;
            return;
        };
        let ticket = self.next_ticket(SlotKind::Playground);
        match self.factory.make_playground(item, ticket) {
            Ok(Some(controller)) => {
                let id = ControllerId(ticket.generation);
                tracing::debug!(controller_id = %id, item = %item.id, "Playground installed");
                self.playground.install(Occupant {
                    id,
                    key,
                    item: item.clone(),
                    controller,
                });
            }
            Ok(None) => {
                tracing::debug!(item = %item.id, "Factory provides no playground");
                self.playground = Slot::Empty;
            }
            Err(error) => {
                tracing::warn!(%error, item = %item.id, name = %item.name, "Could not construct playground");
                self.playground = Slot::Empty;
            }
        }
    }

    fn notify_layout(&mut self) {
        let panes = self.active_panes();
        tracing::debug!(%panes, "Updating split layout");
        self.layout.set_active_panes(panes);
    }

    fn reload_outline_view(&mut self) {
        if let Some(view) = self.outline_view.as_mut() {
            let rows = self.model.rows();
            view.reload(&rows);
        }
    }
}

impl<M, F, L> OutlineObserver for SelectionCompositionController<M, F, L>
where
    M: OutlineModel,
    F: ViewControllerFactory,
    L: SplitLayoutCoordinator,
{
    fn outline_selection_changed(&mut self, selection: Option<ItemId>) {
        self.on_selection_changed(selection);
    }

    fn outline_model_changed(&mut self) {
        self.on_outline_model_changed();
    }
}

impl<M, F, L> Drop for SelectionCompositionController<M, F, L>
where
    M: OutlineModel,
    F: ViewControllerFactory,
    L: SplitLayoutCoordinator,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<M, F, L> std::fmt::Debug for SelectionCompositionController<M, F, L>
where
    M: OutlineModel,
    F: ViewControllerFactory,
    L: SplitLayoutCoordinator,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCompositionController")
            .field("selection", &self.selection)
            .field("editor", &self.editor.state())
            .field("playground", &self.playground.state())
            .field("generation", &self.generation)
            .field("playground_enabled", &self.playground_enabled)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
