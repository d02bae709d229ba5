//! Recording collaborators
//!
//! Headless implementations of every collaborator trait that write what
//! happens to them into a shared [`CallLog`]. The CLI replays selection
//! scripts through them, and tests use the log to check call ordering.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::diagnostics::IssuesForFile;
use crate::outline::{EditorKind, ItemId, OutlineRow, SelectedItem};

use super::error::ConstructionError;
use super::traits::{
    EditorController, OutlineView, PlaygroundController, SplitLayoutCoordinator,
    ViewControllerFactory,
};
use super::types::{ActivePanes, LoadTicket, PaneKind, SlotKind};

/// A notification delivered to a live controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    /// `update_issues` with this many issues.
    Issues(usize),
    /// `module_loaded`.
    ModuleLoaded,
    /// `item_renamed` with the new name.
    Renamed(String),
    /// `content_loaded`.
    ContentLoaded,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issues(count) => write!(f, "{count} issue(s)"),
            Self::ModuleLoaded => write!(f, "module loaded"),
            Self::Renamed(name) => write!(f, "renamed to {name}"),
            Self::ContentLoaded => write!(f, "content loaded"),
        }
    }
}

/// One thing that happened to a recording collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum LifecycleCall {
    /// The factory built a controller.
    Construct {
        /// Slot it was built for.
        slot: SlotKind,
        /// Ticket generation.
        generation: u64,
        /// What it shows.
        pane: PaneKind,
        /// Item name.
        item: String,
    },
    /// The factory refused to build a controller.
    Refuse {
        /// Slot it was asked for.
        slot: SlotKind,
        /// Item name.
        item: String,
        /// Error returned.
        reason: String,
    },
    /// A controller was torn down.
    Teardown {
        /// Slot it lived in.
        slot: SlotKind,
        /// Generation it was built with.
        generation: u64,
        /// Item name.
        item: String,
    },
    /// A controller received a notification.
    Notify {
        /// Slot it lives in.
        slot: SlotKind,
        /// Generation it was built with.
        generation: u64,
        /// What it was told.
        notification: Notification,
    },
    /// The layout was given a pair of panes.
    Layout(ActivePanes),
    /// The outline view was reloaded.
    OutlineReloaded {
        /// Number of rows pushed.
        rows: usize,
    },
}

impl LifecycleCall {
    /// Returns true for factory constructions.
    #[must_use]
    pub const fn is_construct(&self) -> bool {
        matches!(self, Self::Construct { .. })
    }

    /// Returns true for teardowns.
    #[must_use]
    pub const fn is_teardown(&self) -> bool {
        matches!(self, Self::Teardown { .. })
    }

    /// Returns true for layout notifications.
    #[must_use]
    pub const fn is_layout(&self) -> bool {
        matches!(self, Self::Layout(_))
    }
}

impl fmt::Display for LifecycleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct {
                generation,
                pane,
                item,
                ..
            } => write!(f, "construct {pane} #{generation} for {item}"),
            Self::Refuse { slot, item, reason } => {
                write!(f, "refuse {slot} for {item}: {reason}")
            }
            Self::Teardown {
                slot,
                generation,
                item,
            } => write!(f, "teardown {slot} #{generation} for {item}"),
            Self::Notify {
                slot,
                generation,
                notification,
            } => write!(f, "notify {slot} #{generation}: {notification}"),
            Self::Layout(panes) => write!(f, "layout {panes}"),
            Self::OutlineReloaded { rows } => write!(f, "outline reloaded ({rows} rows)"),
        }
    }
}

/// Shared, append-only log of lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<LifecycleCall>>>);

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    pub fn push(&self, call: LifecycleCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copy of every call so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LifecycleCall> {
        self.0.borrow().clone()
    }

    /// Removes and returns every call so far.
    #[must_use]
    pub fn take(&self) -> Vec<LifecycleCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    /// Number of calls logged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Number of calls matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&LifecycleCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| predicate(call)).count()
    }
}

/// Editor that logs its lifecycle.
#[derive(Debug)]
pub struct RecordingEditor {
    log: CallLog,
    generation: u64,
    kind: EditorKind,
    item: String,
    torn_down: bool,
}

impl RecordingEditor {
    /// Ticket generation the editor was built with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Name of the edited item.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item
    }

    /// Returns true once `teardown` has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn notify(&self, notification: Notification) {
        self.log.push(LifecycleCall::Notify {
            slot: SlotKind::Editor,
            generation: self.generation,
            notification,
        });
    }
}

impl EditorController for RecordingEditor {
    fn kind(&self) -> EditorKind {
        self.kind
    }

    fn teardown(&mut self) {
        self.torn_down = true;
        self.log.push(LifecycleCall::Teardown {
            slot: SlotKind::Editor,
            generation: self.generation,
            item: self.item.clone(),
        });
    }

    fn update_issues(&mut self, issues: &IssuesForFile) {
        self.notify(Notification::Issues(issues.len()));
    }

    fn module_loaded(&mut self) {
        self.notify(Notification::ModuleLoaded);
    }

    fn item_renamed(&mut self, item: &SelectedItem) {
        self.item.clone_from(&item.name);
        self.notify(Notification::Renamed(item.name.clone()));
    }

    fn content_loaded(&mut self) {
        self.notify(Notification::ContentLoaded);
    }
}

/// Playground that logs its lifecycle.
#[derive(Debug)]
pub struct RecordingPlayground {
    log: CallLog,
    generation: u64,
    item: String,
    torn_down: bool,
}

impl RecordingPlayground {
    /// Ticket generation the playground was built with.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true once `teardown` has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn notify(&self, notification: Notification) {
        self.log.push(LifecycleCall::Notify {
            slot: SlotKind::Playground,
            generation: self.generation,
            notification,
        });
    }
}

impl PlaygroundController for RecordingPlayground {
    fn teardown(&mut self) {
        self.torn_down = true;
        self.log.push(LifecycleCall::Teardown {
            slot: SlotKind::Playground,
            generation: self.generation,
            item: self.item.clone(),
        });
    }

    fn module_loaded(&mut self) {
        self.notify(Notification::ModuleLoaded);
    }

    fn content_loaded(&mut self) {
        self.notify(Notification::ContentLoaded);
    }
}

/// Factory that builds recording controllers and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    log: CallLog,
    failing_editors: HashSet<ItemId>,
    failing_playgrounds: HashSet<ItemId>,
    declined_playgrounds: HashSet<ItemId>,
    tickets: Vec<LoadTicket>,
}

impl RecordingFactory {
    /// Creates a factory writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Makes editor construction for `item` fail.
    pub fn fail_editor_for(&mut self, item: ItemId) {
        self.failing_editors.insert(item);
    }

    /// Makes playground construction for `item` fail.
    pub fn fail_playground_for(&mut self, item: ItemId) {
        self.failing_playgrounds.insert(item);
    }

    /// Makes the factory return no playground for `item`.
    pub fn decline_playground_for(&mut self, item: ItemId) {
        self.declined_playgrounds.insert(item);
    }

    /// Forgets every configured failure.
    pub fn clear_failures(&mut self) {
        self.failing_editors.clear();
        self.failing_playgrounds.clear();
        self.declined_playgrounds.clear();
    }

    /// Every ticket handed to the factory, in order.
    #[must_use]
    pub fn tickets(&self) -> &[LoadTicket] {
        &self.tickets
    }

    /// The most recent ticket for `slot`.
    #[must_use]
    pub fn last_ticket(&self, slot: SlotKind) -> Option<LoadTicket> {
        self.tickets.iter().rev().find(|t| t.slot == slot).copied()
    }

    fn refuse(&self, slot: SlotKind, item: &SelectedItem, error: ConstructionError) -> ConstructionError {
        self.log.push(LifecycleCall::Refuse {
            slot,
            item: item.name.clone(),
            reason: error.to_string(),
        });
        error
    }
}

impl ViewControllerFactory for RecordingFactory {
    type Editor = RecordingEditor;
    type Playground = RecordingPlayground;

    fn make_editor(
        &mut self,
        item: &SelectedItem,
        ticket: LoadTicket,
    ) -> Result<Self::Editor, ConstructionError> {
        self.tickets.push(ticket);
        let Some(kind) = item.editor_kind() else {
            return Err(self.refuse(
                SlotKind::Editor,
                item,
                ConstructionError::UnsupportedKind(item.kind),
            ));
        };
        if self.failing_editors.contains(&item.id) {
            return Err(self.refuse(
                SlotKind::Editor,
                item,
                ConstructionError::Failed(format!("editor for {} is configured to fail", item.name)),
            ));
        }
        self.log.push(LifecycleCall::Construct {
            slot: SlotKind::Editor,
            generation: ticket.generation,
            pane: PaneKind::Editor(kind),
            item: item.name.clone(),
        });
        Ok(RecordingEditor {
            log: self.log.clone(),
            generation: ticket.generation,
            kind,
            item: item.name.clone(),
            torn_down: false,
        })
    }

    fn make_playground(
        &mut self,
        item: &SelectedItem,
        ticket: LoadTicket,
    ) -> Result<Option<Self::Playground>, ConstructionError> {
        self.tickets.push(ticket);
        if self.declined_playgrounds.contains(&item.id) {
            return Ok(None);
        }
        if self.failing_playgrounds.contains(&item.id) {
            return Err(self.refuse(
                SlotKind::Playground,
                item,
                ConstructionError::Failed(format!(
                    "playground for {} is configured to fail",
                    item.name
                )),
            ));
        }
        self.log.push(LifecycleCall::Construct {
            slot: SlotKind::Playground,
            generation: ticket.generation,
            pane: PaneKind::Playground,
            item: item.name.clone(),
        });
        Ok(Some(RecordingPlayground {
            log: self.log.clone(),
            generation: ticket.generation,
            item: item.name.clone(),
            torn_down: false,
        }))
    }
}

/// Split layout that logs every pane pair it is given.
#[derive(Debug, Default)]
pub struct RecordingLayout {
    log: CallLog,
    notifications: usize,
    last: Option<ActivePanes>,
}

impl RecordingLayout {
    /// Creates a layout writing to `log`.
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Number of `set_active_panes` calls.
    #[must_use]
    pub const fn notifications(&self) -> usize {
        self.notifications
    }

    /// Last pane pair received.
    #[must_use]
    pub const fn last(&self) -> Option<ActivePanes> {
        self.last
    }
}

impl SplitLayoutCoordinator for RecordingLayout {
    fn set_active_panes(&mut self, panes: ActivePanes) {
        self.notifications += 1;
        self.last = Some(panes);
        self.log.push(LifecycleCall::Layout(panes));
    }
}

/// Outline view that logs reloads.
#[derive(Debug, Default)]
pub struct RecordingOutlineView {
    log: CallLog,
}

impl RecordingOutlineView {
    /// Creates a view writing to `log`.
    #[must_use]
    pub const fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl OutlineView for RecordingOutlineView {
    fn reload(&mut self, rows: &[OutlineRow]) {
        self.log.push(LifecycleCall::OutlineReloaded { rows: rows.len() });
    }
}
