//! Type definitions for view composition
//!
//! This module contains the identifiers and descriptors the composition
//! controller hands out: controller IDs, load tickets, and the non-owning
//! pane references passed to the split layout.

use std::fmt;

use serde::Serialize;

use crate::outline::{EditorKind, ItemId, ItemKind};

/// Identifier assigned to every controller the composition controller installs.
///
/// IDs are allocated from a per-window counter and never reused, so a later
/// controller always has a larger ID than an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ControllerId(pub u64);

impl ControllerId {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Controller({})", self.0)
    }
}

/// The two ownership slots of a project window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Slot holding the editor for the selected item.
    Editor,
    /// Slot holding the playground for the selected module.
    Playground,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor => write!(f, "editor"),
            Self::Playground => write!(f, "playground"),
        }
    }
}

/// Token handed to the factory with every construction request.
///
/// A factory that finishes loading asynchronously reports back with the
/// ticket it was given. Tickets whose generation no longer matches the slot's
/// occupant are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LoadTicket {
    /// Slot the controller is being built for.
    pub slot: SlotKind,
    /// Generation of the construction; equals the controller ID it will get.
    pub generation: u64,
}

impl LoadTicket {
    /// Creates a ticket for the given slot and generation.
    #[must_use]
    pub const fn new(slot: SlotKind, generation: u64) -> Self {
        Self { slot, generation }
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.slot, self.generation)
    }
}

/// What a pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneKind {
    /// An editor of the given kind.
    Editor(EditorKind),
    /// The playground.
    Playground,
}

impl fmt::Display for PaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Editor(kind) => write!(f, "{kind}"),
            Self::Playground => write!(f, "playground"),
        }
    }
}

/// Identity of a slot's target: which item, of which kind, shown how.
///
/// Two selections that produce the same key leave the slot untouched. An item
/// whose kind changes in place gets a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    /// Item the occupant displays.
    pub item: ItemId,
    /// Kind of the item when the occupant was requested.
    pub item_kind: ItemKind,
    /// Kind of pane.
    pub pane: PaneKind,
}

impl SlotKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(item: ItemId, item_kind: ItemKind, pane: PaneKind) -> Self {
        Self {
            item,
            item_kind,
            pane,
        }
    }
}

/// Non-owning descriptor of an installed controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaneRef {
    /// Controller ID.
    pub id: ControllerId,
    /// Item shown in the pane.
    pub item: ItemId,
    /// Kind of pane.
    pub kind: PaneKind,
}

impl fmt::Display for PaneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} for {}", self.kind, self.id, self.item)
    }
}

/// The pair of panes the split layout should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePanes {
    /// Editor pane, if any.
    pub editor: Option<PaneRef>,
    /// Playground pane, if any.
    pub playground: Option<PaneRef>,
}

impl ActivePanes {
    /// No panes at all.
    pub const NONE: Self = Self {
        editor: None,
        playground: None,
    };

    /// Returns true if neither pane is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.editor.is_none() && self.playground.is_none()
    }
}

impl fmt::Display for ActivePanes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(pane: Option<&PaneRef>) -> String {
            pane.map_or_else(|| "none".to_string(), |p| format!("{} {}", p.kind, p.id))
        }
        write!(
            f,
            "editor={} playground={}",
            side(self.editor.as_ref()),
            side(self.playground.as_ref())
        )
    }
}
