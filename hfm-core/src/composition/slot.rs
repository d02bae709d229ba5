//! Ownership slots
//!
//! A [`Slot`] holds zero or one live controller. The composition controller
//! is the only code that mutates slots.

use std::fmt;

use serde::Serialize;

use crate::outline::SelectedItem;

use super::types::{ControllerId, PaneRef, SlotKey};

/// A controller installed in a slot, plus what it was built for.
#[derive(Debug)]
pub struct Occupant<C> {
    /// ID assigned at installation.
    pub id: ControllerId,
    /// Key the controller was built for.
    pub key: SlotKey,
    /// Item as of the last refresh.
    pub item: SelectedItem,
    /// The controller itself.
    pub controller: C,
}

impl<C> Occupant<C> {
    /// Non-owning descriptor of this occupant.
    #[must_use]
    pub const fn pane_ref(&self) -> PaneRef {
        PaneRef {
            id: self.id,
            item: self.key.item,
            kind: self.key.pane,
        }
    }
}

/// Slot state.
#[derive(Debug)]
pub enum Slot<C> {
    /// Nothing installed.
    Empty,
    /// The previous occupant has been torn down and the replacement has not
    /// been decided yet. Only observable while an event is being handled.
    Replacing,
    /// A live controller.
    Active(Occupant<C>),
}

/// Discriminant of a [`Slot`], for logging and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// See [`Slot::Empty`].
    Empty,
    /// See [`Slot::Replacing`].
    Replacing,
    /// See [`Slot::Active`].
    Active,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Replacing => write!(f, "replacing"),
            Self::Active => write!(f, "active"),
        }
    }
}

impl<C> Default for Slot<C> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<C> Slot<C> {
    /// Current state.
    #[must_use]
    pub const fn state(&self) -> SlotState {
        match self {
            Self::Empty => SlotState::Empty,
            Self::Replacing => SlotState::Replacing,
            Self::Active(_) => SlotState::Active,
        }
    }

    /// Returns true if a controller is installed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// The installed occupant.
    #[must_use]
    pub const fn occupant(&self) -> Option<&Occupant<C>> {
        match self {
            Self::Active(occupant) => Some(occupant),
            _ => None,
        }
    }

    /// The installed occupant, mutably.
    pub fn occupant_mut(&mut self) -> Option<&mut Occupant<C>> {
        match self {
            Self::Active(occupant) => Some(occupant),
            _ => None,
        }
    }

    /// Descriptor of the installed occupant.
    #[must_use]
    pub fn pane_ref(&self) -> Option<PaneRef> {
        self.occupant().map(Occupant::pane_ref)
    }

    /// Moves the slot to `Replacing` and hands back the previous occupant.
    pub fn begin_replacement(&mut self) -> Option<Occupant<C>> {
        match std::mem::replace(self, Self::Replacing) {
            Self::Active(occupant) => Some(occupant),
            _ => None,
        }
    }

    /// Installs a new occupant.
    pub fn install(&mut self, occupant: Occupant<C>) {
        debug_assert!(!self.is_active(), "slot already occupied");
        *self = Self::Active(occupant);
    }

    /// Empties the slot and hands back the previous occupant.
    pub fn take(&mut self) -> Option<Occupant<C>> {
        match std::mem::take(self) {
            Self::Active(occupant) => Some(occupant),
            _ => None,
        }
    }
}
