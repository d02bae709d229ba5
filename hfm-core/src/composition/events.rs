//! Event queue for the composition controller
//!
//! Collaborators that cannot call the controller directly (a factory that
//! finished loading in the background, the compiler reporting issues) post
//! [`CompositionEvent`]s through a [`CompositionSender`]. Each event carries
//! the span it was posted from, so handling it is attributed to the poster.

use std::fmt;

use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::Span;

use crate::diagnostics::IssuesForFile;
use crate::outline::ItemId;

use super::error::ConstructionError;
use super::types::LoadTicket;

/// Result of an asynchronous load started by a factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Content is ready.
    Loaded,
    /// Loading failed; the controller can't be used.
    Failed(ConstructionError),
}

/// Everything the composition controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionEvent {
    /// The outline selection changed.
    SelectionChanged(Option<ItemId>),
    /// The outline model changed.
    OutlineModelChanged,
    /// The outline view should be redrawn.
    RefreshOutlineView,
    /// A factory finished an asynchronous load.
    LoadCompleted {
        /// Ticket the factory was given.
        ticket: LoadTicket,
        /// How the load went.
        outcome: LoadOutcome,
    },
    /// The compiler reported issues for a file.
    IssuesReported(IssuesForFile),
    /// The compiler (re)loaded a module.
    ModuleLoaded(ItemId),
    /// The playground preference changed.
    PlaygroundEnabled(bool),
    /// The window is closing.
    WindowClosed,
}

impl fmt::Display for CompositionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectionChanged(Some(id)) => write!(f, "selection changed to {id}"),
            Self::SelectionChanged(None) => write!(f, "selection cleared"),
            Self::OutlineModelChanged => write!(f, "outline model changed"),
            Self::RefreshOutlineView => write!(f, "refresh outline view"),
            Self::LoadCompleted { ticket, .. } => write!(f, "load completed for {ticket}"),
            Self::IssuesReported(issues) => {
                write!(f, "issues reported for {}", issues.file.display())
            }
            Self::ModuleLoaded(id) => write!(f, "module loaded for {id}"),
            Self::PlaygroundEnabled(enabled) => write!(f, "playground enabled: {enabled}"),
            Self::WindowClosed => write!(f, "window closed"),
        }
    }
}

/// Posting end of the composition event queue.
pub struct CompositionSender(UnboundedSender<(Span, CompositionEvent)>);

/// Receiving end of the composition event queue.
pub type CompositionReceiver = UnboundedReceiver<(Span, CompositionEvent)>;

/// Creates a new composition event queue.
#[must_use]
pub fn channel() -> (CompositionSender, CompositionReceiver) {
    let (tx, rx) = unbounded_channel();
    (CompositionSender(tx), rx)
}

impl CompositionSender {
    /// Posts an event, ignoring a closed queue.
    pub fn send(&self, event: CompositionEvent) {
        // A closed queue means the window is gone.
        _ = self.try_send(event);
    }

    /// Posts an event.
    ///
    /// # Errors
    ///
    /// Returns the event if the receiving end has been dropped.
    pub fn try_send(
        &self,
        event: CompositionEvent,
    ) -> Result<(), SendError<(Span, CompositionEvent)>> {
        self.0.send((Span::current(), event))
    }

    /// Returns true if the receiving end has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

impl Clone for CompositionSender {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl fmt::Debug for CompositionSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionSender")
            .field("closed", &self.is_closed())
            .finish()
    }
}
