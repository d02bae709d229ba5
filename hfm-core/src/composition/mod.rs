//! Selection-driven view composition
//!
//! A project window shows at most one editor and at most one playground,
//! chosen by what is selected in the outline. This module decides which of
//! them exist, builds and tears them down through collaborator traits, and
//! tells the split layout what to show.
//!
//! # Architecture
//!
//! - **Slots**: the controller owns one editor slot and one playground slot,
//!   each holding zero or one live controller
//! - **Keys**: a slot is rebuilt only when its (item, kind, pane) key changes
//! - **Ordering**: all teardowns of an event finish before any construction
//!   starts, and the layout hears about the result exactly once
//! - **Failure containment**: a construction error leaves the slot empty and
//!   is only logged
//!
//! # Module Structure
//!
//! - `types` - Identifiers and descriptors (`ControllerId`, `LoadTicket`, `PaneRef`, `ActivePanes`)
//! - `traits` - Collaborator contracts (`ViewControllerFactory`, `SplitLayoutCoordinator`, ...)
//! - `slot` - Ownership slots (`Slot`, `SlotState`)
//! - `controller` - `SelectionCompositionController`
//! - `events` - Event enum and queue
//! - `recording` - Logging collaborators for headless use and tests
//! - `error` - Error types (`ConstructionError`, `StaleSelectionError`)
//!
//! # Example
//!
//! ```
//! use hfm_core::composition::{
//!     CallLog, RecordingFactory, RecordingLayout, SelectionCompositionController,
//! };
//! use hfm_core::outline::{ItemKind, ProjectOutline, SharedOutline};
//!
//! let mut outline = ProjectOutline::new("demo");
//! let root = outline.root_id();
//! let main = outline
//!     .add_item(root, "Main.hs", ItemKind::Module, Some("Main.hs".into()))
//!     .unwrap();
//!
//! let log = CallLog::new();
//! let mut window = SelectionCompositionController::new(
//!     SharedOutline::new(outline),
//!     RecordingFactory::new(log.clone()),
//!     RecordingLayout::new(log.clone()),
//! );
//!
//! window.on_selection_changed(Some(main));
//! let panes = window.active_panes();
//! assert!(panes.editor.is_some());
//! assert!(panes.playground.is_some());
//!
//! window.on_selection_changed(None);
//! assert!(window.active_panes().is_empty());
//! ```

mod controller;
mod error;
mod events;
pub mod recording;
mod slot;
mod traits;
mod types;

pub use controller::SelectionCompositionController;
pub use error::{ConstructionError, StaleSelectionError};
pub use events::{
    CompositionEvent, CompositionReceiver, CompositionSender, LoadOutcome, channel,
};
pub use recording::{
    CallLog, LifecycleCall, Notification, RecordingEditor, RecordingFactory, RecordingLayout,
    RecordingOutlineView, RecordingPlayground,
};
pub use slot::{Occupant, Slot, SlotState};
pub use traits::{
    EditorController, OutlineObserver, OutlineView, PlaygroundController, SplitLayoutCoordinator,
    ViewControllerFactory,
};
pub use types::{ActivePanes, ControllerId, LoadTicket, PaneKind, PaneRef, SlotKey, SlotKind};
