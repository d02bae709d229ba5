//! `HfM` Core Library
//!
//! This crate provides the core of the `HfM` project window: the project
//! outline, selection-driven composition of editor and playground views,
//! compiler diagnostics and playground bookkeeping.
//!
//! # Crate Structure
//!
//! - [`outline`] - Project items, the outline model and TOML fixtures
//! - [`composition`] - `SelectionCompositionController` and its collaborator traits
//! - [`diagnostics`] - Compiler issues and message parsing
//! - [`highlighting`] - Token map for syntax highlighting with incremental updates
//! - [`playground`] - Playground command scanning and result storage
//! - [`config`] - Preferences and their persistence
//! - [`tracing`] - Structured logging setup
//! - [`error`] - Crate-level error types

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod composition;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod highlighting;
pub mod outline;
pub mod playground;
pub mod tracing;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports used by the CLI and the integration tests. Modular paths
// (e.g. `hfm_core::outline::ItemId`) work as well.
// =============================================================================

pub use composition::{
    ActivePanes, CallLog, CompositionEvent, CompositionReceiver, CompositionSender,
    ConstructionError, ControllerId, EditorController, LifecycleCall, LoadOutcome, LoadTicket,
    Notification, OutlineObserver, OutlineView, PaneKind, PaneRef, PlaygroundController,
    RecordingEditor, RecordingFactory, RecordingLayout, RecordingOutlineView, RecordingPlayground,
    SelectionCompositionController, Slot, SlotKey, SlotKind, SlotState, SplitLayoutCoordinator,
    StaleSelectionError, ViewControllerFactory,
};
pub use config::{ConfigManager, Preferences};
pub use diagnostics::{
    DiagnosticsError, Issue, IssuesForFile, Severity, SrcLoc, SrcSpan, parse_compiler_messages,
};
pub use error::{ConfigError, ConfigResult, HfmError, HfmResult};
pub use highlighting::{
    HaskellTokenizer, HighlightingToken, LineTokenMap, TokenKind, TokenSpan, Tokenizer,
};
pub use outline::{
    EditorKind, ItemId, ItemKind, OutlineError, OutlineFixture, OutlineModel, OutlineRow,
    ProjectItem, ProjectOutline, SelectedItem, SharedOutline,
};
pub use playground::{Command, EvalResult, PlaygroundCommands, ResultStorage, Status};
pub use tracing::{
    TracingConfig, TracingError, TracingLevel, TracingOutput, init_tracing,
    is_tracing_initialized,
};
