//! Shared harness for the integration tests

mod event_queue_tests;
mod selection_scenarios;

use hfm_core::composition::{
    CallLog, LifecycleCall, RecordingFactory, RecordingLayout, RecordingOutlineView,
    SelectionCompositionController, SlotKind,
};
use hfm_core::outline::{ItemId, ProjectOutline, SharedOutline};

pub type Window = SelectionCompositionController<SharedOutline, RecordingFactory, RecordingLayout>;

pub const DEMO: &str = r#"
name = "demo"

[[items]]
path = "demo.cabal"

[[items]]
name = "src"
children = [{ path = "src/Main.hs" }, { path = "src/Util.hs" }]

[[items]]
path = "README"

[[items]]
path = "logo.png"
"#;

/// A window over the demo project plus handles to poke at it.
pub struct Harness {
    pub outline: SharedOutline,
    pub log: CallLog,
    pub window: Window,
}

impl Harness {
    pub fn new() -> Self {
        let outline = SharedOutline::new(ProjectOutline::from_toml_str(DEMO).unwrap());
        let log = CallLog::new();
        let window = SelectionCompositionController::new(
            outline.clone(),
            RecordingFactory::new(log.clone()),
            RecordingLayout::new(log.clone()),
        )
        .with_outline_view(Box::new(RecordingOutlineView::new(log.clone())));
        Self {
            outline,
            log,
            window,
        }
    }

    pub fn id(&self, query: &str) -> ItemId {
        self.outline
            .read()
            .lookup(query)
            .expect(&format!("no item {query} in the demo project"))
    }

    pub fn select(&mut self, query: &str) {
        let id = self.id(query);
        self.window.on_selection_changed(Some(id));
    }

    /// Takes the log as display strings.
    pub fn lines(&self) -> Vec<String> {
        self.log.take().iter().map(ToString::to_string).collect()
    }
}

/// Asserts the call log matches `expected`, ignoring layout details.
pub fn assert_calls(calls: &[LifecycleCall], expected: &[&str]) {
    let actual: Vec<String> = calls
        .iter()
        .map(|call| match call {
            LifecycleCall::Layout(_) => "layout".to_string(),
            other => other.to_string(),
        })
        .collect();
    assert_eq!(actual, expected);
}

/// Generation of the live controller in `slot`, if any.
pub fn live_generation(window: &Window, slot: SlotKind) -> Option<u64> {
    let panes = window.active_panes();
    match slot {
        SlotKind::Editor => panes.editor,
        SlotKind::Playground => panes.playground,
    }
    .map(|pane| pane.id.get())
}
