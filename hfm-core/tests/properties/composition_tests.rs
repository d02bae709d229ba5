//! Property-based tests for selection-driven composition
//!
//! Random sequences of outline notifications must keep the slots, the call
//! log and the split layout consistent with each other.

use std::collections::HashSet;

use hfm_core::composition::{
    CallLog, ConstructionError, LifecycleCall, LoadOutcome, LoadTicket, RecordingFactory,
    RecordingLayout, SelectionCompositionController, SlotKind,
};
use hfm_core::outline::{ItemId, ItemKind, OutlineModel, ProjectOutline, SharedOutline};
use proptest::prelude::*;

const DEMO: &str = r#"
[[items]]
path = "demo.cabal"

[[items]]
name = "src"
children = [{ path = "src/Main.hs" }, { path = "src/Util.hs" }, { path = "src/Data.hs" }]

[[items]]
path = "README"

[[items]]
path = "logo.png"
"#;

type Window = SelectionCompositionController<SharedOutline, RecordingFactory, RecordingLayout>;

// ============================================================================
// Test Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Select(usize),
    Deselect,
    Playground(bool),
    Remove(usize),
    Rename(usize),
    MakeText(usize),
    Refresh,
    ModuleLoaded(usize),
    FailEditor(usize),
    Complete {
        slot: SlotKind,
        current: bool,
        failed: bool,
    },
}

fn slot_strategy() -> impl Strategy<Value = SlotKind> {
    prop_oneof![Just(SlotKind::Editor), Just(SlotKind::Playground)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0usize..16).prop_map(Op::Select),
        2 => Just(Op::Deselect),
        1 => any::<bool>().prop_map(Op::Playground),
        1 => (0usize..16).prop_map(Op::Remove),
        1 => (0usize..16).prop_map(Op::Rename),
        1 => (0usize..16).prop_map(Op::MakeText),
        1 => Just(Op::Refresh),
        1 => (0usize..16).prop_map(Op::ModuleLoaded),
        1 => (0usize..16).prop_map(Op::FailEditor),
        2 => (slot_strategy(), any::<bool>(), any::<bool>())
            .prop_map(|(slot, current, failed)| Op::Complete { slot, current, failed }),
    ]
}

fn window() -> (Window, SharedOutline, CallLog, Vec<ItemId>) {
    let outline = SharedOutline::new(ProjectOutline::from_toml_str(DEMO).unwrap());
    let ids = outline.rows().iter().map(|row| row.id).collect();
    let log = CallLog::new();
    let window = SelectionCompositionController::new(
        outline.clone(),
        RecordingFactory::new(log.clone()),
        RecordingLayout::new(log.clone()),
    );
    (window, outline, log, ids)
}

/// Applies `op` and returns how many layout notifications it must cause at
/// most and at least.
fn apply(window: &mut Window, outline: &SharedOutline, ids: &[ItemId], op: &Op) -> (usize, usize) {
    let pick = |n: usize| ids[n % ids.len()];
    match op {
        Op::Select(n) => {
            window.on_selection_changed(Some(pick(*n)));
            (1, 1)
        }
        Op::Deselect => {
            window.on_selection_changed(None);
            (1, 1)
        }
        Op::Playground(enabled) => {
            window.set_playground_enabled(*enabled);
            (1, 1)
        }
        Op::Remove(n) => {
            let _ = outline.update(|o| o.remove_item(pick(*n)));
            window.on_outline_model_changed();
            (1, 1)
        }
        Op::Rename(n) => {
            let _ = outline.update(|o| o.rename_item(pick(*n), format!("Renamed{n}.hs")));
            window.on_outline_model_changed();
            (1, 1)
        }
        Op::MakeText(n) => {
            let _ = outline.update(|o| o.set_kind(pick(*n), ItemKind::Text));
            window.on_outline_model_changed();
            (1, 1)
        }
        Op::Refresh => {
            window.refresh_outline_view();
            (0, 1)
        }
        Op::ModuleLoaded(n) => {
            window.on_module_loaded(pick(*n));
            (0, 0)
        }
        Op::FailEditor(n) => {
            window.factory_mut().fail_editor_for(pick(*n));
            (0, 0)
        }
        Op::Complete {
            slot,
            current,
            failed,
        } => {
            let ticket = if *current {
                window
                    .factory()
                    .last_ticket(*slot)
                    .unwrap_or(LoadTicket::new(*slot, 0))
            } else {
                LoadTicket::new(*slot, 0)
            };
            let outcome = if *failed {
                LoadOutcome::Failed(ConstructionError::Failed("load failed".to_string()))
            } else {
                LoadOutcome::Loaded
            };
            window.on_load_completed(ticket, outcome);
            (0, 1)
        }
    }
}

fn live_count(window: &Window) -> usize {
    let panes = window.active_panes();
    usize::from(panes.editor.is_some()) + usize::from(panes.playground.is_some())
}

fn check_consistency(window: &Window, log: &CallLog) -> Result<(), TestCaseError> {
    let constructs = log.count(LifecycleCall::is_construct);
    let teardowns = log.count(LifecycleCall::is_teardown);
    prop_assert_eq!(constructs - teardowns, live_count(window));

    let panes = window.active_panes();
    if let Some(last) = window.layout().last() {
        prop_assert_eq!(last, panes);
    }
    for pane in [panes.editor, panes.playground].into_iter().flatten() {
        prop_assert_eq!(Some(pane.item), window.selection());
    }
    if panes.playground.is_some() {
        prop_assert!(window.playground_enabled());
        prop_assert_eq!(
            window.selected_item().map(|item| item.kind),
            Some(ItemKind::Module)
        );
    }
    if let Some(editor) = window.editor() {
        prop_assert!(!editor.is_torn_down());
    }
    Ok(())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Live controllers, the call log and the layout always agree.
    #[test]
    fn slots_log_and_layout_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (mut window, outline, log, ids) = window();
        for op in &ops {
            let before = window.layout().notifications();
            let (at_least, at_most) = apply(&mut window, &outline, &ids, op);
            let notified = window.layout().notifications() - before;
            prop_assert!(
                (at_least..=at_most).contains(&notified),
                "{:?} caused {} layout notifications",
                op,
                notified
            );
            check_consistency(&window, &log)?;
        }
    }

    /// No controller is torn down twice, and each teardown follows its construction.
    #[test]
    fn every_controller_is_torn_down_at_most_once(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (mut window, outline, log, ids) = window();
        for op in &ops {
            apply(&mut window, &outline, &ids, op);
        }
        window.teardown();

        let mut built = HashSet::new();
        let mut released = HashSet::new();
        for call in log.snapshot() {
            match call {
                LifecycleCall::Construct { generation, .. } => {
                    prop_assert!(built.insert(generation));
                }
                LifecycleCall::Teardown { generation, .. } => {
                    prop_assert!(built.contains(&generation));
                    prop_assert!(released.insert(generation));
                }
                _ => {}
            }
        }
        prop_assert_eq!(built, released);
        prop_assert!(window.active_panes().is_empty());
    }

    /// Within one event, every teardown happens before any construction.
    #[test]
    fn teardowns_precede_constructions(ops in prop::collection::vec(op_strategy(), 1..30)) {
        let (mut window, outline, log, ids) = window();
        for op in &ops {
            log.take();
            apply(&mut window, &outline, &ids, op);
            let calls = log.take();
            if let Some(first_construct) = calls.iter().position(LifecycleCall::is_construct) {
                prop_assert!(!calls[first_construct..].iter().any(LifecycleCall::is_teardown));
            }
        }
    }

    /// Selecting the same item twice in a row builds nothing the second time.
    #[test]
    fn reselection_is_idempotent(
        ops in prop::collection::vec(op_strategy(), 0..20),
        pick in 0usize..16,
    ) {
        let (mut window, outline, log, ids) = window();
        for op in &ops {
            apply(&mut window, &outline, &ids, op);
        }
        let id = ids[pick % ids.len()];
        window.on_selection_changed(Some(id));
        let panes = window.active_panes();
        let generation = window.generation();
        log.take();

        window.on_selection_changed(Some(id));
        let calls = log.take();
        prop_assert_eq!(calls.len(), 1);
        prop_assert!(calls[0].is_layout());
        prop_assert_eq!(window.active_panes(), panes);
        prop_assert_eq!(window.generation(), generation);
    }
}
