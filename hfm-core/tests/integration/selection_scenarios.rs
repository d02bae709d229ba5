//! End-to-end selection scenarios over the demo project
//!
//! Each test drives the window through outline notifications and checks the
//! exact sequence of factory, controller and layout calls.

use std::path::PathBuf;

use hfm_core::composition::{
    ActivePanes, ConstructionError, LoadOutcome, LoadTicket, SlotKind, SlotState,
};
use hfm_core::diagnostics::{IssuesForFile, parse_compiler_messages};
use hfm_core::outline::{ItemId, ItemKind};

use super::{Harness, assert_calls, live_generation};

const MAIN_ISSUES: &str = "\
src/Main.hs:3:1: warning: [-Wunused-imports]
    The import of `Data.List' is redundant
src/Main.hs:7:8: error:
    Couldn't match expected type `Int' with actual type `Bool'
";

fn main_issues() -> IssuesForFile {
    parse_compiler_messages(MAIN_ISSUES).remove(0)
}

#[test]
fn module_then_text_then_nothing() {
    let mut h = Harness::new();

    h.select("src/Main.hs");
    assert_calls(
        &h.log.take(),
        &[
            "construct text-editor #1 for Main.hs",
            "construct playground #2 for Main.hs",
            "layout",
        ],
    );
    let panes = h.window.active_panes();
    assert_eq!(panes.editor.unwrap().item, h.id("src/Main.hs"));
    assert!(panes.playground.is_some());

    h.select("README");
    assert_calls(
        &h.log.take(),
        &[
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "construct text-editor #3 for README",
            "layout",
        ],
    );
    assert!(h.window.active_panes().playground.is_none());

    h.window.on_selection_changed(None);
    assert_calls(&h.log.take(), &["teardown editor #3 for README", "layout"]);
    assert!(h.window.active_panes().is_empty());
    assert_eq!(h.window.layout().notifications(), 3);
}

#[test]
fn reselecting_the_same_item_only_notifies_the_layout() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    let before = h.window.active_panes();
    h.log.take();

    h.select("src/Main.hs");
    h.select("src/Main.hs");
    assert_calls(&h.log.take(), &["layout", "layout"]);
    assert_eq!(h.window.active_panes(), before);
    assert_eq!(h.window.generation(), 2);
}

#[test]
fn switching_modules_replaces_both_panes() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.select("src/Util.hs");
    assert_calls(
        &h.log.take(),
        &[
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "construct text-editor #3 for Util.hs",
            "construct playground #4 for Util.hs",
            "layout",
        ],
    );
    assert_eq!(h.window.editor().unwrap().item_name(), "Util.hs");
}

#[test]
fn each_item_kind_gets_its_editor() {
    let mut h = Harness::new();

    h.select("demo.cabal");
    h.select("logo.png");
    h.select("src");
    assert_eq!(
        h.lines(),
        vec![
            "construct header-editor #1 for demo.cabal".to_string(),
            "layout editor=header-editor Controller(1) playground=none".to_string(),
            "teardown editor #1 for demo.cabal".to_string(),
            "construct image-viewer #2 for logo.png".to_string(),
            "layout editor=image-viewer Controller(2) playground=none".to_string(),
            "teardown editor #2 for logo.png".to_string(),
            "layout editor=none playground=none".to_string(),
        ]
    );
    assert_eq!(h.window.editor_state(), SlotState::Empty);
    assert_eq!(h.window.playground_state(), SlotState::Empty);
}

#[test]
fn editor_failure_leaves_the_playground_alone() {
    let mut h = Harness::new();
    let main = h.id("src/Main.hs");
    h.window.factory_mut().fail_editor_for(main);

    h.select("src/Main.hs");
    let calls = h.log.take();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].to_string().starts_with("refuse editor for Main.hs"));
    assert_calls(
        &calls[1..],
        &["construct playground #2 for Main.hs", "layout"],
    );
    let panes = h.window.layout().last().unwrap();
    assert!(panes.editor.is_none());
    assert!(panes.playground.is_some());

    // The failed target is remembered, so nothing is retried.
    h.window.factory_mut().clear_failures();
    h.select("src/Main.hs");
    assert_calls(&h.log.take(), &["layout"]);
    assert!(h.window.editor().is_none());

    h.select("README");
    assert_calls(
        &h.log.take(),
        &[
            "teardown playground #2 for Main.hs",
            "construct text-editor #3 for README",
            "layout",
        ],
    );
}

#[test]
fn declined_playground_leaves_the_slot_empty() {
    let mut h = Harness::new();
    let main = h.id("src/Main.hs");
    h.window.factory_mut().decline_playground_for(main);

    h.select("src/Main.hs");
    assert_calls(
        &h.log.take(),
        &["construct text-editor #1 for Main.hs", "layout"],
    );
    assert_eq!(h.window.playground_state(), SlotState::Empty);
}

#[test]
fn stale_selection_is_a_deselection() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.window.on_selection_changed(Some(ItemId::new()));
    assert_calls(
        &h.log.take(),
        &[
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "layout",
        ],
    );
    assert_eq!(h.window.selection(), None);
}

#[test]
fn removing_the_selected_item_clears_both_panes() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let main = h.id("src/Main.hs");
    h.outline.update(|o| o.remove_item(main)).unwrap();
    h.window.on_outline_model_changed();

    assert_calls(
        &h.log.take(),
        &[
            "outline reloaded (5 rows)",
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "layout",
        ],
    );
    assert!(h.window.active_panes().is_empty());
    assert_eq!(h.window.selection(), None);
}

#[test]
fn unrelated_model_change_keeps_the_panes() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let readme = h.id("README");
    h.outline.update(|o| o.rename_item(readme, "README.md")).unwrap();
    h.window.on_outline_model_changed();

    assert_calls(&h.log.take(), &["outline reloaded (6 rows)", "layout"]);
    assert_eq!(live_generation(&h.window, SlotKind::Editor), Some(1));
}

#[test]
fn renaming_the_selected_item_keeps_its_controllers() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let main = h.id("src/Main.hs");
    h.outline.update(|o| o.rename_item(main, "App.hs")).unwrap();
    h.window.on_outline_model_changed();

    assert_calls(
        &h.log.take(),
        &[
            "notify editor #1: renamed to App.hs",
            "outline reloaded (6 rows)",
            "layout",
        ],
    );
    assert_eq!(h.window.editor().unwrap().item_name(), "App.hs");
    assert_eq!(h.window.selected_item().unwrap().name, "App.hs");
    assert_eq!(
        h.window.selected_item().unwrap().file_path,
        Some(PathBuf::from("src/App.hs"))
    );
}

#[test]
fn changing_the_kind_of_the_selected_item_rebuilds() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let main = h.id("src/Main.hs");
    h.outline.update(|o| o.set_kind(main, ItemKind::Text)).unwrap();
    h.window.on_outline_model_changed();

    assert_calls(
        &h.log.take(),
        &[
            "outline reloaded (6 rows)",
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "construct text-editor #3 for Main.hs",
            "layout",
        ],
    );
}

#[test]
fn refresh_only_reloads_the_outline_view() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.window.refresh_outline_view();
    assert_calls(&h.log.take(), &["outline reloaded (6 rows)"]);
    assert_eq!(live_generation(&h.window, SlotKind::Playground), Some(2));
}

#[test]
fn refresh_deselects_a_vanished_item() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let main = h.id("src/Main.hs");
    h.outline.update(|o| o.remove_item(main)).unwrap();
    h.window.refresh_outline_view();

    assert_calls(
        &h.log.take(),
        &[
            "outline reloaded (5 rows)",
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "layout",
        ],
    );
}

#[test]
fn teardown_releases_editor_then_playground_once() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.window.teardown();
    assert_calls(
        &h.log.take(),
        &[
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "layout",
        ],
    );
    assert!(h.window.is_torn_down());
    assert_eq!(h.window.layout().last(), Some(ActivePanes::NONE));

    h.window.teardown();
    h.select("README");
    h.window.on_outline_model_changed();
    h.window.refresh_outline_view();
    h.window.set_playground_enabled(false);
    assert!(h.log.is_empty());
    assert!(h.window.active_panes().is_empty());
}

#[test]
fn dropping_the_window_tears_down() {
    let mut h = Harness::new();
    let log = h.log.clone();
    h.select("src/Util.hs");
    log.take();

    drop(h);
    assert_calls(
        &log.take(),
        &[
            "teardown editor #1 for Util.hs",
            "teardown playground #2 for Util.hs",
            "layout",
        ],
    );
}

#[test]
fn issues_are_routed_to_the_matching_editor() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.window.on_issues_reported(main_issues());
    assert_calls(&h.log.take(), &["notify editor #1: 2 issue(s)"]);

    h.window
        .on_issues_reported(parse_compiler_messages("src/Util.hs:1:1: error: boom\n").remove(0));
    assert!(h.log.is_empty());
    assert!(h.window.issues_for(&PathBuf::from("src/Util.hs")).is_some());
}

#[test]
fn stored_issues_are_replayed_on_construction() {
    let mut h = Harness::new();
    h.window.on_issues_reported(main_issues());
    assert!(h.log.is_empty());

    h.select("src/Main.hs");
    assert_calls(
        &h.log.take(),
        &[
            "construct text-editor #1 for Main.hs",
            "notify editor #1: 2 issue(s)",
            "construct playground #2 for Main.hs",
            "layout",
        ],
    );
}

#[test]
fn empty_issue_set_clears_stored_issues() {
    let mut h = Harness::new();
    h.window.on_issues_reported(main_issues());
    h.select("src/Main.hs");
    h.log.take();

    h.window.on_issues_reported(IssuesForFile::new("src/Main.hs"));
    assert_calls(&h.log.take(), &["notify editor #1: 0 issue(s)"]);
    assert!(h.window.issues_for(&PathBuf::from("src/Main.hs")).is_none());

    h.select("README");
    h.select("src/Main.hs");
    assert!(
        h.log
            .snapshot()
            .iter()
            .all(|call| !call.to_string().contains("issue(s)"))
    );
}

#[test]
fn clearing_issues_also_drops_sets_reported_under_absolute_paths() {
    let mut h = Harness::new();
    let absolute =
        parse_compiler_messages("/home/u/demo/src/Main.hs:3:1: warning: unused\n").remove(0);
    h.window.on_issues_reported(absolute);
    assert!(h.window.issues_for(&PathBuf::from("src/Main.hs")).is_some());

    h.window.on_issues_reported(IssuesForFile::new("src/Main.hs"));
    assert!(h.window.issues_for(&PathBuf::from("src/Main.hs")).is_none());

    h.select("src/Main.hs");
    assert!(
        h.log
            .take()
            .iter()
            .all(|call| !call.to_string().contains("issue(s)"))
    );
}

#[test]
fn newer_issues_replace_those_stored_under_another_spelling() {
    let mut h = Harness::new();
    h.window.on_issues_reported(
        parse_compiler_messages("/home/u/demo/src/Main.hs:3:1: warning: unused\n").remove(0),
    );
    h.window.on_issues_reported(main_issues());

    let stored = h.window.issues_for(&PathBuf::from("src/Main.hs")).unwrap();
    assert_eq!(stored.file, PathBuf::from("src/Main.hs"));
    assert_eq!(stored.len(), 2);

    h.select("src/Main.hs");
    let lines = h.lines();
    assert_eq!(
        lines.iter().filter(|line| line.contains("issue(s)")).count(),
        1
    );
    assert!(lines.contains(&"notify editor #1: 2 issue(s)".to_string()));
}

#[test]
fn module_loaded_reaches_both_panes_of_that_module() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let (main, util) = (h.id("src/Main.hs"), h.id("src/Util.hs"));
    h.window.on_module_loaded(util);
    assert!(h.log.is_empty());

    h.window.on_module_loaded(main);
    assert_calls(
        &h.log.take(),
        &[
            "notify editor #1: module loaded",
            "notify playground #2: module loaded",
        ],
    );
}

#[test]
fn superseded_load_completions_are_ignored() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.select("src/Util.hs");
    h.log.take();

    h.window.on_load_completed(
        LoadTicket::new(SlotKind::Editor, 1),
        LoadOutcome::Failed(ConstructionError::Failed("too late".to_string())),
    );
    h.window
        .on_load_completed(LoadTicket::new(SlotKind::Playground, 2), LoadOutcome::Loaded);
    assert!(h.log.is_empty());

    let editor_ticket = h.window.factory().last_ticket(SlotKind::Editor).unwrap();
    assert_eq!(editor_ticket.generation, 3);
    h.window.on_load_completed(editor_ticket, LoadOutcome::Loaded);
    assert_calls(&h.log.take(), &["notify editor #3: content loaded"]);
}

#[test]
fn failed_load_empties_only_its_slot() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    let ticket = h.window.factory().last_ticket(SlotKind::Playground).unwrap();
    h.window.on_load_completed(
        ticket,
        LoadOutcome::Failed(ConstructionError::ResourceMissing("src/Main.hs".into())),
    );
    assert_calls(
        &h.log.take(),
        &["teardown playground #2 for Main.hs", "layout"],
    );
    assert_eq!(live_generation(&h.window, SlotKind::Editor), Some(1));
    assert_eq!(h.window.playground_state(), SlotState::Empty);

    // A second completion for the same ticket finds nothing to act on.
    h.window.on_load_completed(ticket, LoadOutcome::Loaded);
    assert!(h.log.is_empty());

    // Reselecting does not retry the failed playground.
    h.select("src/Main.hs");
    assert_calls(&h.log.take(), &["layout"]);
}

#[test]
fn playground_toggle_only_touches_the_playground() {
    let mut h = Harness::new();
    h.select("src/Main.hs");
    h.log.take();

    h.window.set_playground_enabled(false);
    assert_calls(
        &h.log.take(),
        &["teardown playground #2 for Main.hs", "layout"],
    );
    assert!(!h.window.playground_enabled());

    h.select("src/Util.hs");
    assert_calls(
        &h.log.take(),
        &[
            "teardown editor #1 for Main.hs",
            "construct text-editor #3 for Util.hs",
            "layout",
        ],
    );

    h.window.set_playground_enabled(true);
    assert_calls(
        &h.log.take(),
        &["construct playground #4 for Util.hs", "layout"],
    );
    assert_eq!(live_generation(&h.window, SlotKind::Editor), Some(3));
}

#[test]
fn enabling_playgrounds_rechecks_a_removed_selection() {
    let mut h = Harness::new();
    h.window.set_playground_enabled(false);
    h.select("src/Main.hs");
    assert_eq!(h.window.playground_state(), SlotState::Empty);
    h.log.take();

    let main = h.id("src/Main.hs");
    h.outline.update(|o| o.remove_item(main)).unwrap();
    h.window.set_playground_enabled(true);

    assert_calls(&h.log.take(), &["teardown editor #1 for Main.hs", "layout"]);
    assert_eq!(h.window.editor_state(), SlotState::Empty);
    assert_eq!(h.window.playground_state(), SlotState::Empty);
    assert_eq!(h.window.selection(), None);
    assert_eq!(h.window.active_panes(), ActivePanes::NONE);
}
