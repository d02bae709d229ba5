//! Tests for feeding the window through its event queue

use hfm_core::composition::{CompositionEvent, LoadOutcome, SlotKind, channel};
use hfm_core::diagnostics::IssuesForFile;

use super::{Harness, assert_calls, live_generation};

#[test]
fn pump_handles_events_in_arrival_order() {
    let mut h = Harness::new();
    let (tx, mut rx) = channel();
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("src/Main.hs"))));
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("README"))));
    tx.send(CompositionEvent::SelectionChanged(None));

    assert_eq!(h.window.pump(&mut rx), 3);
    assert_calls(
        &h.log.take(),
        &[
            "construct text-editor #1 for Main.hs",
            "construct playground #2 for Main.hs",
            "layout",
            "teardown editor #1 for Main.hs",
            "teardown playground #2 for Main.hs",
            "construct text-editor #3 for README",
            "layout",
            "teardown editor #3 for README",
            "layout",
        ],
    );
    assert_eq!(h.window.pump(&mut rx), 0);
}

#[test]
fn events_posted_by_a_handler_run_after_it() {
    let mut h = Harness::new();
    let (tx, mut rx) = channel();
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("src/Util.hs"))));
    h.window.pump(&mut rx);
    h.log.take();

    // A factory completing its load posts back through the same queue.
    let ticket = h.window.factory().last_ticket(SlotKind::Editor).unwrap();
    tx.send(CompositionEvent::LoadCompleted {
        ticket,
        outcome: LoadOutcome::Loaded,
    });
    tx.send(CompositionEvent::ModuleLoaded(h.id("src/Util.hs")));
    tx.send(CompositionEvent::IssuesReported(IssuesForFile::new("src/Util.hs")));

    assert_eq!(h.window.pump(&mut rx), 3);
    assert_calls(
        &h.log.take(),
        &[
            "notify editor #1: content loaded",
            "notify editor #1: module loaded",
            "notify playground #2: module loaded",
            "notify editor #1: 0 issue(s)",
        ],
    );
}

#[test]
fn window_closed_stops_further_handling() {
    let mut h = Harness::new();
    let (tx, mut rx) = channel();
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("src/Main.hs"))));
    tx.send(CompositionEvent::WindowClosed);
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("README"))));
    tx.send(CompositionEvent::RefreshOutlineView);

    assert_eq!(h.window.pump(&mut rx), 4);
    assert!(h.window.is_torn_down());
    assert_eq!(h.log.count(|call| call.is_construct()), 2);
    assert_eq!(h.log.count(|call| call.is_teardown()), 2);
    assert!(h.window.active_panes().is_empty());
}

#[test]
fn playground_toggle_through_the_queue() {
    let mut h = Harness::new();
    let (tx, mut rx) = channel();
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("src/Main.hs"))));
    tx.send(CompositionEvent::PlaygroundEnabled(false));
    tx.send(CompositionEvent::OutlineModelChanged);

    h.window.pump(&mut rx);
    assert!(!h.window.playground_enabled());
    assert_eq!(live_generation(&h.window, SlotKind::Editor), Some(1));
    assert_eq!(live_generation(&h.window, SlotKind::Playground), None);
}

#[test]
fn send_after_the_window_is_gone_is_ignored() {
    let (tx, rx) = channel();
    drop(rx);
    assert!(tx.is_closed());
    tx.send(CompositionEvent::WindowClosed);
    assert!(tx.try_send(CompositionEvent::WindowClosed).is_err());
}

#[tokio::test]
async fn run_drains_the_queue_until_senders_are_dropped() {
    let mut h = Harness::new();
    let (tx, rx) = channel();
    let other = tx.clone();
    tx.send(CompositionEvent::SelectionChanged(Some(h.id("logo.png"))));
    other.send(CompositionEvent::RefreshOutlineView);
    drop(tx);
    drop(other);

    h.window.run(rx).await;
    assert_calls(
        &h.log.take(),
        &[
            "construct image-viewer #1 for logo.png",
            "layout",
            "outline reloaded (6 rows)",
        ],
    );
}
