//! Property-based tests for playground command scanning and result storage

use hfm_core::playground::{PlaygroundCommands, ResultStorage, Status};
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

/// A playground line: a command start, a continuation or a blank line.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9 +*]{0,12}",
        "[ \t]{1,4}[a-z0-9 +*]{0,12}",
        Just(String::new()),
    ]
}

fn source_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..30)
}

fn starts_command(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

proptest! {
    /// There is one command per line starting in column one.
    #[test]
    fn one_command_per_unindented_line(lines in source_strategy()) {
        let commands = PlaygroundCommands::scan(&lines.join("\n"));
        let expected = lines.iter().filter(|line| starts_command(line)).count();
        prop_assert_eq!(commands.len(), expected);
    }

    /// Commands are ordered, disjoint and cover everything from the first command on.
    #[test]
    fn commands_tile_the_source(lines in source_strategy()) {
        let text = lines.join("\n");
        let commands: Vec<_> = PlaygroundCommands::scan(&text).iter().collect();
        for pair in commands.windows(2) {
            prop_assert_eq!(*pair[0].lines.end() + 1, *pair[1].lines.start());
        }
        if let Some(last) = commands.last() {
            prop_assert_eq!(*last.lines.end(), text.lines().count());
        }
        for (index, command) in commands.iter().enumerate() {
            prop_assert_eq!(command.index, index);
            prop_assert!(starts_command(&lines[command.lines.start() - 1]));
            prop_assert!(starts_command(&command.text));
        }
    }

    /// Completing every command in order evaluates the whole playground.
    #[test]
    fn completing_all_commands_in_order(lines in source_strategy()) {
        let mut commands = PlaygroundCommands::scan(&lines.join("\n"));
        let mut completed = 0;
        while let Some(next) = commands.next_pending_command() {
            prop_assert_eq!(next.index, completed);
            prop_assert!(commands.mark_as_completed(&next));
            completed += 1;
        }
        prop_assert_eq!(completed, commands.len());
        if !commands.is_empty() {
            prop_assert!(matches!(commands.status(), Status::LastEvaluated(_)));
        }

        commands.set_all_commands_pending();
        prop_assert_eq!(
            commands.next_pending_command().map(|c| c.index),
            (!commands.is_empty()).then_some(0)
        );
    }

    /// Pruning keeps exactly the results before the pruning point.
    #[test]
    fn prune_keeps_earlier_results(
        reported in prop::collection::vec(0usize..20, 0..20),
        at in 0usize..25,
    ) {
        let mut storage = ResultStorage::new();
        for &index in &reported {
            storage.report_result(format!("value {index}"), "Int", index);
        }
        storage.prune_at(at);
        prop_assert!(storage.len() <= at);
        for &index in &reported {
            prop_assert_eq!(storage.get(index).is_some(), index < at);
        }
    }
}
