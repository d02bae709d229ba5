//! Property-based tests for compiler issues

use hfm_core::diagnostics::{
    Issue, IssuesForFile, Severity, SrcLoc, SrcSpan, max_severity, parse_compiler_messages,
};
use proptest::prelude::*;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Other),
        Just(Severity::Warning),
        Just(Severity::Error),
    ]
}

fn issue_strategy() -> impl Strategy<Value = Issue> {
    (1usize..50, 1usize..80, 1usize..20, severity_strategy(), "[a-z ]{1,20}").prop_map(
        |(line, column, width, severity, message)| Issue {
            span: SrcSpan::new(
                SrcLoc::new("src/Main.hs", line, column).unwrap(),
                1,
                column + width,
            )
            .unwrap(),
            severity,
            message,
        },
    )
}

proptest! {
    /// Issues on a line stay sorted by column and none are lost.
    #[test]
    fn issues_are_kept_sorted_by_column(issues in prop::collection::vec(issue_strategy(), 0..30)) {
        let set = IssuesForFile::from_issues("src/Main.hs", issues.clone());
        prop_assert_eq!(set.len(), issues.len());
        prop_assert_eq!(set.is_empty(), issues.is_empty());
        for line in set.issues.keys() {
            let on_line = set.on_line(*line);
            prop_assert!(!on_line.is_empty());
            prop_assert!(on_line.windows(2).all(|w| w[0].column() <= w[1].column()));
            prop_assert!(on_line.iter().all(|issue| issue.line() == *line));
        }
    }

    /// The severity of a file is the worst of its issues.
    #[test]
    fn file_severity_is_the_maximum(issues in prop::collection::vec(issue_strategy(), 0..30)) {
        let expected = issues.iter().map(|issue| issue.severity).max();
        let set = IssuesForFile::from_issues("src/Main.hs", issues.clone());
        prop_assert_eq!(set.max_severity(), expected);
        prop_assert_eq!(max_severity(&issues), expected);
    }

    /// Every well-formed header in compiler output yields one issue.
    #[test]
    fn parser_finds_every_header(
        headers in prop::collection::vec((1usize..200, 1usize..80, prop_oneof![Just("error"), Just("warning")]), 1..10)
    ) {
        let text: String = headers
            .iter()
            .map(|(line, column, severity)| {
                format!("src/Main.hs:{line}:{column}: {severity}:\n    something is off\n")
            })
            .collect();
        let files = parse_compiler_messages(&text);
        prop_assert_eq!(files.len(), 1);
        prop_assert_eq!(files[0].len(), headers.len());
        let errors = headers.iter().filter(|(_, _, s)| *s == "error").count();
        prop_assert_eq!(
            files[0].iter().filter(|issue| issue.severity == Severity::Error).count(),
            errors
        );
    }

    /// Zero lines or columns are rejected.
    #[test]
    fn zero_positions_are_invalid(line in 0usize..3, column in 0usize..3) {
        let result = SrcLoc::new("A.hs", line, column);
        prop_assert_eq!(result.is_ok(), line > 0 && column > 0);
    }
}
