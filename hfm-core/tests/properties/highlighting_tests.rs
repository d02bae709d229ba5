//! Property-based tests for incremental highlighting
//!
//! Updating a token map edit by edit must end in the same map as tokenizing
//! the edited text from scratch.

use hfm_core::highlighting::{HaskellTokenizer, LineTokenMap};
use proptest::prelude::*;

const FRAGMENTS: &[&str] = &[
    "a", "Xs", " ", "\n", "\n", "{-", "-}", "{-#", "-", "{", "}", "--", "\"", "'", "'c'", "12",
    ".", "::", "M.f", "where", "\\",
];

fn text_strategy(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..max).prop_map(|parts| parts.concat())
}

#[derive(Debug, Clone)]
struct Edit {
    at: prop::sample::Index,
    remove: usize,
    insert: String,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    (any::<prop::sample::Index>(), 0usize..8, text_strategy(4)).prop_map(|(at, remove, insert)| {
        Edit { at, remove, insert }
    })
}

proptest! {
    #[test]
    fn edits_match_a_full_retokenize(
        text in text_strategy(40),
        edits in prop::collection::vec(edit_strategy(), 1..6),
    ) {
        let mut text = text;
        let mut map = LineTokenMap::new(&text, &HaskellTokenizer);
        for edit in edits {
            let start = edit.at.index(text.len() + 1);
            let end = (start + edit.remove).min(text.len());
            text.replace_range(start..end, &edit.insert);
            let change = edit.insert.len().cast_signed() - (end - start).cast_signed();

            let touched = map.process_edit(
                &text,
                start..start + edit.insert.len(),
                change,
                &HaskellTokenizer,
            );
            prop_assert!(touched.end <= map.last_line() + 1);
            prop_assert_eq!(&map, &LineTokenMap::new(&text, &HaskellTokenizer), "text: {:?}", text);
        }
    }

    #[test]
    fn every_byte_is_on_exactly_one_line(text in text_strategy(40)) {
        let map = LineTokenMap::new(&text, &HaskellTokenizer);
        prop_assert_eq!(map.last_line(), text.matches('\n').count() + 1);
        for index in 0..text.len() {
            let line = map.line_of(index);
            let start = map.start_of_line(line).unwrap();
            prop_assert!(start <= index && index < map.end_of_line(line));
        }
    }
}
