//! Property tests for the sentence segmenter

use proptest::prelude::*;
use wikisent_core::Segmenter;

/// Text built from the characters the scanner branches on
fn punctuated_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("."),
            Just("!"),
            Just("?"),
            Just("\""),
            Just("'"),
            Just(" "),
            Just("\n"),
            Just("Dr"),
            Just("e.g"),
            Just("Ab"),
            Just("cd"),
            Just("3"),
            Just("É"),
            Just("\u{2028}"),
        ],
        0..64,
    )
    .prop_map(|parts| parts.concat())
}

fn has_start_char(text: &str) -> bool {
    text.chars().any(|ch| ch.is_ascii_uppercase() || ch == '"')
}

proptest! {
    #[test]
    fn spans_are_ordered_and_disjoint(text in punctuated_text()) {
        let segmenter = Segmenter::new();
        let mut last_end = 0;
        for span in segmenter.segment(&text) {
            prop_assert!(span.start() >= last_end);
            prop_assert!(span.end() > span.start());
            prop_assert_eq!(&text[span.start()..span.end()], span.as_str());
            last_end = span.end();
        }
    }

    #[test]
    fn spans_are_trimmed_and_well_started(text in punctuated_text()) {
        let segmenter = Segmenter::new();
        for span in segmenter.segment(&text) {
            let first = span.as_str().chars().next().unwrap();
            prop_assert!(first.is_ascii_uppercase() || first == '"');
            prop_assert!(!span.as_str().ends_with(' '));
            prop_assert!(!span.as_str().ends_with('\n'));
        }
    }

    #[test]
    fn empty_iff_no_start_character(text in punctuated_text()) {
        let segmenter = Segmenter::new();
        let empty = segmenter.segment(&text).next().is_none();
        prop_assert_eq!(empty, !has_start_char(&text));
    }

    #[test]
    fn resegmenting_a_span_returns_it(text in punctuated_text()) {
        let segmenter = Segmenter::new();
        for span in segmenter.segment(&text) {
            let again = segmenter.split(span.as_str());
            prop_assert_eq!(again, vec![span.as_str()]);
        }
    }

    #[test]
    fn terminates_on_arbitrary_input(text in any::<String>()) {
        let segmenter = Segmenter::new();
        let count = segmenter.segment(&text).count();
        prop_assert!(count <= text.len());
    }
}
