//! Heuristic sentence segmenter
//!
//! A sentence opens at an uppercase letter or a double quote and runs to the
//! first terminator (`.`, `!`, `?`) that is followed by end of text, a line
//! break, or whitespace (optionally after one closing quote). Terminators
//! followed by anything else are inner punctuation: "3.14", "U.S.A", "?!".
//! A period after a known abbreviation is also inner. One trailing quote is
//! kept with the sentence. End of text closes an unterminated sentence.
//!
//! The scan is a single forward pass with at most two characters of
//! lookahead, so it runs in linear time on any input.

use crate::abbreviation::AbbreviationTable;
use crate::charclass::CharTable;
use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::types::SentenceSpan;

/// Sentence segmenter
///
/// Cheap to share: segmenting borrows the segmenter immutably, so one
/// instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    chars: CharTable,
    abbreviations: AbbreviationTable,
}

impl Segmenter {
    /// Segmenter with ASCII start class and the built-in abbreviations
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configuration
    pub fn with_config(config: &SegmenterConfig) -> Result<Self> {
        Ok(Self {
            chars: CharTable::new(config.start_class),
            abbreviations: config.abbreviation_table()?,
        })
    }

    /// Lazily segment `text`, left to right
    pub fn segment<'s, 't>(&'s self, text: &'t str) -> Sentences<'s, 't> {
        Sentences {
            segmenter: self,
            text,
            pos: 0,
        }
    }

    /// Collect the sentences of `text` as string slices
    pub fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.segment(text).map(|span| span.as_str()).collect()
    }

    /// Byte offset just past the sentence opening at `start`
    ///
    /// `start` must point at a sentence-start character.
    fn sentence_end(&self, text: &str, start: usize) -> usize {
        let mut chars = text[start..].char_indices();
        chars.next();

        for (offset, ch) in chars {
            if !self.chars.is_terminator(ch) {
                continue;
            }
            let at = start + offset;
            let after = at + ch.len_utf8();
            if self.is_final(text, start, at, ch) {
                return match char_at(text, after) {
                    Some(quote) if self.chars.is_quote(quote) => after + quote.len_utf8(),
                    _ => after,
                };
            }
        }

        text.len()
    }

    /// Whether the terminator `ch` at byte `at` closes the sentence
    fn is_final(&self, text: &str, start: usize, at: usize, ch: char) -> bool {
        let after = at + ch.len_utf8();
        let followed_by_break = match char_at(text, after) {
            None => true,
            Some(next) if self.chars.is_space(next) || self.chars.is_line_break(next) => true,
            Some(next) if self.chars.is_quote(next) => {
                matches!(char_at(text, after + next.len_utf8()), Some(c) if self.chars.is_space(c))
            }
            Some(_) => false,
        };

        followed_by_break
            && !(ch == '.' && self.abbreviations.ends_with_abbreviation(&text[start..at]))
    }
}

#[inline]
fn char_at(text: &str, idx: usize) -> Option<char> {
    text.get(idx..).and_then(|rest| rest.chars().next())
}

/// Iterator over the sentences of one text
///
/// Produced by [`Segmenter::segment`]. Every call to `next` consumes at
/// least one character, so iteration always terminates.
#[derive(Debug, Clone)]
pub struct Sentences<'s, 't> {
    segmenter: &'s Segmenter,
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for Sentences<'_, 't> {
    type Item = SentenceSpan<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let chars = &self.segmenter.chars;
        let rest = &self.text[self.pos..];

        let Some(offset) = rest
            .char_indices()
            .find(|&(_, ch)| chars.starts_sentence(ch))
            .map(|(idx, _)| idx)
        else {
            self.pos = self.text.len();
            return None;
        };

        let start = self.pos + offset;
        let end = self.segmenter.sentence_end(self.text, start);
        self.pos = end;

        let trimmed = self.text[start..end]
            .trim_end_matches(|ch: char| chars.is_space(ch) || chars.is_line_break(ch));
        Some(SentenceSpan::new(self.text, start, start + trimmed.len()))
    }
}

impl std::iter::FusedIterator for Sentences<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::StartClass;

    fn split(text: &str) -> Vec<&str> {
        Segmenter::new().split(text)
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            split("This is one. This is two!"),
            vec!["This is one.", "This is two!"]
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(split("").is_empty());
        assert!(split("   \t ").is_empty());
    }

    #[test]
    fn test_no_start_character() {
        assert!(split("all lowercase. no capitals here!").is_empty());
    }

    #[test]
    fn test_end_of_text_closes_sentence() {
        assert_eq!(split("No terminator here"), vec!["No terminator here"]);
        assert_eq!(
            split("First one. Then a fragment   "),
            vec!["First one.", "Then a fragment"]
        );
    }

    #[test]
    fn test_abbreviation_tolerance() {
        assert_eq!(
            split("Dr. Smith lives here. He left."),
            vec!["Dr. Smith lives here.", "He left."]
        );
    }

    #[test]
    fn test_unknown_abbreviation_splits() {
        assert_eq!(
            split("Apples, pears etc. Many fruits."),
            vec!["Apples, pears etc.", "Many fruits."]
        );
    }

    #[test]
    fn test_disabled_abbreviations() {
        let config = SegmenterConfig::builder().no_abbreviations().build();
        let segmenter = Segmenter::with_config(&config).unwrap();
        assert_eq!(
            segmenter.split("Dr. Smith lives here."),
            vec!["Dr.", "Smith lives here."]
        );
    }

    #[test]
    fn test_inner_punctuation() {
        assert_eq!(
            split("Pi is 3.14 roughly. See www.example.org now."),
            vec!["Pi is 3.14 roughly.", "See www.example.org now."]
        );
        // "is large." has no start character and is dropped
        assert_eq!(split("The U.S.A. is large."), vec!["The U.S.A."]);
    }

    #[test]
    fn test_consecutive_terminators() {
        assert_eq!(split("Really?! Yes."), vec!["Really?!", "Yes."]);
        assert_eq!(split("Wait... What?"), vec!["Wait...", "What?"]);
    }

    #[test]
    fn test_closing_quote_kept() {
        assert_eq!(
            split("He said \"Go home.\" Then he left."),
            vec!["He said \"Go home.\"", "Then he left."]
        );
        assert_eq!(
            split("It's 'done.' Over."),
            vec!["It's 'done.'", "Over."]
        );
    }

    #[test]
    fn test_quote_starts_sentence() {
        assert_eq!(
            split("\"Stop!\" she shouted. Nobody moved."),
            vec!["\"Stop!\"", "Nobody moved."]
        );
    }

    #[test]
    fn test_quote_then_end_of_text() {
        assert_eq!(split("He said \"yes.\""), vec!["He said \"yes.\""]);
    }

    #[test]
    fn test_lowercase_fragments_skipped() {
        assert_eq!(
            split("and so on. * item one. Real sentence here."),
            vec!["Real sentence here."]
        );
    }

    #[test]
    fn test_line_break_ends_sentence() {
        assert_eq!(split("First.\nSecond."), vec!["First.", "Second."]);
        assert_eq!(split("First.\u{2028}Second."), vec!["First.", "Second."]);
    }

    #[test]
    fn test_trailing_line_breaks_trimmed() {
        assert_eq!(split("Hello there\u{2028}"), vec!["Hello there"]);
        assert_eq!(split("Hello there\u{0085}\u{2029}"), vec!["Hello there"]);
        assert_eq!(split("Hello there \r\n"), vec!["Hello there"]);
    }

    #[test]
    fn test_non_breaking_space_is_not_whitespace() {
        assert_eq!(split("End.\u{00A0}Next."), vec!["End.\u{00A0}Next."]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "  One here.  Two there? ";
        let spans: Vec<_> = Segmenter::new().segment(text).collect();

        assert_eq!(spans.len(), 2);
        for span in &spans {
            assert_eq!(&text[span.start()..span.end()], span.as_str());
        }
        assert_eq!(spans[0].start(), 2);
        assert_eq!(spans[1].as_str(), "Two there?");
    }

    #[test]
    fn test_unicode_start_class() {
        let config = SegmenterConfig::builder()
            .start_class(StartClass::Unicode)
            .build();
        let segmenter = Segmenter::with_config(&config).unwrap();

        assert_eq!(
            segmenter.split("Émile arrived. Élodie left."),
            vec!["Émile arrived.", "Élodie left."]
        );
        assert!(split("Émile arrived.").is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            split("Tokyo (東京) is big. Zürich is not!"),
            vec!["Tokyo (東京) is big.", "Zürich is not!"]
        );
    }

    #[test]
    fn test_iterator_is_fused() {
        let segmenter = Segmenter::new();
        let mut sentences = segmenter.segment("Only one.");
        assert!(sentences.next().is_some());
        assert!(sentences.next().is_none());
        assert!(sentences.next().is_none());
    }
}
