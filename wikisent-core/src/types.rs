//! Data model shared by the segmenter and the extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a document within the archive
///
/// Assigned upstream and carried unchanged to every sentence extracted from
/// the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create an identifier from any string-like value
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Identifier as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One sentence found in a cleaned text
///
/// Borrows the text it was found in. `start..end` is the byte range of the
/// sentence in that text, so `&text[span.start()..span.end()] == span.as_str()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSpan<'a> {
    sentence: &'a str,
    start: usize,
    end: usize,
}

impl<'a> SentenceSpan<'a> {
    /// Span over `text[start..end]`
    ///
    /// # Panics
    /// If the range is out of bounds or not on char boundaries.
    pub fn new(text: &'a str, start: usize, end: usize) -> Self {
        Self {
            sentence: &text[start..end],
            start,
            end,
        }
    }

    /// The sentence text
    pub fn as_str(&self) -> &'a str {
        self.sentence
    }

    /// Byte offset of the first character
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Spans produced by the segmenter are never empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Attach the owning document's id
    pub fn to_record(&self, id: &DocumentId) -> SentenceRecord {
        SentenceRecord::new(id.clone(), self.sentence)
    }
}

impl AsRef<str> for SentenceSpan<'_> {
    fn as_ref(&self) -> &str {
        self.sentence
    }
}

impl fmt::Display for SentenceSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sentence)
    }
}

/// Unit of output: a sentence tied to its source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    /// Source document
    pub id: DocumentId,
    /// Sentence text, internal newlines already collapsed upstream
    pub sentence: String,
}

impl SentenceRecord {
    /// Create a record
    pub fn new<S: Into<String>>(id: DocumentId, sentence: S) -> Self {
        Self {
            id,
            sentence: sentence.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_conversions() {
        assert_eq!(DocumentId::from(42u64).as_str(), "42");
        assert_eq!(DocumentId::from("Q42").to_string(), "Q42");
        assert_eq!(DocumentId::from(String::from("7")), DocumentId::new("7"));
    }

    #[test]
    fn test_span_offsets() {
        let text = "Hi. This is it.";
        let span = SentenceSpan::new(text, 4, text.len());

        assert_eq!(span.as_str(), "This is it.");
        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 15);
        assert_eq!(span.len(), 11);
        assert!(!span.is_empty());
        assert_eq!(&text[span.start()..span.end()], span.as_str());
    }

    #[test]
    fn test_span_to_record() {
        let text = "This is one.";
        let span = SentenceSpan::new(text, 0, text.len());
        let record = span.to_record(&DocumentId::from(42u64));

        assert_eq!(record.id.as_str(), "42");
        assert_eq!(record.sentence, "This is one.");
    }

    #[test]
    fn test_record_serializes_id_as_string() {
        let record = SentenceRecord::new(DocumentId::from(12u64), "Hello.");
        let serialized = toml::to_string(&record).unwrap();

        assert!(serialized.contains("id = \"12\""));
        assert!(serialized.contains("sentence = \"Hello.\""));
    }
}
