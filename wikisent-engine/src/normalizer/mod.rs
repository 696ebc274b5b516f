//! Text normalization: raw page XML to cleaned plain text

pub mod entities;
pub mod wiki;

use crate::error::Result;
use crate::source::RawDocument;
use wikisent_core::DocumentId;

pub use entities::decode_entities;
pub use wiki::{WikiTextNormalizer, WikiTextNormalizerBuilder};

/// Prefix marking a document as an alias of another one
pub const REDIRECT_MARKER: &str = "#REDIRECT";

/// One document after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanDocument {
    /// Stable document identifier
    pub id: DocumentId,
    /// Decoded title (may be empty)
    pub title: String,
    /// Plain text; paragraphs may still be separated by newlines
    pub text: String,
}

/// Converts a raw document into plain text
///
/// Implemented for closures so tests and callers can plug in their own
/// conversion.
pub trait TextNormalizer: Send + Sync {
    /// Normalize one document
    fn normalize(&self, document: &RawDocument) -> Result<CleanDocument>;
}

impl<F> TextNormalizer for F
where
    F: Fn(&RawDocument) -> Result<CleanDocument> + Send + Sync,
{
    fn normalize(&self, document: &RawDocument) -> Result<CleanDocument> {
        self(document)
    }
}

/// Whether cleaned text starts with the redirect marker
/// (ASCII case-insensitive, leading whitespace ignored)
pub fn is_redirect(text: &str) -> bool {
    text.trim_start()
        .get(..REDIRECT_MARKER.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(REDIRECT_MARKER))
}

/// Replace every run of line breaks (and the blanks around it) with one space
pub fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(line);
    }
    out
}
