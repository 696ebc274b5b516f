//! Wiki markup to plain text
//!
//! Best-effort cleaner for article wikitext. Templates, tables, references,
//! media and category links are dropped; internal and external links are
//! replaced by their visible label; emphasis, headings, list markers and
//! remaining HTML tags are stripped. Paragraphs come out one per line.

use super::entities::decode_entities;
use super::{is_redirect, CleanDocument, TextNormalizer, REDIRECT_MARKER};
use crate::error::{EngineError, Result};
use crate::source::RawDocument;
use regex::Regex;
use wikisent_core::DocumentId;

/// Section titles that start the footer of an article
const FOOTER_SECTIONS: &[&str] = &[
    "see also",
    "references",
    "external links",
    "further reading",
    "notes",
    "bibliography",
    "sources",
];

/// Elements dropped together with their content
const DROPPED_ELEMENTS: &[&str] = &[
    "math",
    "gallery",
    "timeline",
    "score",
    "syntaxhighlight",
    "source",
    "pre",
    "imagemap",
    "chem",
];

/// Link namespaces dropped with their (possibly nested) content
const DROPPED_LINK_PREFIXES: &[&str] = &["file:", "image:", "category:"];

#[derive(Debug, Clone)]
struct Patterns {
    comment: Regex,
    footer: Regex,
    self_closing_ref: Regex,
    paired_ref: Regex,
    dropped_element: Regex,
    piped_link: Regex,
    plain_link: Regex,
    labeled_external_link: Regex,
    bare_external_link: Regex,
    emphasis: Regex,
    heading: Regex,
    list_marker: Regex,
    magic_word: Regex,
    tag: Regex,
    blanks: Regex,
}

impl Patterns {
    fn compile() -> Result<Self> {
        let dropped = DROPPED_ELEMENTS.join("|");
        let footer = FOOTER_SECTIONS.join("|");

        Ok(Self {
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            footer: Regex::new(&format!(r"(?mi)^==+[ \t]*(?:{footer})[ \t]*==+[ \t]*$"))?,
            self_closing_ref: Regex::new(r"(?is)<ref\b[^>]*/>")?,
            paired_ref: Regex::new(r"(?is)<ref\b[^>]*>.*?</ref\s*>")?,
            dropped_element: Regex::new(&format!(
                r"(?is)<(?:{dropped})\b[^>]*>.*?</(?:{dropped})\s*>"
            ))?,
            piped_link: Regex::new(r"\[\[[^\[\]|]*\|([^\[\]]*)\]\]")?,
            plain_link: Regex::new(r"\[\[([^\[\]|]*)\]\]")?,
            labeled_external_link: Regex::new(r"\[(?:https?:|ftp:)?//[^\s\]]+[ \t]+([^\]]*)\]")?,
            bare_external_link: Regex::new(r"\[(?:https?:|ftp:)?//[^\s\]]*\]")?,
            emphasis: Regex::new(r"'{2,}")?,
            heading: Regex::new(r"(?m)^=+.*=+[ \t]*$")?,
            list_marker: Regex::new(r"(?m)^[*#:;]+[ \t]*")?,
            magic_word: Regex::new(r"__[A-Z]+__")?,
            tag: Regex::new(r"</?[A-Za-z][^<>]*>")?,
            blanks: Regex::new(r"[ \t]+")?,
        })
    }
}

/// Normalizer for MediaWiki article markup
#[derive(Debug, Clone)]
pub struct WikiTextNormalizer {
    with_title: bool,
    with_footer: bool,
    patterns: Patterns,
}

impl WikiTextNormalizer {
    /// Create a builder (title and footer off)
    pub fn builder() -> WikiTextNormalizerBuilder {
        WikiTextNormalizerBuilder::default()
    }

    /// Whether the title is prepended to the text
    pub fn with_title(&self) -> bool {
        self.with_title
    }

    /// Whether footer sections are kept
    pub fn with_footer(&self) -> bool {
        self.with_footer
    }

    /// Clean one wikitext body (entity-encoded, as stored in the dump)
    pub fn clean(&self, body: &str) -> String {
        let text = decode_entities(body);

        if is_redirect(&text) {
            let target = text.trim_start()[REDIRECT_MARKER.len()..]
                .lines()
                .next()
                .unwrap_or_default();
            let target = self.strip_markup(target);
            return format!("{REDIRECT_MARKER} {}", target.trim());
        }

        let mut text = self.patterns.comment.replace_all(&text, "").into_owned();
        if !self.with_footer {
            if let Some(found) = self.patterns.footer.find(&text) {
                let start = found.start();
                text.truncate(start);
            }
        }

        self.strip_markup(&text)
    }

    fn strip_markup(&self, text: &str) -> String {
        let p = &self.patterns;

        let text = p.self_closing_ref.replace_all(text, "");
        let text = p.paired_ref.replace_all(&text, "");
        let text = p.dropped_element.replace_all(&text, "");
        let text = strip_nested(&text, "{{", "}}");
        let text = strip_nested(&text, "{|", "|}");
        let text = strip_prefixed_links(&text, DROPPED_LINK_PREFIXES);
        let text = p.piped_link.replace_all(&text, "${1}");
        let text = p.plain_link.replace_all(&text, "${1}");
        let text = p.labeled_external_link.replace_all(&text, "${1}");
        let text = p.bare_external_link.replace_all(&text, "");
        let text = p.emphasis.replace_all(&text, "");
        let text = p.heading.replace_all(&text, "");
        let text = p.list_marker.replace_all(&text, "");
        let text = p.magic_word.replace_all(&text, "");
        let text = p.tag.replace_all(&text, "");
        let text = decode_entities(&text);

        let mut out = String::with_capacity(text.len());
        for line in text.lines() {
            let line = p.blanks.replace_all(line, " ");
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }
}

impl TextNormalizer for WikiTextNormalizer {
    fn normalize(&self, document: &RawDocument) -> Result<CleanDocument> {
        let title = document
            .title()
            .map(|t| decode_entities(t).into_owned())
            .unwrap_or_default();

        let id = document.id().ok_or_else(|| EngineError::Normalization {
            id: if title.is_empty() {
                "<unknown>".to_string()
            } else {
                title.clone()
            },
            reason: "missing <id> element".to_string(),
        })?;

        let body = document.body().ok_or_else(|| EngineError::Normalization {
            id: id.to_string(),
            reason: "missing <text> element".to_string(),
        })?;

        let mut text = self.clean(body);
        if self.with_title && !title.is_empty() && !is_redirect(&text) {
            text = if text.is_empty() {
                title.clone()
            } else {
                format!("{title}\n{text}")
            };
        }

        Ok(CleanDocument {
            id: DocumentId::from(id),
            title,
            text,
        })
    }
}

/// Builder for [`WikiTextNormalizer`]
#[derive(Debug, Default)]
pub struct WikiTextNormalizerBuilder {
    with_title: bool,
    with_footer: bool,
}

impl WikiTextNormalizerBuilder {
    /// Prepend the article title as its own paragraph
    pub fn with_title(mut self, with_title: bool) -> Self {
        self.with_title = with_title;
        self
    }

    /// Keep "See also", "References" and similar trailing sections
    pub fn with_footer(mut self, with_footer: bool) -> Self {
        self.with_footer = with_footer;
        self
    }

    /// Compile the cleaning patterns
    pub fn build(self) -> Result<WikiTextNormalizer> {
        Ok(WikiTextNormalizer {
            with_title: self.with_title,
            with_footer: self.with_footer,
            patterns: Patterns::compile()?,
        })
    }
}

/// Remove `open … close` regions, honouring nesting
///
/// An unclosed region runs to the end of the text.
fn strip_nested(text: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(open) {
            depth += 1;
            rest = &rest[open.len()..];
        } else if depth > 0 && rest.starts_with(close) {
            depth -= 1;
            rest = &rest[close.len()..];
        } else {
            if depth == 0 {
                out.push(ch);
            }
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

/// Remove `[[prefix:…]]` links (prefix matched case-insensitively),
/// including links nested in their captions
fn strip_prefixed_links(text: &str, prefixes: &[&str]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("[[") {
        out.push_str(&rest[..idx]);
        let inner = rest[idx + 2..].trim_start();
        let dropped = prefixes.iter().any(|prefix| {
            inner
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });

        if !dropped {
            out.push_str("[[");
            rest = &rest[idx + 2..];
            continue;
        }

        let mut depth = 1usize;
        let mut tail = &rest[idx + 2..];
        while depth > 0 {
            match (tail.find("[["), tail.find("]]")) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    tail = &tail[o + 2..];
                }
                (_, Some(c)) => {
                    depth -= 1;
                    tail = &tail[c + 2..];
                }
                (_, None) => {
                    tail = "";
                    break;
                }
            }
        }
        rest = tail;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> WikiTextNormalizer {
        WikiTextNormalizer::builder().build().unwrap()
    }

    #[test]
    fn test_links() {
        let n = normalizer();
        assert_eq!(
            n.clean("The [[Greek language|Greek]] word [[anarchy]] is [[bus]]es."),
            "The Greek word anarchy is buses."
        );
        assert_eq!(
            n.clean("See [http://example.org the site] and [http://example.org]."),
            "See the site and ."
        );
    }

    #[test]
    fn test_templates_and_tables() {
        let n = normalizer();
        assert_eq!(
            n.clean("{{Infobox|name={{nowrap|X}}}}Text stays.\n{|\n| cell\n|}\nMore."),
            "Text stays.\nMore."
        );
    }

    #[test]
    fn test_refs_comments_and_tags() {
        let n = normalizer();
        assert_eq!(
            n.clean("Fact.&lt;ref name=\"a\"&gt;Source&lt;/ref&gt; Other&lt;ref name=\"b\"/&gt;. &lt;!-- hidden --&gt;&lt;b&gt;Bold&lt;/b&gt; end."),
            "Fact. Other. Bold end."
        );
    }

    #[test]
    fn test_comparisons_survive_tag_stripping() {
        let n = normalizer();
        assert_eq!(
            n.clean("If x &lt; 5 and y &gt; 3 it holds.&lt;br /&gt;"),
            "If x < 5 and y > 3 it holds."
        );
    }

    #[test]
    fn test_media_and_category_links() {
        let n = normalizer();
        assert_eq!(
            n.clean("[[File:Map.png|thumb|A [[map]] of it]]Body text.\n[[Category:Politics]]"),
            "Body text."
        );
        assert_eq!(n.clean("[[image:x.jpg]]Kept."), "Kept.");
    }

    #[test]
    fn test_emphasis_headings_lists() {
        let n = normalizer();
        assert_eq!(
            n.clean("'''Anarchism''' is ''old''.\n== History ==\n* First item.\n# Second item.\n__NOTOC__"),
            "Anarchism is old.\nFirst item.\nSecond item."
        );
    }

    #[test]
    fn test_footer_cut() {
        let text = "Body.\n== See also ==\n* [[Other]]\n== References ==\nRef.";
        assert_eq!(normalizer().clean(text), "Body.");

        let with_footer = WikiTextNormalizer::builder()
            .with_footer(true)
            .build()
            .unwrap();
        assert_eq!(with_footer.clean(text), "Body.\nOther\nRef.");
    }

    #[test]
    fn test_redirect_text() {
        let n = normalizer();
        assert_eq!(
            n.clean("#REDIRECT [[Some Target]] {{R from move}}"),
            "#REDIRECT Some Target"
        );
        assert_eq!(n.clean("#redirect [[Other|x]]"), "#REDIRECT x");
    }

    #[test]
    fn test_dropped_elements() {
        let n = normalizer();
        assert_eq!(
            n.clean("Area is &lt;math&gt;\\pi r^2&lt;/math&gt; big."),
            "Area is big."
        );
    }

    #[test]
    fn test_strip_nested_unbalanced() {
        assert_eq!(strip_nested("a {{b {{c}} d", "{{", "}}"), "a ");
        assert_eq!(strip_nested("a }} b", "{{", "}}"), "a }} b");
    }

    #[test]
    fn test_normalize_document() {
        let doc = RawDocument::new(
            "<page><title>AT&amp;T</title><ns>0</ns><id>99</id>\
             <revision><id>5</id><text xml:space=\"preserve\">'''AT&amp;amp;T''' is a company.</text></revision></page>",
        );
        let clean = normalizer().normalize(&doc).unwrap();

        assert_eq!(clean.id.as_str(), "99");
        assert_eq!(clean.title, "AT&T");
        assert_eq!(clean.text, "AT&T is a company.");

        let titled = WikiTextNormalizer::builder()
            .with_title(true)
            .build()
            .unwrap()
            .normalize(&doc)
            .unwrap();
        assert_eq!(titled.text, "AT&T\nAT&T is a company.");
    }

    #[test]
    fn test_normalize_missing_elements() {
        let no_id = RawDocument::new("<page><title>Lost</title><text>X.</text></page>");
        match normalizer().normalize(&no_id) {
            Err(EngineError::Normalization { id, reason }) => {
                assert_eq!(id, "Lost");
                assert!(reason.contains("<id>"));
            }
            other => panic!("expected normalization error, got {other:?}"),
        }

        let no_text = RawDocument::new("<page><id>3</id></page>");
        match normalizer().normalize(&no_text) {
            Err(EngineError::Normalization { id, reason }) => {
                assert_eq!(id, "3");
                assert!(reason.contains("<text>"));
            }
            other => panic!("expected normalization error, got {other:?}"),
        }
    }
}
