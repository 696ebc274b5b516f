//! Document source over an XML dump
//!
//! Pages are cut out of the stream line by line without a full XML parse:
//! a page starts at the first `<page>` and ends at the next `</page>`.
//! Several pages may share a line. Everything outside pages (the `<siteinfo>` header, the root element)
//! is ignored. Only one page is held in memory at a time.

use crate::error::{EngineError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const PAGE_OPEN: &str = "<page>";
const PAGE_CLOSE: &str = "</page>";

/// Raw XML of one `<page>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    xml: String,
}

impl RawDocument {
    /// Wrap the XML of one page
    pub fn new<S: Into<String>>(xml: S) -> Self {
        Self { xml: xml.into() }
    }

    /// The page XML as read
    pub fn as_xml(&self) -> &str {
        &self.xml
    }

    /// Content of the `<ns>` element, if the page declares one
    pub fn namespace(&self) -> Option<&str> {
        self.element_text("ns")
    }

    /// Content of the first `<id>` element (the page id; revision ids
    /// come later in the page)
    pub fn id(&self) -> Option<&str> {
        self.element_text("id").map(str::trim)
    }

    /// Content of the `<title>` element, still entity-encoded
    pub fn title(&self) -> Option<&str> {
        self.element_text("title")
    }

    /// Content of the `<text>` element, still entity-encoded
    ///
    /// The element usually carries attributes; a self-closing
    /// `<text ... />` yields an empty body.
    pub fn body(&self) -> Option<&str> {
        let open = find_tag_open(&self.xml, "text")?;
        let rest = &self.xml[open..];
        let close = rest.find('>')?;
        if rest[..close].ends_with('/') {
            return Some("");
        }
        let content = &rest[close + 1..];
        let end = content.find("</text>")?;
        Some(&content[..end])
    }

    fn element_text(&self, tag: &str) -> Option<&str> {
        let open = format!("<{tag}>");
        let close = format!("</{tag}>");
        let start = self.xml.find(&open)? + open.len();
        let end = self.xml[start..].find(&close)?;
        Some(&self.xml[start..start + end])
    }
}

/// Byte offset of `<tag` followed by whitespace, `>` or `/`
fn find_tag_open(xml: &str, tag: &str) -> Option<usize> {
    let needle = format!("<{tag}");
    let mut from = 0;
    while let Some(idx) = xml[from..].find(&needle) {
        let at = from + idx;
        let after = at + needle.len();
        match xml[after..].chars().next() {
            Some(ch) if ch == '>' || ch == '/' || ch.is_whitespace() => return Some(at),
            Some(_) => from = after,
            None => return None,
        }
    }
    None
}

/// Forward-only sequence of raw documents
///
/// Any iterator of `Result<RawDocument>` is a source, so tests can feed a
/// `Vec` directly.
pub trait DocumentSource: Iterator<Item = Result<RawDocument>> {}

impl<I: Iterator<Item = Result<RawDocument>>> DocumentSource for I {}

/// Streaming reader yielding one [`RawDocument`] per page
///
/// The iterator is fused: after the end of input or the first error it
/// yields `None`.
#[derive(Debug)]
pub struct DumpReader<R> {
    reader: R,
    line: String,
    pending: String,
    pages_read: u64,
    done: bool,
}

impl DumpReader<BufReader<File>> {
    /// Open a dump file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            EngineError::SourceRead(format!("failed to open {}: {e}", path.display()))
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> DumpReader<R> {
    /// Read pages from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pending: String::new(),
            pages_read: 0,
            done: false,
        }
    }

    /// Number of complete pages produced so far
    pub fn pages_read(&self) -> u64 {
        self.pages_read
    }

    fn read_page(&mut self) -> Result<Option<RawDocument>> {
        let mut page: Option<String> = None;

        loop {
            if self.pending.is_empty() {
                self.line.clear();
                let read = self.reader.read_line(&mut self.line).map_err(|e| {
                    EngineError::SourceRead(format!(
                        "I/O error after {} pages: {e}",
                        self.pages_read
                    ))
                })?;

                if read == 0 {
                    return match page {
                        None => Ok(None),
                        Some(_) => Err(EngineError::SourceRead(format!(
                            "truncated page after {} complete pages",
                            self.pages_read
                        ))),
                    };
                }
            } else {
                // Rest of a line whose earlier part closed a page
                std::mem::swap(&mut self.line, &mut self.pending);
                self.pending.clear();
            }

            let start = match page {
                Some(_) => 0,
                None => match self.line.find(PAGE_OPEN) {
                    Some(idx) => idx,
                    None => continue,
                },
            };
            let buffer = page.get_or_insert_with(String::new);

            match self.line[start..].find(PAGE_CLOSE) {
                Some(idx) => {
                    let end = start + idx + PAGE_CLOSE.len();
                    buffer.push_str(&self.line[start..end]);
                    if let Some(next) = self.line[end..].find(PAGE_OPEN) {
                        self.pending.push_str(&self.line[end + next..]);
                    }
                    self.pages_read += 1;
                    return Ok(Some(RawDocument::new(std::mem::take(buffer))));
                }
                None => buffer.push_str(&self.line[start..]),
            }
        }
    }
}

impl<R: BufRead> Iterator for DumpReader<R> {
    type Item = Result<RawDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_page() {
            Ok(Some(document)) => Some(Ok(document)),
            Ok(None) => {
                log::debug!("end of dump after {} pages", self.pages_read());
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for DumpReader<R> {}
