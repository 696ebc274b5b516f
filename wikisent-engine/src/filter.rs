//! Namespace filter applied before normalization

use crate::source::RawDocument;

/// Accepts documents by their `<ns>` marker
///
/// A document without a marker is always accepted. A marker whose value is
/// not an integer never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceFilter {
    allowed: Vec<i64>,
}

impl NamespaceFilter {
    /// Main-content namespace (0) only
    pub fn main() -> Self {
        Self::new(vec![0])
    }

    /// Accept the given namespaces
    pub fn new(allowed: Vec<i64>) -> Self {
        Self { allowed }
    }

    /// Whether the document should be processed
    pub fn accepts(&self, document: &RawDocument) -> bool {
        match document.namespace() {
            None => true,
            Some(ns) => ns
                .trim()
                .parse::<i64>()
                .map(|ns| self.allowed.contains(&ns))
                .unwrap_or(false),
        }
    }
}

impl Default for NamespaceFilter {
    fn default() -> Self {
        Self::main()
    }
}
