//! Abbreviation trie for backward word lookup
//!
//! A period that would otherwise close a sentence is kept inside it when the
//! word in front of it is a known abbreviation ("Dr. Smith"). Lookups walk a
//! compact trie over the word and never allocate.

use crate::error::{CoreError, Result};
use std::collections::HashMap;

/// Abbreviations recognised when no explicit list is configured.
///
/// Restricted to forms that almost never end a sentence; "etc", "Inc" or
/// "Jr" are left out on purpose.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Messrs", "Dr", "Prof", "Rev", "Hon", "St", "Mt", "Ft", "Gen", "Col",
    "Maj", "Capt", "Lt", "Sgt", "Cpl", "Adm", "Cmdr", "Gov", "Sen", "Rep", "Pres", "vs", "e.g",
    "i.e", "cf", "ca", "approx", "pp", "vol",
];

/// Compact trie node using array indices instead of pointers
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes: char -> node index
    children: HashMap<char, u32>,
    /// Whether this node marks end of abbreviation
    is_end: bool,
}

/// Case-sensitive abbreviation trie
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    /// All nodes in contiguous storage, root first
    nodes: Vec<TrieNode>,
    len: usize,
}

impl AbbreviationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Build from a list, rejecting malformed entries
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for word in words {
            table.insert(word.as_ref())?;
        }
        Ok(table)
    }

    /// Table holding [`DEFAULT_ABBREVIATIONS`]
    pub fn english() -> Self {
        let mut table = Self::new();
        for word in DEFAULT_ABBREVIATIONS {
            table.insert_unchecked(word);
        }
        table
    }

    /// Insert abbreviation into trie
    ///
    /// Entries are written without their final period and must not contain
    /// whitespace.
    pub fn insert(&mut self, abbreviation: &str) -> Result<()> {
        if abbreviation.is_empty()
            || abbreviation.ends_with('.')
            || abbreviation.chars().any(char::is_whitespace)
        {
            return Err(CoreError::InvalidAbbreviation(abbreviation.to_string()));
        }
        self.insert_unchecked(abbreviation);
        Ok(())
    }

    fn insert_unchecked(&mut self, abbreviation: &str) {
        let mut current_idx = 0u32;

        for ch in abbreviation.chars() {
            let next_idx = match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&child_idx) => child_idx,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current_idx as usize]
                        .children
                        .insert(ch, new_idx);
                    new_idx
                }
            };
            current_idx = next_idx;
        }

        let node = &mut self.nodes[current_idx as usize];
        if !node.is_end {
            node.is_end = true;
            self.len += 1;
        }
    }

    /// Number of distinct abbreviations
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `word` is exactly one of the abbreviations
    pub fn contains(&self, word: &str) -> bool {
        let mut current_idx = 0u32;
        for ch in word.chars() {
            match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&next) => current_idx = next,
                None => return false,
            }
        }
        self.nodes[current_idx as usize].is_end
    }

    /// Check whether `before_dot` ends with an abbreviation word
    ///
    /// `before_dot` is the text up to, not including, the period. The word
    /// is found by scanning backwards to the nearest whitespace or opening
    /// bracket/quote; inner dots stay part of the word ("e.g").
    pub fn ends_with_abbreviation(&self, before_dot: &str) -> bool {
        if self.is_empty() {
            return false;
        }
        let word_start = before_dot
            .char_indices()
            .rev()
            .find(|&(_, ch)| is_word_delimiter(ch))
            .map_or(0, |(idx, ch)| idx + ch.len_utf8());

        self.contains(&before_dot[word_start..])
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::english()
    }
}

fn is_word_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | '[' | '{' | '"' | '\'' | ',' | ';' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = AbbreviationTable::english();
        assert_eq!(table.len(), DEFAULT_ABBREVIATIONS.len());
        assert!(table.contains("Dr"));
        assert!(table.contains("e.g"));
        assert!(!table.contains("D"));
        assert!(!table.contains("Drs"));
    }

    #[test]
    fn test_case_sensitive() {
        let table = AbbreviationTable::english();
        assert!(table.contains("Mr"));
        assert!(!table.contains("mr"));
        assert!(!table.contains("MR"));
    }

    #[test]
    fn test_ends_with_abbreviation() {
        let table = AbbreviationTable::english();

        assert!(table.ends_with_abbreviation("Dr"));
        assert!(table.ends_with_abbreviation("He met Dr"));
        assert!(table.ends_with_abbreviation("Cities (e.g"));
        assert!(table.ends_with_abbreviation("a fight \"vs"));
        assert!(!table.ends_with_abbreviation("He left"));
        assert!(!table.ends_with_abbreviation("Xdr"));
        assert!(!table.ends_with_abbreviation(""));
    }

    #[test]
    fn test_duplicate_insert_counts_once() {
        let mut table = AbbreviationTable::new();
        table.insert("Dr").unwrap();
        table.insert("Dr").unwrap();
        table.insert("Drs").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_entries_rejected() {
        let mut table = AbbreviationTable::new();
        assert!(matches!(
            table.insert(""),
            Err(CoreError::InvalidAbbreviation(_))
        ));
        assert!(table.insert("Dr.").is_err());
        assert!(table.insert("St Louis").is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = AbbreviationTable::new();
        assert!(!table.ends_with_abbreviation("Dr"));
        assert!(!table.contains(""));
    }
}
