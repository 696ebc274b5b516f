//! Character classification for the segmenter scan
//!
//! Optimized for hot-path performance with an ASCII fast-path. Every
//! character the scanner branches on is ASCII except the Unicode line
//! separators, which get an explicit check.

use serde::{Deserialize, Serialize};

/// Which characters may open a sentence, besides the double quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartClass {
    /// `A`-`Z` only
    #[default]
    Ascii,
    /// Any character with the Unicode `Uppercase` property
    Unicode,
}

const TERMINATOR: u8 = 0b0001;
const QUOTE: u8 = 0b0010;
const SPACE: u8 = 0b0100;
const UPPER: u8 = 0b1000;

/// Fast lookup table for the character classes the scanner needs
#[derive(Debug, Clone)]
pub struct CharTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [u8; 128],
    start_class: StartClass,
}

impl CharTable {
    /// Build the table for the given sentence-start class
    pub fn new(start_class: StartClass) -> Self {
        let mut ascii_table = [0u8; 128];

        for ch in ['.', '!', '?'] {
            ascii_table[ch as usize] |= TERMINATOR;
        }
        for ch in ['\'', '"'] {
            ascii_table[ch as usize] |= QUOTE;
        }
        // \x0B is whitespace for the scanner even though
        // `char::is_ascii_whitespace` leaves it out.
        for ch in [' ', '\t', '\n', '\x0B', '\x0C', '\r'] {
            ascii_table[ch as usize] |= SPACE;
        }
        for ch in 'A'..='Z' {
            ascii_table[ch as usize] |= UPPER;
        }

        Self {
            ascii_table,
            start_class,
        }
    }

    #[inline]
    fn has(&self, ch: char, class: u8) -> bool {
        ch.is_ascii() && self.ascii_table[ch as usize] & class != 0
    }

    /// `.`, `!` or `?`
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        self.has(ch, TERMINATOR)
    }

    /// `'` or `"`
    #[inline]
    pub fn is_quote(&self, ch: char) -> bool {
        self.has(ch, QUOTE)
    }

    /// ASCII whitespace, including vertical tab
    #[inline]
    pub fn is_space(&self, ch: char) -> bool {
        self.has(ch, SPACE)
    }

    /// Logical line break: `\n`, `\r`, NEL, LS or PS
    #[inline]
    pub fn is_line_break(&self, ch: char) -> bool {
        matches!(ch, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
    }

    /// Whether a sentence may start with this character
    #[inline]
    pub fn starts_sentence(&self, ch: char) -> bool {
        if ch == '"' {
            return true;
        }
        match self.start_class {
            StartClass::Ascii => self.has(ch, UPPER),
            StartClass::Unicode => ch.is_uppercase(),
        }
    }
}

impl Default for CharTable {
    fn default() -> Self {
        Self::new(StartClass::default())
    }
}
