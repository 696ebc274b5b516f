//! Segmenter configuration
//!
//! Deserializable from the `[segmenter]` table of the configuration file.

use crate::abbreviation::{AbbreviationTable, DEFAULT_ABBREVIATIONS};
use crate::charclass::StartClass;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Settings for [`crate::Segmenter`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterConfig {
    /// Characters (besides `"`) that may open a sentence
    pub start_class: StartClass,

    /// Replaces the built-in abbreviation list when set; an empty list
    /// turns abbreviation handling off
    pub abbreviations: Option<Vec<String>>,

    /// Added on top of the active abbreviation list
    pub extra_abbreviations: Vec<String>,
}

impl SegmenterConfig {
    /// Create a builder
    pub fn builder() -> SegmenterConfigBuilder {
        SegmenterConfigBuilder::default()
    }

    /// Build the abbreviation table this configuration describes
    pub fn abbreviation_table(&self) -> Result<AbbreviationTable> {
        let mut table = match &self.abbreviations {
            Some(words) => AbbreviationTable::from_words(words)?,
            None => AbbreviationTable::from_words(DEFAULT_ABBREVIATIONS)?,
        };
        for word in &self.extra_abbreviations {
            table.insert(word)?;
        }
        Ok(table)
    }
}

/// Builder for [`SegmenterConfig`]
#[derive(Debug, Default)]
pub struct SegmenterConfigBuilder {
    config: SegmenterConfig,
}

impl SegmenterConfigBuilder {
    /// Set the sentence-start class
    pub fn start_class(mut self, start_class: StartClass) -> Self {
        self.config.start_class = start_class;
        self
    }

    /// Replace the abbreviation list
    pub fn abbreviations<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.abbreviations = Some(words.into_iter().map(Into::into).collect());
        self
    }

    /// Disable abbreviation handling
    pub fn no_abbreviations(mut self) -> Self {
        self.config.abbreviations = Some(Vec::new());
        self
    }

    /// Add one abbreviation
    pub fn extra_abbreviation<S: Into<String>>(mut self, word: S) -> Self {
        self.config.extra_abbreviations.push(word.into());
        self
    }

    /// Finish
    pub fn build(self) -> SegmenterConfig {
        self.config
    }
}
