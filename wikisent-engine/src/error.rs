//! Layered error types
//!
//! Every variant except `Normalization` is fatal for a run. Output written
//! before the failure stays valid; nothing is rolled back.

use wikisent_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The document source could not produce the next document
    #[error("failed to read document source: {0}")]
    SourceRead(String),

    /// The normalizer could not turn a document into plain text
    #[error("failed to normalize document {id}: {reason}")]
    Normalization {
        /// Identifier (or title) of the offending document
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// The output sink rejected a write
    #[error("failed to write output: {0}")]
    SinkWrite(String),

    /// Invalid pipeline or normalizer configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Invalid segmenter configuration
    #[error("segmenter configuration error: {0}")]
    Core(#[from] CoreError),
}

impl EngineError {
    /// Whether the run can continue past this error under
    /// [`crate::ErrorPolicy::Skip`]
    pub fn is_document_local(&self) -> bool {
        matches!(self, EngineError::Normalization { .. })
    }
}

impl From<regex::Error> for EngineError {
    fn from(err: regex::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
