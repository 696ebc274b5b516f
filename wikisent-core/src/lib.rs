//! Heuristic sentence segmentation for cleaned encyclopedia text
//!
//! The segmenter finds sentence spans using punctuation, capitalization and
//! quotation cues only; no language model is involved. It is total over all
//! string inputs and runs in a single linear pass.
//!
//! # Example
//!
//! ```rust
//! use wikisent_core::{DocumentId, Segmenter};
//!
//! let segmenter = Segmenter::new();
//! let text = "Dr. Smith lives here. He left.";
//!
//! let sentences = segmenter.split(text);
//! assert_eq!(sentences, vec!["Dr. Smith lives here.", "He left."]);
//!
//! let id = DocumentId::from(42u64);
//! let records: Vec<_> = segmenter.segment(text).map(|s| s.to_record(&id)).collect();
//! assert_eq!(records[1].sentence, "He left.");
//! ```

#![warn(missing_docs)]

pub mod abbreviation;
pub mod charclass;
pub mod config;
pub mod error;
pub mod segmenter;
pub mod types;

// Re-export key types
pub use abbreviation::{AbbreviationTable, DEFAULT_ABBREVIATIONS};
pub use charclass::StartClass;
pub use config::{SegmenterConfig, SegmenterConfigBuilder};
pub use error::{CoreError, Result};
pub use segmenter::{Segmenter, Sentences};
pub use types::{DocumentId, SentenceRecord, SentenceSpan};
