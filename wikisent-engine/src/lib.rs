//! Streaming sentence extraction for encyclopedia XML dumps
//!
//! This crate reads `<page>` documents from a dump, filters them by
//! namespace, converts their markup to plain text, segments that text into
//! sentences and writes one record per sentence to a sink.
//!
//! ```
//! use std::io::Cursor;
//! use wikisent_engine::{DumpReader, ExtractionPipeline, PipelineConfig, TsvSink};
//!
//! let dump = "<page><ns>0</ns><id>42</id><text>This is one. This is two!</text></page>\n";
//! let pipeline = ExtractionPipeline::new(PipelineConfig::default()).unwrap();
//! let mut sink = TsvSink::new(Vec::new());
//! pipeline.run(DumpReader::new(Cursor::new(dump)), &mut sink).unwrap();
//!
//! let output = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(output, "42\tThis is one.\n42\tThis is two!\n");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod normalizer;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use config::{ErrorPolicy, ExecutionMode, PipelineConfig};
pub use error::{EngineError, Result};
#[cfg(feature = "parallel")]
pub use executor::ParallelExecutor;
pub use executor::{Executor, SequentialExecutor};
pub use filter::NamespaceFilter;
pub use normalizer::{
    collapse_line_breaks, is_redirect, CleanDocument, TextNormalizer, WikiTextNormalizer,
    WikiTextNormalizerBuilder, REDIRECT_MARKER,
};
pub use pipeline::{CleanDocuments, ExtractionPipeline, RunStats};
pub use sink::{JsonLinesSink, OutputFormat, RecordSink, TsvSink};
pub use source::{DocumentSource, DumpReader, RawDocument};

// Re-export from core for convenience
pub use wikisent_core::{DocumentId, Segmenter, SegmenterConfig, SentenceRecord};
