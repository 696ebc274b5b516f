//! Extraction pipeline
//!
//! Source → namespace filter → normalizer → redirect skip → segmenter → sink,
//! one document at a time. The first three stages are exposed as the
//! [`CleanDocuments`] cursor; the executors compose it with the segmenter and
//! write the records.

use crate::config::{ErrorPolicy, ExecutionMode, PipelineConfig};
use crate::error::{EngineError, Result};
use crate::executor::{Executor, SequentialExecutor};
use crate::filter::NamespaceFilter;
use crate::normalizer::{
    collapse_line_breaks, is_redirect, CleanDocument, TextNormalizer, WikiTextNormalizer,
};
use crate::sink::RecordSink;
use crate::source::{DocumentSource, RawDocument};
use serde::Serialize;
use std::fmt;
use wikisent_core::Segmenter;

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Documents pulled from the source
    pub documents_read: u64,
    /// Documents rejected by the namespace filter
    pub skipped_namespace: u64,
    /// Documents dropped as redirects
    pub skipped_redirect: u64,
    /// Documents that failed normalization and were skipped
    pub failed: u64,
    /// Documents passed to the segmenter
    pub documents_segmented: u64,
    /// Records written to the sink
    pub sentences_written: u64,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} documents read, {} segmented, {} sentences written \
             (skipped: {} namespace, {} redirect, {} failed)",
            self.documents_read,
            self.documents_segmented,
            self.sentences_written,
            self.skipped_namespace,
            self.skipped_redirect,
            self.failed
        )
    }
}

/// Sentence extraction pipeline
///
/// Holds no per-run state; one pipeline can run any number of sources.
pub struct ExtractionPipeline {
    config: PipelineConfig,
    segmenter: Segmenter,
    normalizer: Box<dyn TextNormalizer>,
    filter: NamespaceFilter,
}

impl fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl ExtractionPipeline {
    /// Pipeline with the markup normalizer (no title, no footer)
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let normalizer = WikiTextNormalizer::builder().build()?;
        Self::with_normalizer(config, normalizer)
    }

    /// Pipeline with a custom normalizer
    pub fn with_normalizer<N>(config: PipelineConfig, normalizer: N) -> Result<Self>
    where
        N: TextNormalizer + 'static,
    {
        config.validate()?;
        let segmenter = Segmenter::with_config(&config.segmenter)?;
        let filter = NamespaceFilter::new(config.namespaces.clone());

        Ok(Self {
            config,
            segmenter,
            normalizer: Box::new(normalizer),
            filter,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Segmenter used for every document
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Cursor over the documents of `source` that survive filtering,
    /// normalization and redirect skipping
    pub fn documents<S: DocumentSource>(&self, source: S) -> CleanDocuments<'_, S> {
        CleanDocuments {
            pipeline: self,
            source,
            stats: RunStats::default(),
            done: false,
        }
    }

    /// Extract every sentence of `source` into `sink`
    pub fn run<S, K>(&self, source: S, sink: &mut K) -> Result<RunStats>
    where
        S: DocumentSource,
        K: RecordSink + ?Sized,
    {
        self.run_with_progress(source, sink, |_| {})
    }

    /// Like [`run`](Self::run), calling `progress` after each document
    /// is written
    pub fn run_with_progress<S, K, P>(
        &self,
        source: S,
        sink: &mut K,
        mut progress: P,
    ) -> Result<RunStats>
    where
        S: DocumentSource,
        K: RecordSink + ?Sized,
        P: FnMut(&RunStats),
    {
        log::info!(
            "starting extraction ({:?}, error policy {:?})",
            self.config.execution,
            self.config.error_policy
        );

        let stats = match self.config.execution {
            ExecutionMode::Sequential => {
                SequentialExecutor.execute(self, source, sink, &mut progress)
            }
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                crate::executor::ParallelExecutor::new(self.config.threads, self.config.batch_size)?
                    .execute(self, source, sink, &mut progress)
            }
            #[cfg(not(feature = "parallel"))]
            ExecutionMode::Parallel => Err(EngineError::Config(
                "parallel execution requires the `parallel` feature".to_string(),
            )),
        }?;

        log::info!("extraction finished: {stats}");
        Ok(stats)
    }

    /// Next document from `source` that passes the namespace filter
    ///
    /// Honors `max_documents`. Rejected documents never reach the
    /// normalizer.
    pub(crate) fn next_admitted<S: DocumentSource>(
        &self,
        source: &mut S,
        stats: &mut RunStats,
    ) -> Option<Result<RawDocument>> {
        loop {
            if let Some(max) = self.config.max_documents {
                if stats.documents_read >= max {
                    return None;
                }
            }

            let raw = match source.next()? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e)),
            };
            stats.documents_read += 1;

            if self.filter.accepts(&raw) {
                return Some(Ok(raw));
            }
            stats.skipped_namespace += 1;
            log::debug!(
                "skipping document {} in namespace {}",
                raw.id().unwrap_or("<unknown>"),
                raw.namespace().unwrap_or_default().trim()
            );
        }
    }

    /// Normalize one admitted document and collapse its line breaks
    pub(crate) fn normalize(&self, raw: &RawDocument) -> Result<CleanDocument> {
        let mut document = self.normalizer.normalize(raw)?;
        document.text = collapse_line_breaks(&document.text);
        Ok(document)
    }

    /// Apply the error policy to a failed document
    pub(crate) fn recover(&self, err: EngineError, stats: &mut RunStats) -> Result<()> {
        match self.config.error_policy {
            ErrorPolicy::Skip if err.is_document_local() => {
                stats.failed += 1;
                log::warn!("skipping document: {err}");
                Ok(())
            }
            _ => Err(err),
        }
    }
}

/// Log and count a redirect
pub(crate) fn note_redirect(document: &CleanDocument, stats: &mut RunStats) {
    stats.skipped_redirect += 1;
    log::debug!("skipping redirect {}", document.id);
}

/// Pull-based cursor over cleaned documents
///
/// Holds at most one document at a time. The iterator is fused after the
/// first error.
pub struct CleanDocuments<'p, S> {
    pipeline: &'p ExtractionPipeline,
    source: S,
    stats: RunStats,
    done: bool,
}

impl<S> CleanDocuments<'_, S> {
    /// Counters so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RunStats {
        &mut self.stats
    }

    /// Final counters
    pub fn into_stats(self) -> RunStats {
        self.stats
    }
}

impl<S: DocumentSource> Iterator for CleanDocuments<'_, S> {
    type Item = Result<CleanDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let raw = match self.pipeline.next_admitted(&mut self.source, &mut self.stats) {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Ok(raw)) => raw,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            match self.pipeline.normalize(&raw) {
                Ok(document) if is_redirect(&document.text) => {
                    note_redirect(&document, &mut self.stats);
                }
                Ok(document) => return Some(Ok(document)),
                Err(e) => {
                    if let Err(e) = self.pipeline.recover(e, &mut self.stats) {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}

impl<S: DocumentSource> std::iter::FusedIterator for CleanDocuments<'_, S> {}
