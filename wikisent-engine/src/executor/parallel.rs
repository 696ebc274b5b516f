//! Parallel execution strategy
//!
//! Admitted documents are read in batches. Each batch is normalized and
//! segmented on a rayon pool, then written back in source order, so the
//! output is identical to the sequential strategy. Memory is bounded by one
//! batch.

use crate::error::{EngineError, Result};
use crate::executor::Executor;
use crate::normalizer::{is_redirect, CleanDocument};
use crate::pipeline::{note_redirect, ExtractionPipeline, RunStats};
use crate::sink::RecordSink;
use crate::source::{DocumentSource, RawDocument};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use wikisent_core::SentenceRecord;

/// Batched multi-threaded executor
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: ThreadPool,
    batch_size: usize,
}

/// Result of processing one document on a worker
enum Processed {
    Redirect(CleanDocument),
    Sentences(Vec<SentenceRecord>),
}

impl ParallelExecutor {
    /// Create an executor with `threads` workers (number of CPUs if None)
    pub fn new(threads: Option<usize>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(EngineError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("wikisent-worker-{i}"))
            .build()
            .map_err(|e| EngineError::Config(format!("failed to start thread pool: {e}")))?;

        log::debug!("parallel executor: {threads} threads, batch size {batch_size}");
        Ok(Self { pool, batch_size })
    }

    /// Worker threads in the pool
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Documents per batch
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn process(pipeline: &ExtractionPipeline, raw: &RawDocument) -> Result<Processed> {
        let document = pipeline.normalize(raw)?;
        if is_redirect(&document.text) {
            return Ok(Processed::Redirect(document));
        }
        let records = pipeline
            .segmenter()
            .segment(&document.text)
            .map(|span| span.to_record(&document.id))
            .collect();
        Ok(Processed::Sentences(records))
    }
}

impl Executor for ParallelExecutor {
    fn execute<S, K, P>(
        &self,
        pipeline: &ExtractionPipeline,
        mut source: S,
        sink: &mut K,
        progress: &mut P,
    ) -> Result<RunStats>
    where
        S: DocumentSource,
        K: RecordSink + ?Sized,
        P: FnMut(&RunStats),
    {
        let mut stats = RunStats::default();
        let mut batch = Vec::with_capacity(self.batch_size);

        loop {
            batch.clear();
            let mut source_error = None;
            while batch.len() < self.batch_size {
                match pipeline.next_admitted(&mut source, &mut stats) {
                    Some(Ok(raw)) => batch.push(raw),
                    Some(Err(e)) => {
                        source_error = Some(e);
                        break;
                    }
                    None => break,
                }
            }
            let exhausted = batch.len() < self.batch_size;

            let results: Vec<Result<Processed>> = self.pool.install(|| {
                batch
                    .par_iter()
                    .map(|raw| Self::process(pipeline, raw))
                    .collect()
            });

            for result in results {
                match result {
                    Ok(Processed::Sentences(records)) => {
                        for record in &records {
                            sink.write_record(record)?;
                        }
                        sink.flush()?;
                        stats.documents_segmented += 1;
                        stats.sentences_written += records.len() as u64;
                        progress(&stats);
                    }
                    Ok(Processed::Redirect(document)) => note_redirect(&document, &mut stats),
                    Err(e) => pipeline.recover(e, &mut stats)?,
                }
            }

            if let Some(e) = source_error {
                return Err(e);
            }
            if exhausted {
                break;
            }
        }

        sink.flush()?;
        Ok(stats)
    }
}
