//! Sequential execution strategy

use crate::error::Result;
use crate::executor::Executor;
use crate::pipeline::{ExtractionPipeline, RunStats};
use crate::sink::RecordSink;
use crate::source::DocumentSource;

/// One document at a time, sentences streamed straight to the sink
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute<S, K, P>(
        &self,
        pipeline: &ExtractionPipeline,
        source: S,
        sink: &mut K,
        progress: &mut P,
    ) -> Result<RunStats>
    where
        S: DocumentSource,
        K: RecordSink + ?Sized,
        P: FnMut(&RunStats),
    {
        let mut documents = pipeline.documents(source);

        while let Some(document) = documents.next() {
            let document = document?;

            let mut written = 0;
            for span in pipeline.segmenter().segment(&document.text) {
                sink.write_record(&span.to_record(&document.id))?;
                written += 1;
            }
            sink.flush()?;

            let stats = documents.stats_mut();
            stats.documents_segmented += 1;
            stats.sentences_written += written;
            progress(documents.stats());
        }

        sink.flush()?;
        Ok(documents.into_stats())
    }
}
