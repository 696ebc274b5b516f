//! Execution strategies for the pipeline

use crate::error::Result;
use crate::pipeline::{ExtractionPipeline, RunStats};
use crate::sink::RecordSink;
use crate::source::DocumentSource;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Strategy that drives documents from a source into a sink
///
/// Every strategy writes records in source order.
pub trait Executor: Send + Sync {
    /// Run `pipeline` over `source`, calling `progress` after each
    /// document is written
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
        P: FnMut(&RunStats);
}
