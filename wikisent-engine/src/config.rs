//! Configuration types for the pipeline

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use wikisent_core::SegmenterConfig;

/// What to do when a single document cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Stop the run
    #[default]
    Abort,
    /// Log the document and continue with the next one
    Skip,
}

/// How documents are processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One document at a time
    #[default]
    Sequential,
    /// Batches of documents on a thread pool, written back in source order
    Parallel,
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Policy for normalization failures
    pub error_policy: ErrorPolicy,
    /// Execution mode selector
    pub execution: ExecutionMode,
    /// Documents per batch in parallel mode
    pub batch_size: usize,
    /// Worker threads for parallel mode (None = number of CPUs)
    pub threads: Option<usize>,
    /// Stop after reading this many documents
    pub max_documents: Option<u64>,
    /// Namespaces whose documents are processed; documents without a
    /// namespace marker are always processed
    pub namespaces: Vec<i64>,
    /// Segmenter settings
    pub segmenter: SegmenterConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Abort,
            execution: ExecutionMode::Sequential,
            batch_size: 256,
            threads: None,
            max_documents: None,
            namespaces: vec![0],
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration for parallel extraction
    pub fn parallel() -> Self {
        Self {
            execution: ExecutionMode::Parallel,
            ..Self::default()
        }
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(EngineError::Config(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(EngineError::Config(
                "threads must be at least 1".to_string(),
            ));
        }
        if self.namespaces.is_empty() {
            return Err(EngineError::Config(
                "at least one namespace must be selected".to_string(),
            ));
        }
        #[cfg(not(feature = "parallel"))]
        if self.execution == ExecutionMode::Parallel {
            return Err(EngineError::Config(
                "parallel execution requires the `parallel` feature".to_string(),
            ));
        }
        Ok(())
    }
}
