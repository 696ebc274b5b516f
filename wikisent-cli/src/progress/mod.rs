//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use wikisent_engine::RunStats;

/// Spinner showing documents read and sentences written
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter; a hidden one draws nothing
    pub fn new(hidden: bool) -> Self {
        if hidden {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// Update after a document
    pub fn update(&self, stats: &RunStats) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(Self::message(stats));
        }
    }

    /// Finish progress reporting
    pub fn finish(&self, stats: &RunStats) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("Complete: {}", Self::message(stats)));
        }
    }

    /// Stop drawing after a failure
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon();
        }
    }

    fn message(stats: &RunStats) -> String {
        format!(
            "{} documents read, {} sentences written",
            stats.documents_read, stats.sentences_written
        )
    }
}
