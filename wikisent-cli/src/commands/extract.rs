//! Extract command implementation

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::input::{documents, resolve_patterns};
use crate::output::{open_output, FormatArg};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use wikisent_engine::{ErrorPolicy, ExecutionMode, ExtractionPipeline, OutputFormat, RunStats};

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Dump files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: tsv, or the configuration file's value)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "WIKISENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log and skip documents that cannot be normalized
    #[arg(long)]
    pub skip_errors: bool,

    /// Normalize and segment documents on a thread pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Worker threads for parallel mode (default: number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Documents per parallel batch
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Stop after reading this many documents
    #[arg(short = 'n', long, value_name = "N")]
    pub max_documents: Option<u64>,

    /// Namespaces to extract (repeatable, default: 0)
    #[arg(long = "namespace", value_name = "NS", allow_negative_numbers = true)]
    pub namespaces: Vec<i64>,

    /// Prepend each article's title
    #[arg(long)]
    pub with_title: bool,

    /// Keep "See also", "References" and similar trailing sections
    #[arg(long)]
    pub with_footer: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let inputs = resolve_patterns(&self.input)?;
        log::info!("{} input(s)", inputs.len());

        let normalizer = config.normalizer.build()?;
        let pipeline = ExtractionPipeline::with_normalizer(config.pipeline_config(), normalizer)
            .context("Invalid pipeline configuration")?;

        let writer = open_output(self.output.as_deref())?;
        let mut sink = config.output.format.sink(writer);

        let progress = ProgressReporter::new(self.quiet || self.output.is_none());
        let result = pipeline.run_with_progress(documents(inputs), &mut sink, |stats| {
            progress.update(stats)
        });

        match result {
            Ok(stats) => {
                progress.finish(&stats);
                self.report(&stats);
                Ok(())
            }
            Err(e) => {
                progress.abandon();
                Err(e).context("Extraction failed")
            }
        }
    }

    /// Configuration file (or defaults) with command-line overrides applied
    pub fn effective_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        let pipeline = &mut config.pipeline;

        if self.skip_errors {
            pipeline.error_policy = ErrorPolicy::Skip;
        }
        if self.parallel || self.threads.is_some() {
            pipeline.execution = ExecutionMode::Parallel;
        }
        if let Some(threads) = self.threads {
            pipeline.threads = Some(threads);
        }
        if let Some(batch_size) = self.batch_size {
            pipeline.batch_size = batch_size;
        }
        if let Some(max) = self.max_documents {
            pipeline.max_documents = Some(max);
        }
        if !self.namespaces.is_empty() {
            pipeline.namespaces = self.namespaces.clone();
        }
        if self.with_title {
            config.normalizer.with_title = true;
        }
        if self.with_footer {
            config.normalizer.with_footer = true;
        }
        if let Some(format) = self.format {
            config.output.format = OutputFormat::from(format);
        }

        Ok(config)
    }

    fn report(&self, stats: &RunStats) {
        log::info!("{stats}");
        if self.quiet {
            return;
        }
        if let Some(path) = &self.output {
            eprintln!(
                "Wrote {} sentences from {} documents to {}",
                stats.sentences_written,
                stats.documents_segmented,
                path.display()
            );
        }
    }
}
