//! Segment command implementation
//!
//! Runs the segmenter alone on plain text. Each input line is one
//! document whose id is its 1-based line number.

use crate::commands::init_logging;
use crate::config::CliConfig;
use crate::input::InputSource;
use crate::output::{open_output, FormatArg};
use anyhow::{Context, Result};
use clap::Args;
use std::io::BufRead;
use std::path::PathBuf;
use wikisent_core::{DocumentId, Segmenter};
use wikisent_engine::{OutputFormat, RecordSink};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Text file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "tsv")]
    pub format: FormatArg,

    /// Configuration file (only the segmenter settings are used)
    #[arg(short, long, value_name = "FILE", env = "WIKISENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        let segmenter = Segmenter::with_config(&config.pipeline_config().segmenter)
            .context("Invalid segmenter configuration")?;

        let input = match &self.input {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        };
        let reader = input
            .open()
            .with_context(|| format!("Failed to open {input}"))?;

        let writer = open_output(self.output.as_deref())?;
        let mut sink = OutputFormat::from(self.format).sink(writer);

        let written = segment_lines(&segmenter, reader, &mut sink)?;
        log::info!("{written} sentences written");
        Ok(())
    }
}

/// Segment every line of `reader` into `sink`, returning the record count
pub fn segment_lines<R, K>(segmenter: &Segmenter, reader: R, sink: &mut K) -> Result<u64>
where
    R: BufRead,
    K: RecordSink + ?Sized,
{
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let id = DocumentId::from(index as u64 + 1);

        for span in segmenter.segment(&line) {
            sink.write_record(&span.to_record(&id))?;
            written += 1;
        }
    }

    sink.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use wikisent_engine::TsvSink;

    #[test]
    fn test_line_numbers_are_ids() {
        let input = "This is one. This is two!\n\nthird line has no start\nLast one.\n";
        let mut sink = TsvSink::new(Vec::new());

        let written = segment_lines(&Segmenter::new(), Cursor::new(input), &mut sink).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "1\tThis is one.\n1\tThis is two!\n4\tLast one.\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let mut sink = TsvSink::new(Vec::new());
        let written = segment_lines(&Segmenter::new(), Cursor::new(""), &mut sink).unwrap();
        assert_eq!(written, 0);
    }
}
