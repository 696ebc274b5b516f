//! Output sinks for sentence records

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use wikisent_core::SentenceRecord;

/// Append-only destination for sentence records
pub trait RecordSink {
    /// Write one record
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()>;

    /// Push buffered output to the underlying writer
    fn flush(&mut self) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Collects records in memory
impl RecordSink for Vec<SentenceRecord> {
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

fn write_error(err: std::io::Error) -> EngineError {
    EngineError::SinkWrite(err.to_string())
}

/// `id<TAB>sentence` per line, no escaping
pub struct TsvSink<W: Write> {
    writer: W,
}

impl<W: Write> TsvSink<W> {
    /// Create a TSV sink
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for TsvSink<W> {
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()> {
        writeln!(self.writer, "{}\t{}", record.id, record.sentence).map_err(write_error)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(write_error)
    }
}

/// One JSON object per line: `{"id":"…","sentence":"…"}`
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a JSON Lines sink
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &SentenceRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)
            .map_err(|e| EngineError::SinkWrite(e.to_string()))?;
        self.writer.write_all(b"\n").map_err(write_error)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(write_error)
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tab-separated `id sentence`
    #[default]
    Tsv,
    /// JSON Lines
    #[serde(rename = "jsonl")]
    JsonLines,
}

impl OutputFormat {
    /// Wrap `writer` in the sink for this format
    pub fn sink<'a, W: Write + 'a>(self, writer: W) -> Box<dyn RecordSink + 'a> {
        match self {
            OutputFormat::Tsv => Box::new(TsvSink::new(writer)),
            OutputFormat::JsonLines => Box::new(JsonLinesSink::new(writer)),
        }
    }
}
