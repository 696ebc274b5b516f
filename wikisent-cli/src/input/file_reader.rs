//! Opening inputs as document sources

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use wikisent_engine::{DumpReader, EngineError, RawDocument};

/// One input of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Open a buffered reader
    pub fn open(&self) -> io::Result<Box<dyn BufRead>> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Pages of all inputs, in order, as one source
///
/// Inputs are opened lazily; a failure to open one becomes a source error
/// at its position in the stream.
pub fn documents(
    inputs: Vec<InputSource>,
) -> impl Iterator<Item = wikisent_engine::Result<RawDocument>> {
    inputs.into_iter().flat_map(
        |input| -> Box<dyn Iterator<Item = wikisent_engine::Result<RawDocument>>> {
            match input.open() {
                Ok(reader) => {
                    log::info!("reading {input}");
                    Box::new(DumpReader::new(reader))
                }
                Err(e) => Box::new(std::iter::once(Err(EngineError::SourceRead(format!(
                    "failed to open {input}: {e}"
                ))))),
            }
        },
    )
}
