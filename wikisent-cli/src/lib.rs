//! wikisent CLI library
//!
//! Command-line front end for extracting sentences from encyclopedia XML
//! dumps.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
