//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// Input file not found or inaccessible
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// No input matched any pattern
    NoInput,
    /// Configuration file could not be used
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::NoInput => write!(f, "No files found matching the provided patterns"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
