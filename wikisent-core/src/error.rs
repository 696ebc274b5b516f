//! Core error types (deterministic only)
//!
//! Segmentation itself cannot fail; these errors come from building a
//! segmenter out of user-supplied configuration.

use thiserror::Error;

/// Core errors (no I/O, no external failures)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Abbreviation entry is empty, contains whitespace or ends with a period
    #[error("invalid abbreviation {0:?}")]
    InvalidAbbreviation(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_abbreviation_display() {
        let error = CoreError::InvalidAbbreviation("St Louis".to_string());
        assert_eq!(error.to_string(), "invalid abbreviation \"St Louis\"");
    }
}
