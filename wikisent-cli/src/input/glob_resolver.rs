//! File pattern resolution using glob

use super::InputSource;
use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;

/// Marker for standard input
pub const STDIN_MARKER: &str = "-";

/// Resolve input patterns to sources
///
/// `-` stands for standard input and may appear once, alone. File matches
/// are sorted and de-duplicated.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<InputSource>> {
    if patterns.iter().any(|p| p == STDIN_MARKER) {
        if patterns.len() > 1 {
            return Err(CliError::InvalidPattern(
                "standard input (-) cannot be combined with other inputs".to_string(),
            )
            .into());
        }
        return Ok(vec![InputSource::Stdin]);
    }

    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInput.into());
    }

    files.sort();
    files.dedup();

    Ok(files.into_iter().map(InputSource::File).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_stdin_marker() {
        let sources = resolve_patterns(&["-".to_string()]).unwrap();
        assert_eq!(sources, vec![InputSource::Stdin]);
    }

    #[test]
    fn test_stdin_cannot_be_mixed() {
        let result = resolve_patterns(&["-".to_string(), "dump.xml".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_glob_sorted_and_deduplicated() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xml", "a.xml", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let pattern = dir.path().join("*.xml").display().to_string();
        let exact = dir.path().join("a.xml").display().to_string();

        let sources = resolve_patterns(&[pattern, exact]).unwrap();
        assert_eq!(
            sources,
            vec![
                InputSource::File(dir.path().join("a.xml")),
                InputSource::File(dir.path().join("b.xml")),
            ]
        );
    }

    #[test]
    fn test_no_match() {
        let err = resolve_patterns(&["/nonexistent/*.xml".to_string()]).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::NoInput)));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[unclosed".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidPattern(_))
        ));
    }
}
