//! Configuration file
//!
//! Every section is optional; missing keys take their defaults. Command-line
//! flags are applied on top of the loaded file.

use crate::error::CliError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wikisent_core::SegmenterConfig;
use wikisent_engine::{OutputFormat, PipelineConfig, WikiTextNormalizer};

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Pipeline settings
    pub pipeline: PipelineConfig,

    /// Segmenter settings
    pub segmenter: SegmenterConfig,

    /// Markup normalizer settings
    pub normalizer: NormalizerConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Normalizer switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Prepend the article title
    pub with_title: bool,

    /// Keep footer sections ("See also", "References", ...)
    pub with_footer: bool,
}

impl NormalizerConfig {
    /// Build the normalizer
    pub fn build(&self) -> Result<WikiTextNormalizer> {
        Ok(WikiTextNormalizer::builder()
            .with_title(self.with_title)
            .with_footer(self.with_footer)
            .build()?)
    }
}

/// Output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Record format
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::ConfigError(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())).into())
    }

    /// Parse TOML configuration text
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Pipeline configuration with the top-level `[segmenter]` section
    /// applied (when it differs from the defaults)
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut pipeline = self.pipeline.clone();
        if self.segmenter != SegmenterConfig::default() {
            pipeline.segmenter = self.segmenter.clone();
        }
        pipeline
    }
}
