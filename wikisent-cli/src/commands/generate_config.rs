//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it with:");
        println!(
            "   wikisent extract -i dump.xml -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Commented configuration template; every value shown is the default
pub const TEMPLATE: &str = r#"# wikisent configuration
#
# Every key is optional. Command-line flags override these values.

[pipeline]
# What to do when a document cannot be converted to text:
#   "abort" stops the run, "skip" logs the document and continues
error_policy = "abort"

# "sequential" or "parallel"
execution = "sequential"

# Documents per batch in parallel mode
batch_size = 256

# Worker threads in parallel mode (default: number of CPUs)
# threads = 4

# Stop after reading this many documents
# max_documents = 1000

# Namespaces to extract; pages without a <ns> element are always extracted
namespaces = [0]

[segmenter]
# Characters that may open a sentence:
#   "ascii" = A-Z and '"', "unicode" = any uppercase letter and '"'
start_class = "ascii"

# Replace the built-in abbreviation list (an empty list disables it)
# abbreviations = ["Dr", "Mr", "Mrs"]

# Add to the built-in abbreviation list (no trailing period)
extra_abbreviations = []

[normalizer]
# Prepend each article's title
with_title = false

# Keep "See also", "References" and similar trailing sections
with_footer = false

[output]
# "tsv" (id<TAB>sentence) or "jsonl"
format = "tsv"
"#;
