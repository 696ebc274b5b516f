//! CLI command implementations

use clap::Subcommand;

pub mod extract;
pub mod generate_config;
pub mod segment;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract sentences from XML dump files
    Extract(extract::ExtractArgs),

    /// Segment plain text, one document per line
    Segment(segment::SegmentArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::Segment(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` takes precedence over the verbosity flags. Quiet mode installs
/// no logger at all.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Keep an already installed logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
