//! wikisent: sentence extraction from encyclopedia XML dumps

use clap::Parser;
use wikisent_cli::commands::Commands;

/// Extract sentences from Wikipedia XML dumps
#[derive(Debug, Parser)]
#[command(name = "wikisent", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
