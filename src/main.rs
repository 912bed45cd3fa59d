//! CLI entry point for sprite-sheet grid inference

use clap::Parser;
use spritegrid::io::cli::{Cli, FileProcessor};
use spritegrid::io::logging::{init_logging, log_level};

fn main() -> spritegrid::Result<()> {
    let cli = Cli::parse();
    if !init_logging(log_level(cli.quiet, cli.verbose)) {
        tracing::debug!("log subscriber already installed");
    }

    let mut processor = FileProcessor::new(cli)?;
    let analysed = processor.process()?;
    tracing::debug!(analysed, "batch finished");
    Ok(())
}
