//! CLI entry point for the stroke painter

use clap::Parser;
use strokepaint::io::cli::{Cli, PaintProcessor};

fn main() -> strokepaint::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = PaintProcessor::new(cli);
    processor.process()
}
