//! Command-line entry point for the blood-bank labeling tool.

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
