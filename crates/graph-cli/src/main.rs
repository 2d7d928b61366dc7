// File: crates/graph-cli/src/main.rs
// Summary: `graphplot` entry point.

use anyhow::Result;
use clap::Parser;
use graph_cli::{init_logging, run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    run(&cli)
}
