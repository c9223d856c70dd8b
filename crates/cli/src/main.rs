//! Command line executable for StackForge.

use anyhow::Result;
use clap::Parser;
use stackforge_solver::cli::{run_cli, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run_cli(cli)
}
