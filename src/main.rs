//! `cicd-maker` binary.
//!
//! Parses the command line and hands off to the `cicd_maker` library. Any
//! error surfaces through `anyhow` and turns into a non-zero exit status.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    cli::Cli::parse().execute()
}
