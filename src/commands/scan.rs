//! Scan command implementation
//!
//! Prints the facts the generator derives from `go.mod` as pretty JSON, for
//! debugging why a workflow step or renovate rule was (not) generated.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use cicd_maker::constants::MOD_FILENAME;
use cicd_maker::scan;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Path to the go.mod file
    #[arg(short, long, value_name = "PATH", default_value = MOD_FILENAME)]
    pub manifest: PathBuf,
}

/// Execute the scan command
pub fn execute(args: ScanArgs) -> Result<()> {
    let facts = scan::scan_file(&args.manifest)?;
    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}
