//! Generate command implementation
//!
//! Runs the whole pipeline: scan `go.mod`, resolve `cicd-maker.yaml`,
//! build every enabled artifact and write the results. With `--dry-run`
//! the artifacts are built but only listed.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use cicd_maker::config;
use cicd_maker::constants::CONFIG_FILENAME;
use cicd_maker::generate;
use cicd_maker::git::SystemGit;
use cicd_maker::output::OutputConfig;
use cicd_maker::write;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to config file
    #[arg(short, long, value_name = "PATH", env = "CICD_MAKER_CONFIG", default_value = CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub output: PathBuf,

    /// Show what would be written without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, out: &OutputConfig) -> Result<()> {
    let repo_dir = Path::new(".");

    let raw = config::from_file(&args.config)?;
    let prepared = generate::prepare(raw, repo_dir, &SystemGit::new(repo_dir))?;
    let staged = generate::build(&prepared)?;

    if args.dry_run {
        out.status("🔍", "[DRY-RUN]", "No files were changed.");
        for (path, _) in staged.files() {
            println!("   would write  {}", out.path(path));
        }
        for path in staged.removals() {
            if args.output.join(path).exists() {
                println!("   would remove {}", out.path(path));
            }
        }
        return Ok(());
    }

    let report = write::execute(&staged, &args.output)
        .with_context(|| format!("writing to {}", args.output.display()))?;

    for path in &report.written {
        out.status("✅", "[WROTE]", out.path(path));
    }
    for path in &report.removed {
        out.status("🗑️", "[REMOVED]", out.path(path));
    }
    Ok(())
}
