//! # Validate Command Implementation
//!
//! Parses `cicd-maker.yaml`, scans `go.mod` and runs the resolver, then
//! prints a summary of what `generate` would produce. Nothing is written.

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use cicd_maker::config;
use cicd_maker::constants::CONFIG_FILENAME;
use cicd_maker::generate;
use cicd_maker::git::SystemGit;
use cicd_maker::output::{emoji, OutputConfig};

/// Validate a cicd-maker.yaml configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate.
    #[arg(short, long, value_name = "FILE", env = "CICD_MAKER_CONFIG", default_value = CONFIG_FILENAME)]
    pub config: PathBuf,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, out: &OutputConfig) -> Result<()> {
    out.status(
        "🔍",
        "[SCAN]",
        format!("Validating configuration: {}", out.path(&args.config)),
    );

    let raw = config::from_file(&args.config)?;
    out.status("✅", "[OK]", "Configuration file parsed successfully");

    let repo_dir = Path::new(".");
    let prepared = generate::prepare(raw, repo_dir, &SystemGit::new(repo_dir))?;
    out.status("✅", "[OK]", "Configuration is valid");

    let resolved = &prepared.config;
    let facts = &prepared.facts;
    println!("\n{} Summary:", emoji(out, "📊", "[INFO]"));
    println!(
        "   Module:            {}",
        facts.module_path.as_deref().unwrap_or("(none)")
    );
    println!(
        "   Kind:              {}",
        if resolved.is_application() {
            "application"
        } else {
            "library"
        }
    );
    println!(
        "   Hosting:           {}",
        if resolved.is_internal_instance() {
            "internal"
        } else {
            "github.com"
        }
    );
    if resolved.github_workflow().is_some() {
        println!("   Default branch:    {}", resolved.default_branch());
        println!("   Go version:        {}", resolved.workflow_go_version());
        println!(
            "   Self-hosted:       {}",
            resolved.is_self_hosted_runner()
        );
    }

    let staged = generate::build(&prepared)?;
    println!("   Artifacts:         {}", staged.len());
    for (path, _) in staged.files() {
        println!("     {}", path.display());
    }
    Ok(())
}
