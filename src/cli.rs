//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use cicd_maker::output::{ColorWhen, OutputConfig};

use crate::commands;

/// cicd-maker - Generate CI/CD configuration for Go repositories
#[derive(Parser, Debug)]
#[command(name = "cicd-maker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate all configured artifacts from cicd-maker.yaml and go.mod
    Generate(commands::generate::GenerateArgs),

    /// Validate cicd-maker.yaml without writing anything
    Validate(commands::validate::ValidateArgs),

    /// Print the facts scanned from go.mod as JSON
    Scan(commands::scan::ScanArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_timestamp(None)
        .init();

        let out = OutputConfig::new(self.color);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args, &out),
            Commands::Validate(args) => commands::validate::execute(args, &out),
            Commands::Scan(args) => commands::scan::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
