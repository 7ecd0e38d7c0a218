//! # Generation Pipeline
//!
//! Composes the individual steps:
//!
//! 1.  **Scan**: read facts from `go.mod` ([`crate::scan`]).
//! 2.  **Resolve**: validate the configuration and fill in defaults
//!     ([`crate::resolve`]).
//! 3.  **Build**: run every artifact builder against the resolved
//!     configuration and stage the results in an [`OutputFS`].
//! 4.  **Write**: apply the output set to disk ([`crate::write`]).
//!
//! Steps 1-3 never write anything, which is what `--dry-run` and
//! `validate` rely on.

use std::path::Path;

use log::debug;

use crate::config::{self, Configuration};
use crate::constants::MOD_FILENAME;
use crate::dockerfile::{self, DOCKERFILE_PATH, DOCKERIGNORE_PATH};
use crate::error::Result;
use crate::filesystem::OutputFS;
use crate::git::VersionControl;
use crate::golangci::{self, GOLANGCI_CONFIG_PATH};
use crate::renovate::{self, RENOVATE_CONFIG_PATH};
use crate::resolve::{self, ResolvedConfig};
use crate::scan::{self, ScanResult};
use crate::workflow;
use crate::write::{self, WriteReport};

/// A validated configuration together with the facts it was resolved
/// against.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub config: ResolvedConfig,
    pub facts: ScanResult,
}

/// Steps 1 and 2: scans `<repo_dir>/go.mod` and resolves `raw` against it.
pub fn prepare(
    raw: Configuration,
    repo_dir: &Path,
    vcs: &dyn VersionControl,
) -> Result<Prepared> {
    let facts = scan::scan_file(repo_dir.join(MOD_FILENAME))?;
    debug!(
        "scanned {}: module={:?} go={:?} postgres={} k8s.io={}",
        MOD_FILENAME, facts.module_path, facts.go_version, facts.uses_postgres, facts.has_k8s_io_deps
    );
    let config = resolve::resolve(raw, &facts, vcs)?;
    Ok(Prepared { config, facts })
}

/// Step 3: stages every enabled artifact, and every stale workflow file
/// for deletion.
pub fn build(prepared: &Prepared) -> Result<OutputFS> {
    let config = &prepared.config;
    let mut out = OutputFS::new();

    if config.renovate.enabled {
        let policy = renovate::build(config, &prepared.facts)?;
        out.add_file(RENOVATE_CONFIG_PATH, policy.to_json()?)?;
    }

    workflow::render::stage(config, &mut out)?;

    if let Some(recipe) = dockerfile::build(config)? {
        out.add_file(DOCKERFILE_PATH, recipe.dockerfile()?)?;
        out.add_file(DOCKERIGNORE_PATH, recipe.dockerignore())?;
    }

    if let Some(lint) = golangci::build(config) {
        out.add_file(GOLANGCI_CONFIG_PATH, lint.render()?)?;
    }

    Ok(out)
}

/// The whole pipeline: reads `config_path`, generates everything for the
/// repository at `repo_dir` and writes it to `output_dir`.
pub fn generate(
    config_path: &Path,
    repo_dir: &Path,
    output_dir: &Path,
    vcs: &dyn VersionControl,
) -> Result<WriteReport> {
    let raw = config::from_file(config_path)?;
    let prepared = prepare(raw, repo_dir, vcs)?;
    let out = build(&prepared)?;
    write::execute(&out, output_dir)
}
