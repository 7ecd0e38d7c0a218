//! # cicd-maker Library
//!
//! This library generates the CI/CD scaffolding of a Go repository from a
//! single declarative file, `cicd-maker.yaml`, plus facts scanned from the
//! repository's `go.mod`. It is designed to be used by the `cicd-maker`
//! command-line tool but the pipeline steps are public so they can be
//! driven programmatically.
//!
//! ## Quick Example
//!
//! ```
//! use cicd_maker::{config, scan};
//!
//! let facts = scan::scan("go.mod", b"module github.com/example/svc\n\ngo 1.21\n").unwrap();
//! assert_eq!(facts.module_path.as_deref(), Some("github.com/example/svc"));
//!
//! let raw = config::parse("metadata:\n  url: https://github.com/example/svc\n").unwrap();
//! assert!(!raw.renovate.enabled);
//! ```
//!
//! ## Generated Artifacts
//!
//! - `.github/renovate.json` (`renovate`): dependency update policy.
//! - `.github/workflows/*.yaml` (`workflow`): CI, checks, CodeQL and GHCR
//!   publishing workflows.
//! - `Dockerfile` and `.dockerignore` (`dockerfile`).
//! - `.golangci.yaml` (`golangci`).
//!
//! ## Execution Flow
//!
//! The entry point is [`generate::generate`]:
//!
//! 1.  **Scan**: parse `go.mod` into a [`scan::ScanResult`].
//! 2.  **Resolve**: validate the configuration and fill in defaults that
//!     depend on the scan or on the git remote ([`resolve::resolve`]).
//! 3.  **Build**: each artifact module renders into an in-memory
//!     [`filesystem::OutputFS`].
//! 4.  **Write**: the output set is written to disk and retired workflow
//!     files are removed ([`write::execute`]).

pub mod config;
pub mod constants;
pub mod dockerfile;
pub mod error;
pub mod filesystem;
pub mod generate;
pub mod git;
pub mod golangci;
pub mod output;
pub mod renovate;
mod renovate_proptest;
pub mod resolve;
pub mod scan;
pub mod workflow;
pub mod write;
pub mod yaml;

#[cfg(test)]
mod test_support;
