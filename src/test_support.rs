//! Fixtures shared by the unit tests.

use crate::config::parse;
use crate::error::Result;
use crate::git::VersionControl;
use crate::resolve::{resolve, ResolvedConfig};
use crate::scan::ScanResult;

pub struct NoGit;

impl VersionControl for NoGit {
    fn remote_head(&self) -> Result<String> {
        Ok("refs/remotes/origin/main".to_string())
    }
}

pub fn facts() -> ScanResult {
    ScanResult {
        module_path: Some("github.com/example/svc".to_string()),
        go_version: Some("1.21".to_string()),
        ..Default::default()
    }
}

/// Resolves `githubWorkflow` options on top of a public repository.
pub fn resolved(workflow_yaml: &str) -> ResolvedConfig {
    resolved_with(workflow_yaml, &facts())
}

pub fn resolved_with(workflow_yaml: &str, facts: &ScanResult) -> ResolvedConfig {
    let yaml = format!("metadata:\n  url: https://github.com/example/svc\n{workflow_yaml}");
    resolve(parse(&yaml).unwrap(), facts, &NoGit).unwrap()
}
