//! Shared test utilities for the CLI tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_go_mod(manifests::SERVICE).with_config(configs::FULL);
//!     fixture.command().arg("generate").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// `go.mod` contents.
#[allow(dead_code)]
pub mod manifests {
    pub const SERVICE: &str = r#"module github.com/example/svc

go 1.21

require (
	github.com/lib/pq v1.10.9
	github.com/sapcc/go-api-declarations v1.10.0
	golang.org/x/text v0.14.0 // indirect
)
"#;

    pub const LIBRARY: &str = "module github.com/example/lib\n\ngo 1.22\n";
}

/// `cicd-maker.yaml` contents. All of them pin `defaultBranch` so the tests
/// never shell out to git.
#[allow(dead_code)]
pub mod configs {
    pub const FULL: &str = r#"
metadata:
  url: https://github.com/example/svc
binaries:
  - name: svc
    fromPackage: .
    installTo: bin/
githubWorkflow:
  global:
    defaultBranch: main
  ci:
    enabled: true
    coveralls: true
  securityChecks:
    enabled: true
  license:
    enabled: true
  pushContainerToGhcr:
    enabled: true
renovate:
  enabled: true
  assignees: [octocat]
dockerfile:
  enabled: true
golangciLint:
  createConfig: true
"#;

    pub const RENOVATE_ONLY: &str = r#"
metadata:
  url: https://github.com/example/lib
renovate:
  enabled: true
"#;

    pub const WORKFLOWS_ONLY: &str = r#"
metadata:
  url: https://github.com/example/lib
githubWorkflow:
  global:
    defaultBranch: main
  ci:
    enabled: true
"#;

    pub const UNKNOWN_KEY: &str = r#"
metadata:
  url: https://github.com/example/svc
renovat:
  enabled: true
"#;

    pub const REMOVED_DOCKER_USER: &str = r#"
metadata:
  url: https://github.com/example/svc
binaries:
  - name: svc
    fromPackage: .
    installTo: bin/
dockerfile:
  enabled: true
  user: nobody
"#;
}

/// A temporary repository directory.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Writes `cicd-maker.yaml`.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file("cicd-maker.yaml", content)
    }

    /// Writes `go.mod`.
    pub fn with_go_mod(self, content: &str) -> Self {
        self.with_file("go.mod", content)
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `cicd-maker` command running inside the fixture, with colors off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cicd-maker");
        cmd.current_dir(self.path())
            .env_remove("CICD_MAKER_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
