//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the
//! `cicd-maker.yaml` configuration file, as well as the logic for parsing it.
//!
//! ## Key Components
//!
//! - **`Configuration`**: The root of the tree. Every group is optional in the
//!   file; a missing group deserializes to its default.
//! - **Option groups** (`BinaryConfig`, `GolangConfig`, `GithubWorkflowConfig`,
//!   `RenovateConfig`, `DockerfileConfig`, ...): one struct per top-level key.
//! - **`PackageRule`**: a dependency-update rule, shared between the user
//!   configuration and the generated `renovate.json`.
//!
//! Fields typed as `Option<T>` are ones where absence means "derive a
//! default" rather than "false" or "empty". They are filled in by
//! [`crate::resolve::resolve`]; nothing else should read them raw.
//!
//! All keys are camelCase and unknown keys are rejected, so that a typo in
//! the configuration is reported instead of silently generating the wrong
//! files.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The data structure read from `cicd-maker.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    pub metadata: Metadata,
    pub binaries: Vec<BinaryConfig>,
    pub test_packages: TestPackagesConfig,
    pub golang: GolangConfig,
    pub golangci_lint: GolangciLintConfig,
    pub spell_check: SpellCheckConfig,
    /// The whole block is optional: without it no workflows are generated
    /// and the workflow preconditions are not checked.
    pub github_workflow: Option<GithubWorkflowConfig>,
    pub renovate: RenovateConfig,
    pub dockerfile: DockerfileConfig,
}

/// Free-form metadata about the repository.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Metadata {
    /// Canonical URL of the repository, e.g. `https://github.com/example/svc`.
    pub url: String,
}

/// A binary that `make install` builds and installs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BinaryConfig {
    pub name: String,
    pub from_package: String,
    pub install_to: String,
}

/// Selects which packages are tested and measured for coverage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TestPackagesConfig {
    pub only: String,
    pub except: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GolangConfig {
    pub enable_vendoring: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GolangciLintConfig {
    /// Whether `.golangci.yaml` is generated.
    pub create_config: bool,
    /// Functions whose unchecked errors are accepted by errcheck.
    pub errcheck_excludes: Vec<String>,
    /// Directories excluded from linting.
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpellCheckConfig {
    /// Words appended to the misspell ignore list.
    pub ignore_words: Vec<String>,
}

/// Options for the generated GitHub Actions workflows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GithubWorkflowConfig {
    /// Settings applicable to all workflows. Workflow-level counterparts take
    /// precedence when they are set.
    pub global: GlobalWorkflowConfig,
    pub ci: CiWorkflowConfig,
    pub license: LicenseWorkflowConfig,
    pub spell_check: SpellCheckWorkflowConfig,
    pub security_checks: SecurityChecksWorkflowConfig,
    pub push_container_to_ghcr: PushContainerToGhcrConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GlobalWorkflowConfig {
    /// Discovered with `git symbolic-ref` when unset.
    pub default_branch: Option<String>,
    /// Taken from `go.mod` when unset.
    pub go_version: Option<String>,
    pub ignore_paths: Vec<String>,
    /// Derived from `metadata.url` when unset: anything not hosted on
    /// github.com runs on self-hosted runners.
    pub is_self_hosted_runner: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CiWorkflowConfig {
    pub enabled: bool,
    /// Explicit runner labels for the test job. More than one entry turns
    /// the job into a matrix over operating systems.
    pub run_on: Vec<String>,
    pub coveralls: bool,
    /// Inherits `global.ignorePaths` when unset.
    pub ignore_paths: Option<Vec<String>>,
    pub postgres: PostgresConfig,
    pub kubernetes_envtest: KubernetesEnvtestConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PostgresConfig {
    /// Defaults to whether `go.mod` pulls in a PostgreSQL driver.
    pub enabled: Option<bool>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct KubernetesEnvtestConfig {
    pub enabled: bool,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LicenseWorkflowConfig {
    pub enabled: bool,
    pub patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpellCheckWorkflowConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SecurityChecksWorkflowConfig {
    pub enabled: bool,
    /// Inherits `global.ignorePaths` when unset.
    pub ignore_paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PushContainerToGhcrConfig {
    pub enabled: bool,
}

/// Options for the generated `.github/renovate.json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenovateConfig {
    pub enabled: bool,
    pub assignees: Vec<String>,
    /// Taken from `go.mod` when unset.
    pub go_version: Option<String>,
    /// Kubernetes version of the target clusters, e.g. `1.26`.
    pub kubernetes_version: Option<String>,
    /// Module namespace that is grouped and automerged, e.g.
    /// `github.com/example`. Derived from the module path when unset.
    pub own_namespace: Option<String>,
    /// Appended after the built-in rules, in order.
    pub package_rules: Vec<PackageRule>,
}

/// A single entry of renovate's `packageRules`.
///
/// Field order is the order in which the keys appear in `renovate.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PackageRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub match_package_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub match_package_prefixes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub match_package_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_package_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(rename = "automerge", skip_serializing_if = "Option::is_none")]
    pub auto_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_versions: Option<String>,
}

/// Options for the generated `Dockerfile` and `.dockerignore`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DockerfileConfig {
    pub enabled: bool,
    /// Explicit entrypoint. Falls back to `/usr/bin/<first binary>`.
    pub entrypoint: Vec<String>,
    pub extra_directives: Vec<String>,
    pub extra_ignores: Vec<String>,
    pub extra_packages: Vec<String>,
    pub run_as_root: bool,
    /// Wrap the entrypoint in `linkerd-await --shutdown --`.
    pub with_linkerd_await: bool,
    /// Removed option, kept only so that old configs get a useful error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Parses a YAML string into a `Configuration`.
///
/// An empty document (or one consisting only of comments) yields the default
/// configuration, which generates nothing but the checks workflow skeleton.
pub fn parse(yaml_content: &str) -> Result<Configuration> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml_content).map_err(|e| {
        Error::ConfigParse {
            message: e.to_string(),
            hint: None,
        }
    })?;

    if value.is_null() {
        return Ok(Configuration::default());
    }

    serde_yaml::from_value(value).map_err(|e| {
        let message = e.to_string();
        let hint = message
            .contains("unknown field")
            .then(|| "check the spelling of the key; all keys are camelCase".to_string());
        Error::ConfigParse { message, hint }
    })
}

/// Parse a `Configuration` from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: Some("run cicd-maker in the repository root or pass --config <PATH>".to_string()),
    })?;
    parse(&content)
}
