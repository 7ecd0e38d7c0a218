//! Dependency-update policy (`.github/renovate.json`).
//!
//! The policy is a fixed preamble plus an ordered list of package rules. The
//! built-in rules always come first and the user's `renovate.packageRules`
//! are appended unmodified, so a user rule can refine anything a built-in
//! rule set up.

use log::debug;
use serde::Serialize;

use crate::config::PackageRule;
use crate::error::{Error, Result};
use crate::resolve::ResolvedConfig;
use crate::scan::{ScanResult, K8S_IO_PREFIX};

/// Where the policy is written, relative to the repository root.
pub const RENOVATE_CONFIG_PATH: &str = ".github/renovate.json";

const EXTENDS: [&str; 4] = [
    "config:base",
    "default:pinDigestsDisabled",
    "github>whitesource/merge-confidence:beta",
    "docker:disable",
];

/// `constraints` block of the policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraints {
    pub go: String,
}

/// The serialized policy document. Field order is output order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenovateConfig {
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    pub commit_message_action: String,
    pub constraints: Constraints,
    pub post_update_options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub package_rules: Vec<PackageRule>,
    pub pr_hourly_limit: u32,
    pub schedule: Vec<String>,
    pub semantic_commits: String,
}

impl RenovateConfig {
    /// Serializes to the on-disk format: two-space indented JSON with a
    /// trailing newline. `<` and `>` in `allowedVersions` stay literal.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Builds the policy from the resolved configuration and the scanned facts.
pub fn build(config: &ResolvedConfig, facts: &ScanResult) -> Result<RenovateConfig> {
    let go_version = major_minor(config.renovate_go_version());
    let own_namespace = match config.own_namespace() {
        Some(ns) => ns.to_string(),
        None => crate::resolve::namespace_of(facts.require_module_path()?),
    };

    let mut rules = vec![
        PackageRule {
            match_package_names: vec!["golang".to_string()],
            allowed_versions: Some(format!("{}.x", go_version)),
            ..Default::default()
        },
        PackageRule {
            match_package_patterns: vec![namespace_pattern(&own_namespace)],
            group_name: Some(own_namespace.clone()),
            auto_merge: Some(true),
            ..Default::default()
        },
        PackageRule {
            match_package_patterns: vec![".*".to_string()],
            exclude_package_patterns: vec![namespace_pattern(&own_namespace)],
            group_name: Some("External dependencies".to_string()),
            auto_merge: Some(false),
            ..Default::default()
        },
    ];

    if facts.has_k8s_io_deps {
        rules.push(PackageRule {
            match_package_prefixes: vec![K8S_IO_PREFIX.to_string()],
            allowed_versions: Some(k8s_io_allowed_versions(config.kubernetes_version())?),
            ..Default::default()
        });
    }

    rules.extend(config.renovate.package_rules.iter().cloned());
    debug!(
        "renovate: {} package rules ({} from config)",
        rules.len(),
        config.renovate.package_rules.len()
    );

    let post_update_options = if go_version == "1.17" {
        ["gomodTidy1.17", "gomodUpdateImportPaths"]
    } else {
        ["gomodTidy", "gomodUpdateImportPaths"]
    };

    Ok(RenovateConfig {
        extends: EXTENDS.iter().map(|s| s.to_string()).collect(),
        assignees: config.renovate.assignees.clone(),
        commit_message_action: "Renovate: Update".to_string(),
        constraints: Constraints {
            go: go_version.to_string(),
        },
        post_update_options: post_update_options.iter().map(|s| s.to_string()).collect(),
        package_rules: rules,
        pr_hourly_limit: 0,
        schedule: vec![schedule(config.is_internal_instance(), config.is_application()).to_string()],
        semantic_commits: "disabled".to_string(),
    })
}

/// Weekly PR window. Libraries update a day ahead of applications so their
/// updates reach the applications in the same week.
pub fn schedule(is_internal: bool, is_application: bool) -> &'static str {
    match (is_internal, is_application) {
        (false, true) => "before 8am on Friday",
        (true, true) => "on Friday",
        (false, false) => "before 8am on Thursday",
        (true, false) => "on Thursday",
    }
}

/// Regex matching every module below `namespace`.
fn namespace_pattern(namespace: &str) -> String {
    format!("^{}/.*", regex::escape(namespace))
}

/// `1.21.4` -> `1.21`; versions with fewer components are returned as is.
fn major_minor(version: &str) -> &str {
    match version.match_indices('.').nth(1) {
        Some((idx, _)) => &version[..idx],
        None => version,
    }
}

/// Client libraries under `k8s.io/` are versioned `v0.<minor>.x` for
/// Kubernetes `1.<minor>`. Clusters support one minor version of skew, so
/// the allowed range is one minor ahead of the cluster version.
///
/// # Examples
///
/// ```
/// use cicd_maker::renovate::k8s_io_allowed_versions;
///
/// assert_eq!(k8s_io_allowed_versions("1.26").unwrap(), "0.27.x");
/// assert!(k8s_io_allowed_versions("v1").is_err());
/// ```
pub fn k8s_io_allowed_versions(kubernetes_version: &str) -> Result<String> {
    let invalid = || {
        Error::invalid_config(
            "renovate.kubernetesVersion",
            format!(
                "{:?} is not a valid Kubernetes version, expected something like \"1.26\"",
                kubernetes_version
            ),
        )
    };

    let mut parts = kubernetes_version.trim().split('.');
    let major: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(invalid)?;
    let minor: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(invalid)?;
    if major == 0 || parts.count() > 1 {
        return Err(invalid());
    }
    let next_minor = minor.checked_add(1).ok_or_else(invalid)?;

    Ok(format!("{}.{}.x", major - 1, next_minor))
}
