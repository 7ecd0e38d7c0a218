//! # Configuration Resolution
//!
//! Turns the raw [`Configuration`] read from `cicd-maker.yaml` into a
//! [`ResolvedConfig`]: every cross-field rule is checked and every
//! derived default is filled in. The builders only accept a
//! `&ResolvedConfig`, so they can never observe a half-validated tree.
//!
//! ## Checks, in order
//!
//! 1. `dockerfile.user` is a removed option and is rejected.
//! 2. `dockerfile.enabled` requires `metadata.url`, and requires either an
//!    explicit `dockerfile.entrypoint` or at least one binary.
//! 3. `golangciLint.errcheckExcludes` / `skipDirs` require
//!    `golangciLint.createConfig`.
//! 4. When `githubWorkflow` is present:
//!    - `metadata.url` must be set;
//!    - an unset `global.defaultBranch` is asked from git;
//!    - `ci.postgres` and `ci.kubernetesEnvtest` require `ci.enabled` and,
//!      if `ci.runOn` is given, exactly one Ubuntu runner.
//!
//! ## Derived defaults
//!
//! Go versions come from `go.mod`, the runner class and the renovate
//! schedule come from the host in `metadata.url`, workflow `ignorePaths`
//! inherit from `global.ignorePaths`, and the renovate namespace comes from
//! the module path.

use std::ops::Deref;

use log::debug;

use crate::config::{Configuration, GithubWorkflowConfig};
use crate::constants::{
    DEFAULT_GO_VERSION, DEFAULT_K8S_ENVTEST_VERSION, DEFAULT_K8S_VERSION,
    DEFAULT_POSTGRES_VERSION, GITHUB_COM_HOST,
};
use crate::error::{Error, Result};
use crate::git::{branch_from_remote_head, VersionControl};
use crate::scan::ScanResult;

/// A configuration that passed validation and has all defaults applied.
///
/// Dereferences to the underlying [`Configuration`]; the accessor methods
/// return the resolved values of the fields that were optional in the raw
/// tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    config: Configuration,
    is_internal_instance: bool,
}

impl Deref for ResolvedConfig {
    type Target = Configuration;

    fn deref(&self) -> &Configuration {
        &self.config
    }
}

impl ResolvedConfig {
    /// The resolved workflow block, if workflows are configured at all.
    pub fn github_workflow(&self) -> Option<&GithubWorkflowConfig> {
        self.config.github_workflow.as_ref()
    }

    /// Default branch of the repository. Empty when no workflows are
    /// configured.
    pub fn default_branch(&self) -> &str {
        self.github_workflow()
            .and_then(|gh| gh.global.default_branch.as_deref())
            .unwrap_or_default()
    }

    /// Go version used by the workflows.
    pub fn workflow_go_version(&self) -> &str {
        self.github_workflow()
            .and_then(|gh| gh.global.go_version.as_deref())
            .unwrap_or(DEFAULT_GO_VERSION)
    }

    pub fn is_self_hosted_runner(&self) -> bool {
        self.github_workflow()
            .and_then(|gh| gh.global.is_self_hosted_runner)
            .unwrap_or(self.is_internal_instance)
    }

    pub fn ci_ignore_paths(&self) -> &[String] {
        self.github_workflow()
            .and_then(|gh| gh.ci.ignore_paths.as_deref())
            .unwrap_or_default()
    }

    pub fn security_checks_ignore_paths(&self) -> &[String] {
        self.github_workflow()
            .and_then(|gh| gh.security_checks.ignore_paths.as_deref())
            .unwrap_or_default()
    }

    pub fn postgres_enabled(&self) -> bool {
        self.github_workflow()
            .and_then(|gh| gh.ci.postgres.enabled)
            .unwrap_or(false)
    }

    pub fn postgres_version(&self) -> &str {
        self.github_workflow()
            .and_then(|gh| gh.ci.postgres.version.as_deref())
            .unwrap_or(DEFAULT_POSTGRES_VERSION)
    }

    pub fn kubernetes_envtest_version(&self) -> &str {
        self.github_workflow()
            .and_then(|gh| gh.ci.kubernetes_envtest.version.as_deref())
            .unwrap_or(DEFAULT_K8S_ENVTEST_VERSION)
    }

    /// Go version that renovate is constrained to.
    pub fn renovate_go_version(&self) -> &str {
        self.config
            .renovate
            .go_version
            .as_deref()
            .unwrap_or(DEFAULT_GO_VERSION)
    }

    pub fn kubernetes_version(&self) -> &str {
        self.config
            .renovate
            .kubernetes_version
            .as_deref()
            .unwrap_or(DEFAULT_K8S_VERSION)
    }

    /// Module namespace grouped and automerged by renovate. Only resolved
    /// when renovate is enabled.
    pub fn own_namespace(&self) -> Option<&str> {
        self.config.renovate.own_namespace.as_deref()
    }

    /// Whether the repository is hosted somewhere other than github.com.
    pub fn is_internal_instance(&self) -> bool {
        self.is_internal_instance
    }

    /// Application repos declare binaries; library repos do not.
    pub fn is_application(&self) -> bool {
        !self.config.binaries.is_empty()
    }
}

/// Validates `raw` and fills in all derived defaults.
///
/// `vcs` is only queried when workflows are configured without an explicit
/// `githubWorkflow.global.defaultBranch`.
pub fn resolve(
    raw: Configuration,
    facts: &ScanResult,
    vcs: &dyn VersionControl,
) -> Result<ResolvedConfig> {
    let mut config = raw;

    validate_dockerfile(&config)?;
    validate_golangci_lint(&config)?;

    let is_internal_instance = is_internal_url(&config.metadata.url);

    let url_missing = config.metadata.url.is_empty();
    if let Some(gh) = config.github_workflow.as_mut() {
        if url_missing {
            return Err(Error::invalid_config(
                "metadata.url",
                "must be set when githubWorkflow is configured (it selects the runner class)",
            ));
        }
        resolve_default_branch(gh, vcs)?;
        validate_ci_services(gh)?;
        apply_workflow_defaults(gh, facts, is_internal_instance);
        debug!(
            "resolved githubWorkflow: defaultBranch={:?} goVersion={:?} selfHosted={:?}",
            gh.global.default_branch, gh.global.go_version, gh.global.is_self_hosted_runner
        );
    }

    let renovate = &mut config.renovate;
    if renovate.go_version.is_none() {
        renovate.go_version = Some(
            facts
                .go_version
                .clone()
                .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string()),
        );
    }
    if renovate.kubernetes_version.is_none() {
        renovate.kubernetes_version = Some(DEFAULT_K8S_VERSION.to_string());
    }
    if renovate.enabled && renovate.own_namespace.is_none() {
        let namespace = namespace_of(facts.require_module_path()?);
        debug!("derived renovate.ownNamespace = {}", namespace);
        renovate.own_namespace = Some(namespace);
    }

    Ok(ResolvedConfig {
        config,
        is_internal_instance,
    })
}

fn validate_dockerfile(config: &Configuration) -> Result<()> {
    let dockerfile = &config.dockerfile;

    if let Some(user) = &dockerfile.user {
        let message = if user == "root" {
            "option has been removed; set `dockerfile.runAsRoot` if you need to run as root"
        } else {
            "option has been removed; commands now run as user `appuser` (ID 4200) in group `appgroup` (ID 4200)"
        };
        return Err(Error::invalid_config("dockerfile.user", message));
    }

    if !dockerfile.enabled {
        return Ok(());
    }
    if config.metadata.url.is_empty() {
        return Err(Error::invalid_config(
            "metadata.url",
            "must be set when dockerfile.enabled is 'true' (it is used for the image labels)",
        ));
    }
    if dockerfile.entrypoint.is_empty() && config.binaries.is_empty() {
        return Err(Error::invalid_config(
            "dockerfile.entrypoint",
            "must be set when dockerfile.enabled is 'true' and no binaries are declared",
        ));
    }
    Ok(())
}

fn validate_golangci_lint(config: &Configuration) -> Result<()> {
    let lint = &config.golangci_lint;
    if lint.create_config {
        return Ok(());
    }
    if !lint.errcheck_excludes.is_empty() {
        return Err(Error::invalid_config(
            "golangciLint.createConfig",
            "needs to be set to 'true' if golangciLint.errcheckExcludes is defined",
        ));
    }
    if !lint.skip_dirs.is_empty() {
        return Err(Error::invalid_config(
            "golangciLint.createConfig",
            "needs to be set to 'true' if golangciLint.skipDirs is defined",
        ));
    }
    Ok(())
}

fn resolve_default_branch(gh: &mut GithubWorkflowConfig, vcs: &dyn VersionControl) -> Result<()> {
    if gh.global.default_branch.as_deref().is_some_and(|b| !b.is_empty()) {
        return Ok(());
    }
    let output = vcs
        .remote_head()
        .map_err(|e| Error::DefaultBranchUndetermined {
            reason: e.to_string(),
        })?;
    let branch = branch_from_remote_head(&output)?;
    debug!("default branch from git: {}", branch);
    gh.global.default_branch = Some(branch);
    Ok(())
}

fn validate_ci_services(gh: &GithubWorkflowConfig) -> Result<()> {
    let ci = &gh.ci;
    let services = [
        ("githubWorkflow.ci.postgres.enabled", ci.postgres.enabled == Some(true)),
        (
            "githubWorkflow.ci.kubernetesEnvtest.enabled",
            ci.kubernetes_envtest.enabled,
        ),
    ];

    for (field, enabled) in services {
        if !enabled {
            continue;
        }
        if !ci.enabled {
            return Err(Error::invalid_config(
                "githubWorkflow.ci.enabled",
                format!("needs to be set to 'true' when {} is 'true'", field),
            ));
        }
        if !run_on_supports_services(&ci.run_on) {
            return Err(Error::invalid_config(
                "githubWorkflow.ci.runOn",
                format!(
                    "must only define a single Ubuntu based runner when {} is 'true'",
                    field
                ),
            ));
        }
    }
    Ok(())
}

/// Service containers only work on a single Linux runner.
fn run_on_supports_services(run_on: &[String]) -> bool {
    match run_on {
        [] => true,
        [only] => only.starts_with("ubuntu"),
        _ => false,
    }
}

fn apply_workflow_defaults(gh: &mut GithubWorkflowConfig, facts: &ScanResult, is_internal: bool) {
    let global = &mut gh.global;
    if global.go_version.is_none() {
        global.go_version = Some(
            facts
                .go_version
                .clone()
                .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string()),
        );
    }
    if global.is_self_hosted_runner.is_none() {
        global.is_self_hosted_runner = Some(is_internal);
    }

    // workflow-level settings inherit from global, they do not override it
    if gh.ci.ignore_paths.is_none() {
        gh.ci.ignore_paths = Some(gh.global.ignore_paths.clone());
    }
    if gh.security_checks.ignore_paths.is_none() {
        gh.security_checks.ignore_paths = Some(gh.global.ignore_paths.clone());
    }

    let ci = &mut gh.ci;
    if ci.postgres.enabled.is_none() {
        let enabled = facts.uses_postgres && ci.enabled && run_on_supports_services(&ci.run_on);
        if enabled {
            debug!("enabling githubWorkflow.ci.postgres because go.mod requires a PostgreSQL driver");
        }
        ci.postgres.enabled = Some(enabled);
    }
    if ci.postgres.version.is_none() {
        ci.postgres.version = Some(DEFAULT_POSTGRES_VERSION.to_string());
    }
    if ci.kubernetes_envtest.version.is_none() {
        ci.kubernetes_envtest.version = Some(DEFAULT_K8S_ENVTEST_VERSION.to_string());
    }
}

/// Reports whether `url` points somewhere other than github.com. An empty
/// URL counts as public. Scheme-less values such as `github.com/org/repo`
/// are accepted and classified by their leading host segment.
fn is_internal_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }
    let host = match url::Url::parse(url) {
        Ok(parsed) if parsed.host_str().is_some() => parsed.host_str().map(str::to_string),
        _ => leading_host(url),
    };
    debug!("metadata.url {:?} has host {:?}", url, host);
    host.as_deref() != Some(GITHUB_COM_HOST)
}

/// The text between an optional `scheme://` and the first `/`, lowercased.
fn leading_host(url: &str) -> Option<String> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let host = rest.split('/').next().unwrap_or_default().trim();
    (!host.is_empty()).then(|| host.to_ascii_lowercase())
}

/// The namespace a module belongs to: host plus organization for
/// `host/org/repo` paths, the host alone for shorter ones.
///
/// # Examples
///
/// ```
/// use cicd_maker::resolve::namespace_of;
///
/// assert_eq!(namespace_of("github.com/example/svc/v2"), "github.com/example");
/// assert_eq!(namespace_of("example.com/svc"), "example.com");
/// ```
pub fn namespace_of(module_path: &str) -> String {
    let segments: Vec<&str> = module_path.split('/').collect();
    let keep = segments.len().saturating_sub(1).clamp(1, 2);
    segments[..keep].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse;
    use std::cell::Cell;

    /// Answers `remote_head` with a canned response and counts calls.
    struct FakeGit {
        answer: std::result::Result<&'static str, &'static str>,
        calls: Cell<usize>,
    }

    impl FakeGit {
        fn head(output: &'static str) -> Self {
            Self {
                answer: Ok(output),
                calls: Cell::new(0),
            }
        }

        fn failing(stderr: &'static str) -> Self {
            Self {
                answer: Err(stderr),
                calls: Cell::new(0),
            }
        }
    }

    impl VersionControl for FakeGit {
        fn remote_head(&self) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            match self.answer {
                Ok(output) => Ok(output.to_string()),
                Err(stderr) => Err(Error::GitCommand {
                    command: "symbolic-ref refs/remotes/origin/HEAD".to_string(),
                    stderr: stderr.to_string(),
                }),
            }
        }
    }

    fn facts() -> ScanResult {
        ScanResult {
            module_path: Some("github.com/example/svc".to_string()),
            go_version: Some("1.22".to_string()),
            ..Default::default()
        }
    }

    fn resolve_yaml(yaml: &str) -> Result<ResolvedConfig> {
        resolve(parse(yaml).unwrap(), &facts(), &FakeGit::head("refs/remotes/origin/main\n"))
    }

    fn field_of(err: Error) -> String {
        match err {
            Error::InvalidConfig { field, .. } => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_config_resolves() {
        let git = FakeGit::failing("should not be called");
        let resolved = resolve(Configuration::default(), &facts(), &git).unwrap();
        assert_eq!(git.calls.get(), 0);
        assert!(resolved.github_workflow().is_none());
        assert_eq!(resolved.default_branch(), "");
        assert_eq!(resolved.renovate_go_version(), "1.22");
        assert!(!resolved.is_application());
    }

    #[test]
    fn test_dockerfile_requires_url() {
        let err = resolve_yaml("binaries: [{name: svc}]\ndockerfile:\n  enabled: true\n").unwrap_err();
        assert_eq!(field_of(err), "metadata.url");

        let resolved = resolve_yaml(
            "metadata:\n  url: https://github.com/example/svc\nbinaries: [{name: svc}]\ndockerfile:\n  enabled: true\n",
        );
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_dockerfile_requires_entrypoint_or_binary() {
        let err = resolve_yaml(
            "metadata:\n  url: https://github.com/example/svc\ndockerfile:\n  enabled: true\n",
        )
        .unwrap_err();
        assert_eq!(field_of(err), "dockerfile.entrypoint");

        let resolved = resolve_yaml(
            "metadata:\n  url: https://github.com/example/svc\ndockerfile:\n  enabled: true\n  entrypoint: [/bin/sh]\n",
        );
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_dockerfile_user_is_rejected() {
        let err = resolve_yaml("dockerfile:\n  user: root\n").unwrap_err();
        assert!(err.to_string().contains("dockerfile.runAsRoot"));

        let err = resolve_yaml("dockerfile:\n  user: nobody\n").unwrap_err();
        assert!(err.to_string().contains("appuser"));
    }

    #[test]
    fn test_errcheck_excludes_require_create_config() {
        let err = resolve_yaml("golangciLint:\n  errcheckExcludes: [io.Copy]\n").unwrap_err();
        assert_eq!(field_of(err), "golangciLint.createConfig");

        let resolved =
            resolve_yaml("golangciLint:\n  createConfig: true\n  errcheckExcludes: [io.Copy]\n");
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_skip_dirs_require_create_config() {
        let err = resolve_yaml("golangciLint:\n  skipDirs: [generated]\n").unwrap_err();
        assert!(err.to_string().contains("skipDirs"));
    }

    #[test]
    fn test_workflows_require_url() {
        let err = resolve_yaml("githubWorkflow:\n  global:\n    defaultBranch: main\n").unwrap_err();
        assert_eq!(field_of(err), "metadata.url");
    }

    #[test]
    fn test_default_branch_from_git() {
        let resolved = resolve_yaml(
            "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n",
        )
        .unwrap();
        assert_eq!(resolved.default_branch(), "main");
    }

    #[test]
    fn test_explicit_default_branch_skips_git() {
        let git = FakeGit::failing("should not be called");
        let config = parse(
            "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  global:\n    defaultBranch: trunk\n",
        )
        .unwrap();
        let resolved = resolve(config, &facts(), &git).unwrap();
        assert_eq!(git.calls.get(), 0);
        assert_eq!(resolved.default_branch(), "trunk");
    }

    #[test]
    fn test_default_branch_git_failure() {
        let config =
            parse("metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n").unwrap();
        let err = resolve(config, &facts(), &FakeGit::failing("not a git repository")).unwrap_err();
        assert!(matches!(err, Error::DefaultBranchUndetermined { .. }));
        let message = err.to_string();
        assert!(message.contains("defaultBranch"));
        assert!(message.contains("not a git repository"));
    }

    #[test]
    fn test_default_branch_malformed_output() {
        let config =
            parse("metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n").unwrap();
        let err = resolve(config, &facts(), &FakeGit::head("HEAD\n")).unwrap_err();
        assert!(matches!(err, Error::DefaultBranchMalformed { .. }));
        assert!(err.to_string().contains("defaultBranch"));
    }

    #[test]
    fn test_postgres_requires_ci_enabled() {
        let base = "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  ci:\n";
        let err = resolve_yaml(&format!("{base}    postgres:\n      enabled: true\n")).unwrap_err();
        assert_eq!(field_of(err), "githubWorkflow.ci.enabled");

        let resolved = resolve_yaml(&format!(
            "{base}    enabled: true\n    postgres:\n      enabled: true\n"
        ))
        .unwrap();
        assert!(resolved.postgres_enabled());
        assert_eq!(resolved.postgres_version(), "12");
    }

    #[test]
    fn test_envtest_requires_ci_enabled() {
        let base = "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  ci:\n";
        let err = resolve_yaml(&format!("{base}    kubernetesEnvtest:\n      enabled: true\n"))
            .unwrap_err();
        assert_eq!(field_of(err), "githubWorkflow.ci.enabled");

        assert!(resolve_yaml(&format!(
            "{base}    enabled: true\n    kubernetesEnvtest:\n      enabled: true\n"
        ))
        .is_ok());
    }

    #[test]
    fn test_services_require_single_ubuntu_runner() {
        let base = "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  ci:\n    enabled: true\n    postgres:\n      enabled: true\n";

        let err = resolve_yaml(&format!("{base}    runOn: [macos-latest]\n")).unwrap_err();
        assert_eq!(field_of(err), "githubWorkflow.ci.runOn");

        let err =
            resolve_yaml(&format!("{base}    runOn: [ubuntu-latest, ubuntu-22.04]\n")).unwrap_err();
        assert_eq!(field_of(err), "githubWorkflow.ci.runOn");

        assert!(resolve_yaml(&format!("{base}    runOn: [ubuntu-22.04]\n")).is_ok());
    }

    #[test]
    fn test_postgres_defaults_from_facts() {
        let yaml = "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  ci:\n    enabled: true\n";
        let mut with_pq = facts();
        with_pq.uses_postgres = true;
        let git = FakeGit::head("refs/remotes/origin/main");

        let resolved = resolve(parse(yaml).unwrap(), &with_pq, &git).unwrap();
        assert!(resolved.postgres_enabled());

        let resolved = resolve(parse(yaml).unwrap(), &facts(), &git).unwrap();
        assert!(!resolved.postgres_enabled());

        // explicit false wins over the fact
        let explicit = format!("{yaml}    postgres:\n      enabled: false\n");
        let resolved = resolve(parse(&explicit).unwrap(), &with_pq, &git).unwrap();
        assert!(!resolved.postgres_enabled());
    }

    #[test]
    fn test_ignore_paths_inherit_from_global() {
        let resolved = resolve_yaml(
            "metadata:\n  url: https://github.com/example/svc\ngithubWorkflow:\n  global:\n    ignorePaths: ['**.md']\n  securityChecks:\n    ignorePaths: []\n",
        )
        .unwrap();
        assert_eq!(resolved.ci_ignore_paths(), ["**.md".to_string()]);
        // an explicit empty list is not overridden
        assert!(resolved.security_checks_ignore_paths().is_empty());
    }

    #[test]
    fn test_runner_class_from_url() {
        let public = resolve_yaml("metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n")
            .unwrap();
        assert!(!public.is_self_hosted_runner());
        assert!(!public.is_internal_instance());

        let internal =
            resolve_yaml("metadata:\n  url: https://github.example.corp/team/svc\ngithubWorkflow: {}\n")
                .unwrap();
        assert!(internal.is_self_hosted_runner());
        assert!(internal.is_internal_instance());

        let overridden = resolve_yaml(
            "metadata:\n  url: https://github.example.corp/team/svc\ngithubWorkflow:\n  global:\n    isSelfHostedRunner: false\n",
        )
        .unwrap();
        assert!(!overridden.is_self_hosted_runner());
    }

    #[test]
    fn test_scheme_less_url_is_classified_by_host() {
        let public = resolve_yaml("metadata:\n  url: github.com/example/svc\ngithubWorkflow: {}\n")
            .unwrap();
        assert!(!public.is_internal_instance());
        assert!(!public.is_self_hosted_runner());

        let internal =
            resolve_yaml("metadata:\n  url: github.example.corp/team/svc\ngithubWorkflow: {}\n")
                .unwrap();
        assert!(internal.is_internal_instance());
        assert!(internal.is_self_hosted_runner());

        let renovate_only = resolve_yaml("metadata:\n  url: not a url\nrenovate:\n  enabled: true\n");
        assert!(renovate_only.is_ok());
    }

    #[test]
    fn test_leading_host() {
        assert_eq!(leading_host("github.com/example/svc").as_deref(), Some("github.com"));
        assert_eq!(leading_host("ssh://GitHub.com/x").as_deref(), Some("github.com"));
        assert_eq!(leading_host("/no/host"), None);
    }

    #[test]
    fn test_go_version_defaults() {
        let resolved = resolve_yaml("metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n")
            .unwrap();
        assert_eq!(resolved.workflow_go_version(), "1.22");

        let no_go = ScanResult::default();
        let config =
            parse("metadata:\n  url: https://github.com/example/svc\ngithubWorkflow: {}\n").unwrap();
        let resolved = resolve(config, &no_go, &FakeGit::head("refs/remotes/origin/main")).unwrap();
        assert_eq!(resolved.workflow_go_version(), DEFAULT_GO_VERSION);
        assert_eq!(resolved.renovate_go_version(), DEFAULT_GO_VERSION);
    }

    #[test]
    fn test_renovate_namespace_derived_from_module() {
        let resolved = resolve_yaml("renovate:\n  enabled: true\n").unwrap();
        assert_eq!(resolved.own_namespace(), Some("github.com/example"));

        let resolved =
            resolve_yaml("renovate:\n  enabled: true\n  ownNamespace: github.com/other\n").unwrap();
        assert_eq!(resolved.own_namespace(), Some("github.com/other"));
    }

    #[test]
    fn test_renovate_requires_module_path() {
        let config = parse("renovate:\n  enabled: true\n").unwrap();
        let err = resolve(config, &ScanResult::default(), &FakeGit::head("")).unwrap_err();
        assert!(matches!(err, Error::MissingModulePath { .. }));
    }

    #[test]
    fn test_namespace_of() {
        assert_eq!(namespace_of("github.com/example/svc"), "github.com/example");
        assert_eq!(namespace_of("example.com/svc"), "example.com");
        assert_eq!(namespace_of("svc"), "svc");
    }
}
