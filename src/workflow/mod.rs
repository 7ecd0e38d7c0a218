//! # GitHub Actions Workflow Model
//!
//! In-memory representation of the generated workflows and the builders
//! that produce them. Each workflow kind lives in its own submodule as a
//! pure function `fn build(&ResolvedConfig) -> Option<Workflow>`:
//!
//! - [`checks`]: always emitted, individual steps gated by their flags
//! - [`ci`]: build, test and coverage jobs
//! - [`codeql`]: security scanning
//! - [`ghcr`]: container image push on tags
//!
//! [`render`] serializes the models and decides which stale files to remove.
//!
//! Field order of the structs below is the key order in the YAML output.

pub mod checks;
pub mod ci;
pub mod codeql;
pub mod ghcr;
pub mod render;

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::{
    CHECKOUT_ACTION, DEFAULT_GITHUB_COM_RUNNER_TYPE, DEFAULT_GITHUB_ENTERPRISE_RUNNER_TYPE,
    SETUP_GO_ACTION,
};

/// A single workflow file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workflow {
    pub name: String,
    pub on: Triggers,
    pub permissions: Permissions,
    /// Job id -> job, in output order.
    pub jobs: IndexMap<String, Job>,
}

impl Workflow {
    /// A workflow running on pushes to `default_branch` and on pull requests
    /// against any branch. Every workflow checks out the repository, so
    /// `contents: read` is granted up front; all other scopes stay `none`.
    pub fn new(name: impl Into<String>, default_branch: &str, ignore_paths: &[String]) -> Self {
        Self {
            name: name.into(),
            on: Triggers {
                push: Some(BranchFilter {
                    branches: vec![default_branch.to_string()],
                    tags: Vec::new(),
                    paths_ignore: ignore_paths.to_vec(),
                }),
                pull_request: Some(BranchFilter {
                    branches: vec!["*".to_string()],
                    tags: Vec::new(),
                    paths_ignore: ignore_paths.to_vec(),
                }),
                schedule: Vec::new(),
            },
            permissions: Permissions {
                contents: TokenScope::Read,
                ..Default::default()
            },
            jobs: IndexMap::new(),
        }
    }

    /// File name under `.github/workflows/`: the display name lowercased,
    /// spaces replaced with hyphens.
    pub fn file_name(&self) -> String {
        file_name_for(&self.name)
    }
}

/// See [`Workflow::file_name`].
pub fn file_name_for(display_name: &str) -> String {
    format!("{}.yaml", display_name.to_lowercase().replace(' ', "-"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Triggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<BranchFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<BranchFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<Cron>,
}

/// Branch, tag and path filters of a `push` or `pull_request` trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BranchFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub paths_ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cron {
    pub cron: String,
}

/// Access level of one `GITHUB_TOKEN` scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    #[default]
    None,
    Read,
    Write,
}

impl TokenScope {
    pub fn is_none(&self) -> bool {
        *self == TokenScope::None
    }

    /// Raises the scope to at least `level`. Never lowers it.
    pub fn widen(&mut self, level: TokenScope) {
        *self = (*self).max(level);
    }
}

/// `GITHUB_TOKEN` permissions of a workflow. Scopes left at `none` are
/// omitted, which GitHub treats as no access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Permissions {
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub actions: TokenScope,
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub checks: TokenScope,
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub contents: TokenScope,
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub packages: TokenScope,
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub pull_requests: TokenScope,
    #[serde(skip_serializing_if = "TokenScope::is_none")]
    pub security_events: TokenScope,
}

/// Runner selector of a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RunsOn {
    Label(String),
    Labels(Vec<String>),
}

impl RunsOn {
    /// The self-hosted label triple or the public-cloud default label.
    pub fn for_runner(is_self_hosted: bool) -> Self {
        if is_self_hosted {
            RunsOn::Labels(
                DEFAULT_GITHUB_ENTERPRISE_RUNNER_TYPE
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            )
        } else {
            RunsOn::Label(DEFAULT_GITHUB_COM_RUNNER_TYPE.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Job {
    pub name: String,
    pub runs_on: RunsOn,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub needs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub services: IndexMap<String, Service>,
    pub steps: Vec<Step>,
}

impl Job {
    /// A job whose first step checks out the repository.
    pub fn new(name: impl Into<String>, runs_on: RunsOn) -> Self {
        Self {
            name: name.into(),
            runs_on,
            needs: Vec::new(),
            strategy: None,
            services: IndexMap::new(),
            steps: vec![Step::uses("Check out code", CHECKOUT_ACTION)],
        }
    }

    /// [`Job::new`] followed by a Go toolchain setup step.
    pub fn with_go(name: impl Into<String>, runs_on: RunsOn, go_version: &str) -> Self {
        let mut job = Self::new(name, runs_on);
        job.add_step(
            Step::uses("Set up Go", SETUP_GO_ACTION)
                .with_input("go-version", go_version)
                .with_input("check-latest", true),
        );
        job
    }

    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    pub matrix: Matrix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    pub os: Vec<String>,
}

/// A service container attached to a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub image: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub env: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub options: String,
}

/// One step of a job: either an action invocation or an inline script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub name: String,
    /// Lets later steps refer to this step's outputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub kind: StepKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepKind {
    Action {
        uses: String,
        #[serde(skip_serializing_if = "IndexMap::is_empty")]
        with: IndexMap<String, serde_yaml::Value>,
    },
    Script {
        run: String,
    },
}

impl Step {
    pub fn uses(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            kind: StepKind::Action {
                uses: action.into(),
                with: IndexMap::new(),
            },
        }
    }

    /// An inline script; the lines are joined with newlines so that the
    /// YAML output keeps one command per line.
    pub fn run<S: AsRef<str>>(name: impl Into<String>, lines: &[S]) -> Self {
        let script = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            name: name.into(),
            id: None,
            kind: StepKind::Script { run: script },
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds an action input. No effect on script steps.
    #[must_use]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<serde_yaml::Value>) -> Self {
        if let StepKind::Action { with, .. } = &mut self.kind {
            with.insert(key.into(), value.into());
        }
        self
    }

    /// The action this step uses, if it is an action step.
    pub fn action(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Action { uses, .. } => Some(uses),
            StepKind::Script { .. } => None,
        }
    }

    /// The input `key` of an action step.
    pub fn input(&self, key: &str) -> Option<&serde_yaml::Value> {
        match &self.kind {
            StepKind::Action { with, .. } => with.get(key),
            StepKind::Script { .. } => None,
        }
    }

    /// The script of a script step.
    pub fn script(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Script { run } => Some(run),
            StepKind::Action { .. } => None,
        }
    }
}
