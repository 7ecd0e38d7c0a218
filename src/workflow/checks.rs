//! The `Checks` workflow: a single job bundling the fast linters, so that
//! they do not each need a workflow of their own.

use super::{Job, RunsOn, Step, TokenScope, Workflow};
use crate::constants::{
    DEPENDENCY_REVIEW_ACTION, GOLANGCI_LINT_ACTION, GOVULNCHECK_ACTION, MISSPELL_ACTION,
};
use crate::resolve::ResolvedConfig;

pub const NAME: &str = "Checks";

const DENIED_LICENSES: &str =
    "AGPL-1.0, AGPL-3.0, GPL-1.0, GPL-2.0, GPL-3.0, LGPL-2.0, LGPL-2.1, LGPL-3.0, BUSL-1.1";

/// Always emitted when workflows are configured at all.
pub fn build(config: &ResolvedConfig) -> Option<Workflow> {
    let gh = config.github_workflow()?;
    let self_hosted = config.is_self_hosted_runner();
    let default_branch = config.default_branch();

    let mut workflow = Workflow::new(NAME, default_branch, &[]);
    let mut job = Job::with_go(NAME, RunsOn::for_runner(self_hosted), config.workflow_go_version());

    job.add_step(
        Step::uses("Run golangci-lint", GOLANGCI_LINT_ACTION).with_input("version", "latest"),
    );

    // the hosted actions below are not available on self-hosted runners
    if gh.security_checks.enabled && !self_hosted {
        job.add_step(
            Step::uses("Dependency Review", DEPENDENCY_REVIEW_ACTION)
                .with_input(
                    "base-ref",
                    format!(
                        "${{{{ github.event.pull_request.base.sha || '{}' }}}}",
                        default_branch
                    ),
                )
                .with_input(
                    "head-ref",
                    "${{ github.event.pull_request.head.sha || github.ref }}",
                )
                .with_input("fail-on-severity", "moderate")
                .with_input("deny-licenses", DENIED_LICENSES),
        );
        job.add_step(Step::uses("Run govulncheck", GOVULNCHECK_ACTION));
    }

    if gh.spell_check.enabled && !self_hosted {
        // importas is a linter name, not a typo
        let mut ignore = vec!["importas".to_string()];
        ignore.extend(config.spell_check.ignore_words.iter().cloned());

        workflow.permissions.checks.widen(TokenScope::Write);
        job.add_step(
            Step::uses("Check for spelling errors", MISSPELL_ACTION)
                .with_input("exclude", "./vendor/*")
                .with_input("reporter", "github-check")
                .with_input("fail_on_error", true)
                .with_input("github_token", "${{ secrets.GITHUB_TOKEN }}")
                .with_input("ignore", ignore.join(",")),
        );
    }

    if gh.license.enabled {
        job.add_step(license_step(&gh.license.patterns, &gh.license.ignore_patterns));
    }

    workflow.jobs.insert("checks".to_string(), job);
    Some(workflow)
}

fn license_step(patterns: &[String], ignore_patterns: &[String]) -> Step {
    let patterns = if patterns.is_empty() {
        vec!["**/*.go".to_string()]
    } else {
        patterns.to_vec()
    };

    // quoted so that the shell does not expand them
    let ignores: Vec<String> = std::iter::once("vendor/**")
        .chain(ignore_patterns.iter().map(String::as_str))
        .map(|p| format!("-ignore {:?}", p))
        .collect();

    Step::run(
        "Check if source code files have license header",
        &[
            "shopt -s globstar".to_string(),
            "go install github.com/google/addlicense@latest".to_string(),
            format!(
                "addlicense --check {} -- {}",
                ignores.join(" "),
                patterns.join(" ")
            ),
        ],
    )
}
