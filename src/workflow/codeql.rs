//! The `CodeQL` workflow.

use super::{Cron, Job, RunsOn, Step, TokenScope, Workflow};
use crate::constants::{CODEQL_ANALYZE_ACTION, CODEQL_AUTOBUILD_ACTION, CODEQL_INIT_ACTION};
use crate::resolve::ResolvedConfig;

pub const NAME: &str = "CodeQL";

/// Mondays, 07:00 UTC.
const WEEKLY_SCAN: &str = "00 07 * * 1";

pub fn build(config: &ResolvedConfig) -> Option<Workflow> {
    let gh = config.github_workflow()?;
    if !gh.security_checks.enabled {
        return None;
    }

    let default_branch = config.default_branch();
    let mut workflow = Workflow::new(
        NAME,
        default_branch,
        config.security_checks_ignore_paths(),
    );
    if let Some(pr) = workflow.on.pull_request.as_mut() {
        pr.branches = vec![default_branch.to_string()];
    }
    workflow.on.schedule.push(Cron {
        cron: WEEKLY_SCAN.to_string(),
    });
    workflow.permissions.actions.widen(TokenScope::Read);
    workflow.permissions.contents.widen(TokenScope::Read);
    workflow.permissions.security_events.widen(TokenScope::Write);

    let mut job = Job::with_go(
        NAME,
        RunsOn::for_runner(config.is_self_hosted_runner()),
        config.workflow_go_version(),
    );
    job.add_step(
        Step::uses("Initialize CodeQL", CODEQL_INIT_ACTION)
            .with_input("languages", "go")
            .with_input("queries", "security-extended"),
    );
    job.add_step(Step::uses("Autobuild", CODEQL_AUTOBUILD_ACTION));
    job.add_step(Step::uses("Perform CodeQL Analysis", CODEQL_ANALYZE_ACTION));

    workflow.jobs.insert("analyze".to_string(), job);
    Some(workflow)
}
