//! The `Container Registry GHCR` workflow: builds the container image for
//! every pushed tag and publishes it to ghcr.io.

use super::{BranchFilter, Job, RunsOn, Step, TokenScope, Workflow};
use crate::constants::{DOCKER_BUILD_PUSH_ACTION, DOCKER_LOGIN_ACTION, DOCKER_METADATA_ACTION};
use crate::resolve::ResolvedConfig;

pub const NAME: &str = "Container Registry GHCR";

const REGISTRY: &str = "ghcr.io";

const IMAGE_TAGS: &str = "\
# https://github.com/docker/metadata-action#latest-tag
type=raw,value=latest,enable={{is_default_branch}}
# https://github.com/docker/metadata-action#typesemver
type=semver,pattern={{raw}}
type=semver,pattern=v{{major}}.{{minor}}
type=semver,pattern=v{{major}}";

pub fn build(config: &ResolvedConfig) -> Option<Workflow> {
    let gh = config.github_workflow()?;
    if !gh.push_container_to_ghcr.enabled {
        return None;
    }

    let mut workflow = Workflow::new(NAME, config.default_branch(), &[]);
    workflow.on.push = Some(BranchFilter {
        tags: vec!["*".to_string()],
        ..Default::default()
    });
    workflow.on.pull_request = None;
    workflow.permissions.contents.widen(TokenScope::Read);
    workflow.permissions.packages.widen(TokenScope::Write);

    let mut job = Job::new(
        "Push container to ghcr.io",
        RunsOn::for_runner(config.is_self_hosted_runner()),
    );
    job.add_step(
        Step::uses("Log in to the Container registry", DOCKER_LOGIN_ACTION)
            .with_input("registry", REGISTRY)
            .with_input("username", "${{ github.actor }}")
            .with_input("password", "${{ secrets.GITHUB_TOKEN }}"),
    );
    job.add_step(
        Step::uses("Extract metadata (tags, labels) for Docker", DOCKER_METADATA_ACTION)
            .with_id("meta")
            .with_input("images", format!("{}/${{{{ github.repository }}}}", REGISTRY))
            .with_input("tags", IMAGE_TAGS),
    );
    job.add_step(
        Step::uses("Build and push Docker image", DOCKER_BUILD_PUSH_ACTION)
            .with_input("context", ".")
            .with_input("push", true)
            .with_input("tags", "${{ steps.meta.outputs.tags }}")
            .with_input("labels", "${{ steps.meta.outputs.labels }}"),
    );

    workflow.jobs.insert("build-and-push-image".to_string(), job);
    Some(workflow)
}
