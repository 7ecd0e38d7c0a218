//! Serialization of workflows and their staging into the output set.

use std::path::PathBuf;

use log::debug;

use super::{checks, ci, codeql, file_name_for, ghcr, Workflow};
use crate::constants::AUTOGENERATED_HEADER;
use crate::error::Result;
use crate::filesystem::OutputFS;
use crate::resolve::ResolvedConfig;

/// Directory the workflow files live in, relative to the repository root.
pub const WORKFLOW_DIR: &str = ".github/workflows";

/// Workflow files produced by earlier generations under names that no
/// longer exist.
pub const RETIRED_WORKFLOWS: [&str; 3] = ["dependency-review.yaml", "license.yaml", "spell.yaml"];

type Builder = fn(&ResolvedConfig) -> Option<Workflow>;

/// Display name and builder of every workflow kind, in generation order.
const BUILDERS: [(&str, Builder); 4] = [
    (checks::NAME, checks::build),
    (ci::NAME, ci::build),
    (codeql::NAME, codeql::build),
    (ghcr::NAME, ghcr::build),
];

/// Serializes a workflow: banner, blank line, YAML.
pub fn render(workflow: &Workflow) -> Result<String> {
    let yaml = crate::yaml::to_string(workflow)?;
    Ok(format!("{}\n\n{}", AUTOGENERATED_HEADER, yaml))
}

pub fn workflow_path(file_name: &str) -> PathBuf {
    PathBuf::from(WORKFLOW_DIR).join(file_name)
}

/// Stages every enabled workflow and marks the files of disabled and
/// retired workflows for deletion. Does nothing when `githubWorkflow` is
/// not configured.
pub fn stage(config: &ResolvedConfig, out: &mut OutputFS) -> Result<()> {
    if config.github_workflow().is_none() {
        return Ok(());
    }

    for retired in RETIRED_WORKFLOWS {
        out.remove_file(workflow_path(retired));
    }

    for (name, build) in BUILDERS {
        match build(config) {
            Some(workflow) => {
                out.add_file(workflow_path(&workflow.file_name()), render(&workflow)?)?;
            }
            None => {
                debug!("workflow {:?} is disabled", name);
                out.remove_file(workflow_path(&file_name_for(name)));
            }
        }
    }
    Ok(())
}
