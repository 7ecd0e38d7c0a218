//! Version-control queries.
//!
//! The resolver needs exactly one fact from git: the name of the remote's
//! default branch. It asks through the [`VersionControl`] trait so tests can
//! answer without a real checkout; [`SystemGit`] is the implementation that
//! shells out to the `git` binary.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Ref prefix of remote-tracking branches of `origin`.
pub const REMOTE_REF_PREFIX: &str = "refs/remotes/origin/";

/// Trait for version-control queries - allows mocking in tests
pub trait VersionControl {
    /// Returns the symbolic ref that `origin/HEAD` points to, e.g.
    /// `refs/remotes/origin/main`, exactly as git prints it.
    fn remote_head(&self) -> Result<String>;
}

/// [`VersionControl`] backed by the system `git` command, which
/// automatically respects the user's git configuration.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_dir: PathBuf,
}

impl SystemGit {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }
}

impl VersionControl for SystemGit {
    fn remote_head(&self) -> Result<String> {
        let args = ["symbolic-ref", "refs/remotes/origin/HEAD"];
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| Error::GitCommand {
                command: args.join(" "),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitCommand {
                command: args.join(" "),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Turns the output of `git symbolic-ref refs/remotes/origin/HEAD` into a
/// branch name.
///
/// # Examples
///
/// ```
/// use cicd_maker::git::branch_from_remote_head;
///
/// assert_eq!(branch_from_remote_head("refs/remotes/origin/main\n").unwrap(), "main");
/// assert!(branch_from_remote_head("main").is_err());
/// ```
pub fn branch_from_remote_head(output: &str) -> Result<String> {
    let branch = output
        .strip_prefix(REMOTE_REF_PREFIX)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| Error::DefaultBranchMalformed {
            output: output.to_string(),
        })?;
    Ok(branch.to_string())
}
