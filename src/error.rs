//! # Error Handling
//!
//! This module defines the single error type used by the `cicd-maker`
//! library. It uses `thiserror` to describe every way the generator can
//! refuse to produce artifacts.
//!
//! The variants fall into three groups:
//!
//! - **Configuration errors** (`ConfigParse`, `InvalidConfig`): the input
//!   document is malformed or violates a cross-field rule. The message names
//!   the offending field and how to fix it.
//! - **Collaborator failures** (`ManifestParse`, `MissingModulePath`,
//!   `DefaultBranchUndetermined`, `DefaultBranchMalformed`, `GitCommand`,
//!   `Filesystem`): something outside the configuration (the
//!   `go.mod` file, the git checkout, the disk) could not deliver what the
//!   generator needs.
//! - **Serialization failures** (`Yaml`, `Json`): wrapped library errors.
//!
//! None of these are retried. Every failure is a configuration or
//! environment problem; the fix is always to correct the input and rerun.

use thiserror::Error;

/// Main error type for cicd-maker operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The configuration parsed, but a field (or a combination of fields)
    /// is not acceptable.
    #[error("Invalid configuration: {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// The `go.mod` file is malformed.
    #[error("Failed to parse {path}:{line}: {message}")]
    ManifestParse {
        path: String,
        line: usize,
        message: String,
    },

    /// The `go.mod` file has no `module` directive.
    #[error("could not find module path from {path} file, make sure it is defined")]
    MissingModulePath { path: String },

    /// Git could not tell us the default branch.
    #[error("could not find default branch using git, you can define it manually by setting 'githubWorkflow.global.defaultBranch' in config: {reason}")]
    DefaultBranchUndetermined { reason: String },

    /// Git answered, but the answer is not a remote branch ref.
    #[error("default branch reported by git is malformed ({output:?}), you can define it manually by setting 'githubWorkflow.global.defaultBranch' in config")]
    DefaultBranchMalformed { output: String },

    /// A git command could not be run or exited unsuccessfully.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An error occurred while staging or writing generated files.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfig`].
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
