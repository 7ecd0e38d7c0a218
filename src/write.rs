//! # Writing to Disk
//!
//! The last step of the pipeline: applies an [`OutputFS`] to the repository.
//!
//! 1.  **Create Directories**: parent directories of every staged file are
//!     created recursively.
//! 2.  **Write Content**: every staged file is overwritten in full, so a
//!     rerun with the same inputs yields byte-identical files.
//! 3.  **Remove Stale Files**: paths marked for deletion are removed if they
//!     exist; missing ones are skipped silently.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::filesystem::OutputFS;

/// What [`execute`] actually did, with paths relative to the output root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

/// Writes all staged files below `output_path` and deletes stale ones.
pub fn execute(out: &OutputFS, output_path: &Path) -> Result<WriteReport> {
    let mut report = WriteReport::default();

    for (relative_path, content) in out.files() {
        let full_path = output_path.join(relative_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;
        info!("wrote {}", relative_path.display());
        report.written.push(relative_path.clone());
    }

    for relative_path in out.removals() {
        let full_path = output_path.join(relative_path);
        match fs::remove_file(&full_path) {
            Ok(()) => {
                info!("removed {}", relative_path.display());
                report.removed.push(relative_path.clone());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::Filesystem {
                    message: format!("Failed to remove file '{}': {}", full_path.display(), e),
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::filesystem::OutputFS;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_write_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path();

        let mut out = OutputFS::new();
        out.add_file(".github/workflows/checks.yaml", "name: Checks\n")
            .unwrap();
        out.add_file("Dockerfile", "FROM scratch\n").unwrap();

        let report = execute(&out, output_path).unwrap();

        assert_eq!(
            fs::read_to_string(output_path.join(".github/workflows/checks.yaml")).unwrap(),
            "name: Checks\n"
        );
        assert!(output_path.join("Dockerfile").exists());
        assert_eq!(
            report.written,
            vec![
                PathBuf::from(".github/workflows/checks.yaml"),
                PathBuf::from("Dockerfile")
            ]
        );
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path();
        fs::write(output_path.join("Dockerfile"), "hand-written\n").unwrap();

        let mut out = OutputFS::new();
        out.add_file("Dockerfile", "FROM scratch\n").unwrap();
        execute(&out, output_path).unwrap();

        assert_eq!(
            fs::read_to_string(output_path.join("Dockerfile")).unwrap(),
            "FROM scratch\n"
        );
    }

    #[test]
    fn test_removes_stale_files() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path();
        let workflows = output_path.join(".github/workflows");
        fs::create_dir_all(&workflows).unwrap();
        fs::write(workflows.join("spell.yaml"), "old").unwrap();

        let mut out = OutputFS::new();
        out.remove_file(".github/workflows/spell.yaml");
        out.remove_file(".github/workflows/license.yaml");

        let report = execute(&out, output_path).unwrap();

        assert!(!workflows.join("spell.yaml").exists());
        assert_eq!(
            report.removed,
            vec![PathBuf::from(".github/workflows/spell.yaml")]
        );
    }

    #[test]
    fn test_empty_output() {
        let temp_dir = TempDir::new().unwrap();
        let report = execute(&OutputFS::new(), temp_dir.path()).unwrap();
        assert!(report.written.is_empty());
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_remove_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("ci.yaml")).unwrap();

        let mut out = OutputFS::new();
        out.remove_file("ci.yaml");
        let err = execute(&out, temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to remove file"));
    }
}
