//! In-memory staging area for generated artifacts.
//!
//! Builders never touch the disk. They stage file contents and stale paths
//! in an [`OutputFS`], which the write phase then applies in one go. This
//! keeps the builders pure and makes `--dry-run` trivial.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Generated files plus the set of stale paths to delete.
///
/// Iteration order is sorted by path, so writes and listings are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputFS {
    files: BTreeMap<PathBuf, String>,
    removals: BTreeSet<PathBuf>,
}

impl OutputFS {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `content` at `path`. Paths are relative to the output root.
    ///
    /// Staging the same path twice is a bug in the caller: two builders
    /// would be fighting over one file.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: impl Into<String>) -> Result<()> {
        let path = path.as_ref();
        if path.is_absolute() {
            return Err(Error::Filesystem {
                message: format!("refusing to stage absolute path {}", path.display()),
            });
        }
        if self.files.contains_key(path) {
            return Err(Error::Filesystem {
                message: format!("{} was generated twice", path.display()),
            });
        }
        self.removals.remove(path);
        self.files.insert(path.to_path_buf(), content.into());
        Ok(())
    }

    /// Marks `path` for deletion, unless something was staged there.
    pub fn remove_file<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        if !self.files.contains_key(path) {
            self.removals.insert(path.to_path_buf());
        }
    }

    pub fn get_file<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    pub fn is_removed<P: AsRef<Path>>(&self, path: P) -> bool {
        self.removals.contains(path.as_ref())
    }

    /// Staged files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &String)> {
        self.files.iter()
    }

    /// Paths marked for deletion, in path order.
    pub fn removals(&self) -> impl Iterator<Item = &PathBuf> {
        self.removals.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.removals.is_empty()
    }
}
