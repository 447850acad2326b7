//! # Walker Module
//!
//! This module enumerates eligible files under a root directory. The walk is
//! iterative (an explicit work queue rather than call-stack recursion, so very
//! deep trees cannot overflow the stack) and lazy: [`FileWalker`] implements
//! `Iterator` and produces paths one at a time.
//!
//! Enumeration rules:
//! - entries whose names begin with `.` are skipped (hidden-file marker)
//! - directories whose names are in the exclusion set are never recursed into
//! - files whose names end with one of the configured extensions are yielded
//!
//! Traversal order follows filesystem listing order. That order is not
//! guaranteed sorted; this is an accepted nondeterminism, since the rewrite is
//! idempotent per file.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::trace;

/// Lazy, restartable enumeration of eligible files under a root directory.
///
/// Directory read errors are yielded as `Err` items; per the error taxonomy
/// they are fatal and abort the run rather than being silently skipped.
pub struct FileWalker {
  /// Directories still to be listed.
  pending_dirs: VecDeque<PathBuf>,
  /// Files already discovered but not yet yielded.
  pending_files: VecDeque<PathBuf>,
  /// Extension suffixes including the dot (e.g. `.rs`).
  suffixes: Vec<String>,
  /// Directory names that are never recursed into.
  exclude_dirs: HashSet<String>,
}

impl FileWalker {
  /// Creates a walker rooted at `root`.
  ///
  /// # Parameters
  ///
  /// * `root` - Directory the walk starts from
  /// * `extensions` - File name extensions without the leading dot
  /// * `exclude_dirs` - Directory names excluded from recursion
  pub fn new(root: &Path, extensions: &[String], exclude_dirs: &HashSet<String>) -> Self {
    let mut pending_dirs = VecDeque::new();
    pending_dirs.push_back(root.to_path_buf());

    Self {
      pending_dirs,
      pending_files: VecDeque::new(),
      suffixes: extensions.iter().map(|ext| format!(".{ext}")).collect(),
      exclude_dirs: exclude_dirs.clone(),
    }
  }

  /// Lists one directory, queueing subdirectories and eligible files.
  fn list_directory(&mut self, dir: &Path) -> Result<()> {
    trace!("Scanning directory: {}", dir.display());

    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
      let entry = entry.with_context(|| format!("Failed to read entry in directory: {}", dir.display()))?;
      let name = entry.file_name();
      let name = name.to_string_lossy();

      if name.starts_with('.') {
        trace!("Skipping hidden entry: {}", entry.path().display());
        continue;
      }

      let file_type = entry
        .file_type()
        .with_context(|| format!("Failed to stat entry: {}", entry.path().display()))?;

      if file_type.is_dir() {
        if self.exclude_dirs.contains(name.as_ref()) {
          trace!("Skipping excluded directory: {}", entry.path().display());
        } else {
          self.pending_dirs.push_back(entry.path());
        }
      } else if self.suffixes.iter().any(|suffix| name.ends_with(suffix)) {
        self.pending_files.push_back(entry.path());
      }
    }

    Ok(())
  }
}

impl Iterator for FileWalker {
  type Item = Result<PathBuf>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      if let Some(file) = self.pending_files.pop_front() {
        return Some(Ok(file));
      }

      let dir = self.pending_dirs.pop_front()?;
      if let Err(e) = self.list_directory(&dir) {
        return Some(Err(e));
      }
    }
  }
}
