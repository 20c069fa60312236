//! # Workspace Module
//!
//! This module defines the workspace root the checker operates on. The root
//! is where the config file is discovered and what report paths are shown
//! relative to.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Workspace root selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Workspace {
  /// Workspace rooted at a git checkout.
  Git { root: PathBuf },
  /// Workspace rooted at a directory.
  Directory { root: PathBuf },
}

impl Workspace {
  pub fn root(&self) -> &Path {
    match self {
      Self::Git { root } | Self::Directory { root } => root.as_path(),
    }
  }

  pub const fn is_git(&self) -> bool {
    matches!(self, Self::Git { .. })
  }
}

/// Resolve the current workspace based on the current directory and patterns.
///
/// The enclosing git checkout wins; otherwise the first pattern naming an
/// existing directory (or a file's parent) is used, then the current directory.
pub fn resolve_workspace(patterns: &[String]) -> Result<Workspace> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  Ok(resolve_workspace_from(patterns, &current_dir))
}

/// Like [`resolve_workspace`], starting from an explicit directory.
pub fn resolve_workspace_from(patterns: &[String], current_dir: &Path) -> Workspace {
  if let Some(root) = discover_git_root(current_dir) {
    debug!("Using git checkout root: {}", root.display());
    return Workspace::Git { root };
  }

  if let Some(root) = resolve_workspace_from_patterns(patterns, current_dir) {
    return Workspace::Directory { root };
  }

  Workspace::Directory {
    root: current_dir.to_path_buf(),
  }
}

/// Walks up from `start` looking for a `.git` entry (a directory, or a file
/// for worktrees and submodules).
fn discover_git_root(start: &Path) -> Option<PathBuf> {
  start
    .ancestors()
    .find(|dir| dir.join(".git").exists())
    .map(Path::to_path_buf)
}

fn resolve_workspace_from_patterns(patterns: &[String], current_dir: &Path) -> Option<PathBuf> {
  for pattern in patterns {
    let candidate = PathBuf::from(pattern);
    if candidate.is_dir() {
      return Some(abs_path_or_current(&candidate, current_dir));
    }

    if candidate.is_file()
      && let Some(parent) = candidate.parent()
    {
      return Some(abs_path_or_current(parent, current_dir));
    }
  }

  None
}

fn abs_path_or_current(path: &Path, current_dir: &Path) -> PathBuf {
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    current_dir.join(path)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_git_checkout_is_preferred() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join(".git")).expect("create .git");
    fs::create_dir_all(root.join("pkg/sub")).expect("create dirs");

    let workspace = resolve_workspace_from(&[], &root.join("pkg/sub"));
    assert!(workspace.is_git());
    assert_eq!(workspace.root(), root);
  }

  #[test]
  fn test_falls_back_to_pattern_directory() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let project = temp_dir.path().join("project");
    fs::create_dir_all(&project).expect("create dirs");

    let workspace = resolve_workspace_from(&[project.to_string_lossy().to_string()], temp_dir.path());
    // A .git above the temp dir would take precedence; only check the
    // directory case when none was found.
    if !workspace.is_git() {
      assert_eq!(workspace.root(), project);
    }
  }
}
