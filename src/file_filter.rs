//! # File Filter Module
//!
//! Components deciding which collected files are checked: ignore globs and
//! the extension filter.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::verbose_log;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Filter that excludes files matching ignore patterns.
///
/// Patterns are normalized so that users can write them the way they would
/// in a `.gitignore`:
/// - `docs/` matches the directory and everything under it, at any depth
/// - a plain name such as `build` matches a file or directory of that name
///   anywhere
/// - wildcard patterns also match anywhere in the path (`**/` is prepended)
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
  glob_set: GlobSet,
  pattern_count: usize,
}

impl IgnoreFilter {
  /// Creates a new IgnoreFilter from a list of ignore patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the patterns is not a valid glob.
  pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut builder = GlobSetBuilder::new();
    let mut pattern_count = 0;

    let add_pattern = |b: &mut GlobSetBuilder, p: &str| -> Result<()> {
      b.add(Glob::new(p).with_context(|| format!("Invalid glob pattern: {}", p))?);
      Ok(())
    };

    for pattern in patterns {
      let pattern = pattern.as_ref().replace('\\', "/");
      let pattern = pattern.strip_prefix("./").unwrap_or(&pattern);
      pattern_count += 1;

      if let Some(dir_pattern) = pattern.strip_suffix('/') {
        add_pattern(&mut builder, dir_pattern)?;
        add_pattern(&mut builder, &format!("{}/**", dir_pattern))?;
        add_pattern(&mut builder, &format!("**/{}/**", dir_pattern))?;
        add_pattern(&mut builder, &format!("**/{}", dir_pattern))?;
      } else if !pattern.contains('*') && !pattern.contains('?') {
        add_pattern(&mut builder, pattern)?;
        add_pattern(&mut builder, &format!("**/{}", pattern))?;
        add_pattern(&mut builder, &format!("{}/**", pattern))?;
        add_pattern(&mut builder, &format!("**/{}/**", pattern))?;
      } else {
        add_pattern(&mut builder, pattern)?;
        if !pattern.starts_with("**/") {
          add_pattern(&mut builder, &format!("**/{}", pattern))?;
        }
      }
    }

    let glob_set = builder.build().with_context(|| "Failed to build glob set")?;

    Ok(Self { glob_set, pattern_count })
  }

  /// Checks whether a path matches any ignore pattern.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.pattern_count == 0 {
      return false;
    }
    let normalized = path.to_string_lossy().replace('\\', "/");
    let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);
    self.glob_set.is_match(normalized)
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.is_ignored(path) {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
      FilterResult::skip("Matches ignore pattern")
    } else {
      FilterResult::process()
    }
  }
}

/// Filter that only accepts files with one of the given extensions.
///
/// Matching is case-insensitive and uses the text after the last dot of the
/// file name. An empty extension list accepts every file.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
  extensions: HashSet<String>,
}

impl ExtensionFilter {
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let extensions = extensions
      .into_iter()
      .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
      .filter(|ext| !ext.is_empty())
      .collect();
    Self { extensions }
  }

  pub fn is_active(&self) -> bool {
    !self.extensions.is_empty()
  }

  pub fn matches(&self, path: &Path) -> bool {
    if !self.is_active() {
      return true;
    }
    path
      .extension()
      .map(|ext| self.extensions.contains(&ext.to_string_lossy().to_lowercase()))
      .unwrap_or(false)
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.matches(path) {
      FilterResult::process()
    } else {
      FilterResult::skip("Extension not selected")
    }
  }
}
