//! # File Collector Module
//!
//! Turns user-provided patterns (files, directories, globs) into the list of
//! files to check.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::{debug, trace, warn};

use crate::file_filter::{ExtensionFilter, FileFilter, IgnoreFilter};

/// Per-directory ignore file, gitignore syntax.
pub const IGNORE_FILENAME: &str = ".copyrightignore";

/// Files selected for checking, plus explicitly named files that were
/// skipped and why.
#[derive(Debug, Default)]
pub struct CollectedFiles {
  pub files: Vec<PathBuf>,
  pub skipped: Vec<(PathBuf, String)>,
}

/// File collector for pattern matching and directory traversal.
///
/// - Existing files are taken as named. They are subject to the ignore
///   patterns but not to the extension filter. Patterns see them the way a
///   walk would: relative to the current directory when given relative,
///   relative to the root otherwise.
/// - Directories are walked recursively. The walk honors `.gitignore` and
///   `.copyrightignore` files, skips hidden entries and prunes ignored
///   directories; only files passing the extension filter are kept.
/// - Anything else is expanded as a glob pattern.
pub struct FileCollector {
  ignore_filter: IgnoreFilter,
  extension_filter: ExtensionFilter,
  root: Option<PathBuf>,
}

impl FileCollector {
  pub const fn new(ignore_filter: IgnoreFilter, extension_filter: ExtensionFilter) -> Self {
    Self {
      ignore_filter,
      extension_filter,
      root: None,
    }
  }

  /// Sets the directory absolute file paths are matched relative to.
  /// Defaults to the current directory.
  pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
    self.root = root;
    self
  }

  /// Collects files for the given patterns, de-duplicated and sorted.
  ///
  /// # Errors
  ///
  /// Returns an error if a pattern is neither an existing path nor a valid
  /// glob, or names a path that does not exist.
  pub fn collect(&self, patterns: &[String]) -> Result<CollectedFiles> {
    let mut files = BTreeSet::new();
    let mut skipped = Vec::new();

    for pattern in patterns {
      let path = PathBuf::from(pattern);
      if path.is_file() {
        self.add_explicit_file(path, &mut files, &mut skipped);
      } else if path.is_dir() {
        files.extend(self.traverse_directory(&path));
      } else if is_glob(pattern) {
        let entries = glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        let mut matched = false;
        for entry in entries {
          match entry {
            Ok(path) if path.is_file() => {
              matched = true;
              self.add_explicit_file(path, &mut files, &mut skipped);
            }
            Ok(path) if path.is_dir() => {
              matched = true;
              files.extend(self.traverse_directory(&path));
            }
            Ok(_) => {}
            Err(e) => warn!("Error with glob pattern {}: {}", pattern, e),
          }
        }
        if !matched {
          warn!("Pattern matched no files: {}", pattern);
        }
      } else {
        anyhow::bail!("No such file or directory: {}", pattern);
      }
    }

    Ok(CollectedFiles {
      files: files.into_iter().collect(),
      skipped,
    })
  }

  fn add_explicit_file(&self, path: PathBuf, files: &mut BTreeSet<PathBuf>, skipped: &mut Vec<(PathBuf, String)>) {
    let result = self.ignore_filter.should_process(&self.ignore_match_path(&path));
    if result.should_process {
      files.insert(path);
    } else {
      let reason = result.reason.unwrap_or_else(|| "Matches ignore pattern".to_string());
      trace!("Skipping: {} ({})", path.display(), reason);
      skipped.push((path, reason));
    }
  }

  /// The form of an explicitly named file that ignore patterns are matched
  /// against.
  ///
  /// Absolute paths outside the root are reduced to their file name, as if
  /// their parent directory had been walked.
  fn ignore_match_path(&self, path: &Path) -> PathBuf {
    if path.is_relative() {
      return path.components().filter(|c| *c != Component::CurDir).collect();
    }

    let root = self.root.clone().or_else(|| std::env::current_dir().ok());
    if let Some(relative) = root.as_deref().and_then(|root| path.strip_prefix(root).ok()) {
      return relative.to_path_buf();
    }

    path.file_name().map_or_else(|| path.to_path_buf(), PathBuf::from)
  }

  /// Walks a directory and returns the files to check.
  pub fn traverse_directory(&self, dir: &Path) -> Vec<PathBuf> {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    // Ignore patterns see paths relative to the walked directory, so a
    // pattern cannot accidentally match a parent of the directory itself.
    let ignore_filter = self.ignore_filter.clone();
    let root = dir.to_path_buf();
    let walker = WalkBuilder::new(dir)
      .require_git(false)
      .add_custom_ignore_filename(IGNORE_FILENAME)
      .filter_entry(move |entry| {
        entry.depth() == 0 || !ignore_filter.is_ignored(entry.path().strip_prefix(&root).unwrap_or(entry.path()))
      })
      .build();

    let mut files = Vec::new();
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error walking {}: {}", dir.display(), e);
          continue;
        }
      };
      if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
        continue;
      }
      let path = entry.into_path();
      let result = self.extension_filter.should_process(&path);
      if result.should_process {
        files.push(path);
      } else {
        trace!("Skipping: {} ({})", path.display(), result.reason.unwrap_or_default());
      }
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    files
  }
}

fn is_glob(pattern: &str) -> bool {
  pattern.contains(['*', '?', '['])
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn collector(ignore: &[&str], extensions: &[&str]) -> FileCollector {
    FileCollector::new(
      IgnoreFilter::from_patterns(ignore).expect("valid patterns"),
      ExtensionFilter::new(extensions),
    )
  }

  fn setup_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path();
    fs::create_dir_all(root.join("pkg/tests")).expect("create dirs");
    fs::create_dir_all(root.join("docs")).expect("create dirs");
    fs::create_dir_all(root.join(".hidden")).expect("create dirs");
    fs::write(root.join("setup.py"), "").expect("write file");
    fs::write(root.join("pkg/__init__.py"), "").expect("write file");
    fs::write(root.join("pkg/tests/test_api.py"), "").expect("write file");
    fs::write(root.join("pkg/data.json"), "{}").expect("write file");
    fs::write(root.join("docs/conf.py"), "").expect("write file");
    fs::write(root.join(".hidden/secret.py"), "").expect("write file");
    temp_dir
  }

  fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
    files
      .iter()
      .map(|f| f.strip_prefix(root).expect("under root").to_string_lossy().replace('\\', "/"))
      .collect()
  }

  #[test]
  fn test_directory_walk_filters_extensions_and_hidden() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let collected = collector(&[], &["py"])
      .collect(&[root.to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(
      names(&collected.files, root),
      vec!["docs/conf.py", "pkg/__init__.py", "pkg/tests/test_api.py", "setup.py"]
    );
  }

  #[test]
  fn test_ignore_patterns_prune_directories() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let collected = collector(&["docs/", "tests/"], &["py"])
      .collect(&[root.to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(names(&collected.files, root), vec!["pkg/__init__.py", "setup.py"]);
  }

  #[test]
  fn test_copyrightignore_file_is_honored() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();
    fs::write(root.join(IGNORE_FILENAME), "pkg/tests/\n").expect("write ignore file");

    let collected = collector(&[], &["py"])
      .collect(&[root.to_string_lossy().to_string()])
      .expect("collect");

    assert!(!names(&collected.files, root).contains(&"pkg/tests/test_api.py".to_string()));
  }

  #[test]
  fn test_explicit_files_bypass_extension_filter_but_not_ignores() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();
    let data = root.join("pkg/data.json");
    let conf = root.join("docs/conf.py");

    let collected = collector(&["docs/"], &["py"])
      .with_root(Some(root.to_path_buf()))
      .collect(&[data.to_string_lossy().to_string(), conf.to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(collected.files, vec![data]);
    assert_eq!(collected.skipped.len(), 1);
    assert_eq!(collected.skipped[0].0, conf);
  }

  #[test]
  fn test_explicit_files_match_ignores_like_a_walk() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let project = temp_dir.path().join("build");
    fs::create_dir_all(project.join("pkg")).expect("create dirs");
    let module = project.join("pkg/bare.py");
    fs::write(&module, "").expect("write file");

    // A plain name that only matches a parent of the root.
    let build_ignored = collector(&["build"], &["py"]).with_root(Some(project.clone()));
    let explicit = build_ignored
      .collect(&[module.to_string_lossy().to_string()])
      .expect("collect");
    let walked = build_ignored
      .collect(&[project.to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(explicit.files, vec![module.clone()]);
    assert!(explicit.skipped.is_empty());
    assert_eq!(walked.files, explicit.files);

    // Directories under the root are still matched.
    let collected = collector(&["pkg/"], &["py"])
      .with_root(Some(project.clone()))
      .collect(&[module.to_string_lossy().to_string()])
      .expect("collect");
    assert!(collected.files.is_empty());
    assert_eq!(collected.skipped.len(), 1);
  }

  #[test]
  fn test_file_outside_root_is_matched_by_name() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let parent_name = temp_dir
      .path()
      .file_name()
      .map(|name| name.to_string_lossy().to_string())
      .expect("temp dir name");
    let module = temp_dir.path().join("bare.py");
    fs::write(&module, "").expect("write file");
    let elsewhere = TempDir::new().expect("create temp dir");

    let collected = collector(&[parent_name.as_str()], &["py"])
      .with_root(Some(elsewhere.path().to_path_buf()))
      .collect(&[module.to_string_lossy().to_string()])
      .expect("collect");
    assert_eq!(collected.files, vec![module.clone()]);

    let collected = collector(&["bare.py"], &["py"])
      .with_root(Some(elsewhere.path().to_path_buf()))
      .collect(&[module.to_string_lossy().to_string()])
      .expect("collect");
    assert!(collected.files.is_empty());
  }

  #[test]
  fn test_relative_explicit_paths_drop_current_dir_prefix() {
    assert_eq!(
      collector(&["docs/"], &["py"]).ignore_match_path(Path::new("./docs/conf.py")),
      PathBuf::from("docs/conf.py")
    );
  }

  #[test]
  fn test_overlapping_patterns_are_deduplicated() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();
    let setup = root.join("setup.py");

    let collected = collector(&[], &["py"])
      .collect(&[setup.to_string_lossy().to_string(), setup.to_string_lossy().to_string()])
      .expect("collect");

    assert_eq!(collected.files, vec![setup]);
  }

  #[test]
  fn test_glob_patterns() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();
    let pattern = format!("{}/pkg/*.py", root.to_string_lossy());

    let collected = collector(&[], &["py"]).collect(&[pattern]).expect("collect");

    assert_eq!(names(&collected.files, root), vec!["pkg/__init__.py"]);
  }

  #[test]
  fn test_missing_path_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.py");

    let result = collector(&[], &["py"]).collect(&[missing.to_string_lossy().to_string()]);
    assert!(result.is_err());
  }
}
