//! # Processor Module
//!
//! The host side of the checker: it finds files, reads their leading lines,
//! runs the [`HeaderChecker`] once per file and collects the results.
//!
//! The module is organized into submodules:
//! - [`file_io`] - Reading the leading lines of a file
//! - [`file_collector`] - Pattern matching and directory traversal
//!
//! The [`Processor`] struct is the main entry point.

mod file_collector;
mod file_io;

use std::path::PathBuf;

use anyhow::Result;
pub use file_collector::{CollectedFiles, FileCollector, IGNORE_FILENAME};
pub use file_io::FileIO;
use futures::stream::{self, StreamExt};
use tracing::{debug, trace};

use crate::checker::HeaderChecker;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::file_filter::{ExtensionFilter, IgnoreFilter};
use crate::report::FileReport;
use crate::verbose_log;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub checker: HeaderChecker,
  pub expected_end_year: i32,

  /// Glob patterns for paths to skip
  pub ignore_patterns: Vec<String>,
  /// Extensions checked during directory walks; empty means all files
  pub extensions: Vec<String>,
  /// Diagnostic kinds dropped before reporting
  pub disabled: Vec<DiagnosticKind>,
  /// Maximum number of files read at once
  pub concurrency: usize,
  /// Directory absolute file paths are matched against ignore patterns
  /// relative to; `None` uses the current directory
  pub workspace_root: Option<PathBuf>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     disabled: vec![DiagnosticKind::BadCopyrightEndYear],
  ///     ..ProcessorConfig::new(checker, 2024)
  /// }
  /// ```
  pub fn new(checker: HeaderChecker, expected_end_year: i32) -> Self {
    Self {
      checker,
      expected_end_year,
      ignore_patterns: Vec::new(),
      extensions: crate::config::DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
      disabled: Vec::new(),
      concurrency: num_cpus::get(),
      workspace_root: None,
    }
  }
}

/// Processor for checking copyright headers across many files.
pub struct Processor {
  checker: HeaderChecker,
  expected_end_year: i32,
  disabled: Vec<DiagnosticKind>,
  concurrency: usize,
  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns is invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let ignore_filter = IgnoreFilter::from_patterns(&config.ignore_patterns)?;
    let extension_filter = ExtensionFilter::new(&config.extensions);

    Ok(Self {
      checker: config.checker,
      expected_end_year: config.expected_end_year,
      disabled: config.disabled,
      concurrency: config.concurrency.max(1),
      file_collector: FileCollector::new(ignore_filter, extension_filter).with_root(config.workspace_root),
    })
  }

  /// Collects the files selected by `patterns`.
  pub fn collect_files(&self, patterns: &[String]) -> Result<CollectedFiles> {
    self.file_collector.collect(patterns)
  }

  /// Collects and checks every file selected by `patterns`.
  ///
  /// Reports are sorted by path; explicitly named files that were skipped
  /// are included with a `Skipped` status.
  ///
  /// # Errors
  ///
  /// Returns an error only if file collection fails. Unreadable files are
  /// reported per file and do not abort the run.
  pub async fn process(&self, patterns: &[String]) -> Result<Vec<FileReport>> {
    let collected = self.collect_files(patterns)?;
    Ok(self.process_collected(collected).await)
  }

  /// Checks previously collected files, avoiding a second collection pass
  /// when the caller already needed the file list.
  pub async fn process_collected(&self, collected: CollectedFiles) -> Vec<FileReport> {
    let mut reports = self.check_files(collected.files).await;

    reports.extend(
      collected
        .skipped
        .into_iter()
        .map(|(path, reason)| FileReport::skipped(path, reason)),
    );
    reports.sort_by(|a, b| a.path.cmp(&b.path));

    reports
  }

  /// Checks a list of files concurrently.
  ///
  /// Reports come back in the same order as `files`.
  pub async fn check_files(&self, files: Vec<PathBuf>) -> Vec<FileReport> {
    if files.is_empty() {
      debug!("No files to check");
      return Vec::new();
    }

    let start = std::time::Instant::now();
    let file_count = files.len();
    debug!("Checking {} files (concurrency: {})", file_count, self.concurrency);

    let mut indexed: Vec<(usize, FileReport)> = stream::iter(files.into_iter().enumerate())
      .map(|(index, path)| async move { (index, self.check_file(path).await) })
      .buffer_unordered(self.concurrency)
      .collect()
      .await;
    indexed.sort_by_key(|(index, _)| *index);

    debug!("Checked {} files in {}ms", file_count, start.elapsed().as_millis());

    indexed.into_iter().map(|(_, report)| report).collect()
  }

  /// Reads and checks a single file.
  pub async fn check_file(&self, path: PathBuf) -> FileReport {
    trace!("Checking: {}", path.display());

    match FileIO::read_leading_lines(&path, self.checker.template().line_count()).await {
      Ok(lines) => {
        let diagnostics = self.check_lines(&lines);
        if diagnostics.is_empty() {
          verbose_log!("OK: {}", path.display());
        }
        FileReport::checked(path, diagnostics)
      }
      Err(e) => {
        debug!("Failed to read {}: {:#}", path.display(), e);
        FileReport::error(path, format!("{:#}", e))
      }
    }
  }

  /// Checks already-read lines and drops suppressed diagnostics.
  pub fn check_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Diagnostic> {
    self
      .checker
      .check(lines, self.expected_end_year)
      .filter(|diagnostic| !self.is_disabled(diagnostic))
      .collect()
  }

  fn is_disabled(&self, diagnostic: &Diagnostic) -> bool {
    let disabled = self.disabled.contains(&diagnostic.kind);
    if disabled {
      trace!("Suppressed {} at {}:{}", diagnostic.code, diagnostic.line, diagnostic.column);
    }
    disabled
  }
}
