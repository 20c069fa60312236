//! # Report Module
//!
//! Per-file results of a check run, the run summary, and report generation
//! in machine-readable formats (JSON, CSV).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileStatus {
  /// The header is present and current.
  Passed,
  /// At least one diagnostic was reported.
  Failed,
  /// The file was named explicitly but excluded.
  Skipped { reason: String },
  /// The file could not be read.
  Error { message: String },
}

/// Information about a checked file for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  #[serde(flatten)]
  pub status: FileStatus,
  pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
  /// Builds a report from the diagnostics left after suppression.
  pub fn checked(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
    let status = if diagnostics.is_empty() {
      FileStatus::Passed
    } else {
      FileStatus::Failed
    };
    Self {
      path,
      status,
      diagnostics,
    }
  }

  pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
    Self {
      path,
      status: FileStatus::Skipped { reason: reason.into() },
      diagnostics: Vec::new(),
    }
  }

  pub fn error(path: PathBuf, message: impl Into<String>) -> Self {
    Self {
      path,
      status: FileStatus::Error {
        message: message.into(),
      },
      diagnostics: Vec::new(),
    }
  }

  /// Whether this file makes the run fail.
  pub const fn is_failure(&self) -> bool {
    matches!(self.status, FileStatus::Failed | FileStatus::Error { .. })
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of a check run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
  /// Files checked (skipped files excluded)
  pub files_checked: usize,
  pub files_passed: usize,
  pub files_failed: usize,
  pub files_skipped: usize,
  pub files_errored: usize,
  /// Diagnostic count per code, e.g. `{"H101": 3}`
  pub diagnostics_by_code: BTreeMap<&'static str, usize>,
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      files_checked: 0,
      files_passed: 0,
      files_failed: 0,
      files_skipped: 0,
      files_errored: 0,
      diagnostics_by_code: BTreeMap::new(),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
    };

    for file in files {
      match file.status {
        FileStatus::Passed => summary.files_passed += 1,
        FileStatus::Failed => summary.files_failed += 1,
        FileStatus::Skipped { .. } => {
          summary.files_skipped += 1;
          continue;
        }
        FileStatus::Error { .. } => summary.files_errored += 1,
      }
      summary.files_checked += 1;

      for diagnostic in &file.diagnostics {
        *summary.diagnostics_by_code.entry(diagnostic.code).or_default() += 1;
      }
    }

    summary
  }

  /// Number of diagnostics of a given kind.
  pub fn count(&self, kind: DiagnosticKind) -> usize {
    self.diagnostics_by_code.get(kind.code()).copied().unwrap_or(0)
  }

  pub const fn has_failures(&self) -> bool {
    self.files_failed > 0 || self.files_errored > 0
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Report Generator for writing check results
pub struct ReportGenerator {
  format: ReportFormat,
}

impl ReportGenerator {
  pub const fn new(format: ReportFormat) -> Self {
    Self { format }
  }

  /// Renders the report as a string.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => Self::generate_json(files, summary),
      ReportFormat::Csv => Ok(Self::generate_csv(files, summary)),
    }
  }

  /// Renders the report and writes it to `output_path`.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary, output_path: &Path) -> Result<()> {
    let content = self.render(files, summary)?;
    fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
  }

  fn generate_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    let report = serde_json::json!({
      "summary": summary,
      "generated_at": Local::now().to_rfc3339(),
      "files": files,
    });
    serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")
  }

  fn generate_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
    let mut csv = String::from("file_path,status,code,line,column,message\n");

    for file in files {
      let path = escape_csv(&file.path.to_string_lossy());
      match &file.status {
        FileStatus::Passed => csv.push_str(&format!("{path},passed,,,,\n")),
        FileStatus::Skipped { reason } => csv.push_str(&format!("{path},skipped,,,,{}\n", escape_csv(reason))),
        FileStatus::Error { message } => csv.push_str(&format!("{path},error,,,,{}\n", escape_csv(message))),
        FileStatus::Failed => {
          for d in &file.diagnostics {
            csv.push_str(&format!(
              "{path},failed,{},{},{},{}\n",
              d.code,
              d.line,
              d.column,
              escape_csv(&d.message)
            ));
          }
        }
      }
    }

    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Files checked,{}\n", summary.files_checked));
    csv.push_str(&format!("Files passed,{}\n", summary.files_passed));
    csv.push_str(&format!("Files failed,{}\n", summary.files_failed));
    csv.push_str(&format!("Files skipped,{}\n", summary.files_skipped));
    csv.push_str(&format!("Files with errors,{}\n", summary.files_errored));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.processing_time.as_secs_f64()
    ));

    csv
  }
}

/// Quotes a CSV field if it contains a delimiter, quote or newline.
fn escape_csv(field: &str) -> String {
  if field.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_string()
  }
}
