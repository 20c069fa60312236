//! # Output Module
//!
//! This module centralizes all user-facing output for the checker.
//!
//! ## Design Goals
//!
//! - **Tool-friendly**: diagnostics use the flake8 layout
//!   (`path:line:col: CODE message`) so editors and CI annotators can parse them
//! - **Scannable**: colors and symbols for the summary lines
//! - **Progressive**: more detail with `-v`, silence with `-q`
//! - **Scriptable**: diagnostics go to stdout even in quiet mode; read errors
//!   go to stderr

use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::diagnostic::Diagnostic;
use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileReport, FileStatus, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// All files passed
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Findings or errors
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print the initial "Checking N files..." message.
pub fn print_start_message(file_count: usize) {
  if is_quiet() {
    return;
  }

  let files_word = if file_count == 1 { "file" } else { "files" };
  eprintln!("Checking {} {}...", file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Formats one diagnostic the way flake8 does.
///
/// The stored column is 0-based; flake8 prints it 1-based.
pub fn format_diagnostic(display_path: &str, diagnostic: &Diagnostic) -> String {
  format!(
    "{}:{}:{}: {}",
    display_path,
    diagnostic.line,
    diagnostic.column + 1,
    diagnostic.full_message()
  )
}

/// Print one line per diagnostic to stdout, in report order.
///
/// Returns the number of lines printed.
pub fn print_diagnostics(reports: &[FileReport], workspace_root: Option<&Path>) -> usize {
  let mut printed = 0;

  for report in reports {
    if report.diagnostics.is_empty() {
      continue;
    }
    let display_path = make_relative_path(&report.path, workspace_root);

    let styled_path = display_path
      .if_supports_color(Stream::Stdout, |s| s.bold())
      .to_string();

    for diagnostic in &report.diagnostics {
      println!("{}", format_diagnostic(&styled_path, diagnostic));
      printed += 1;
    }
  }

  printed
}

/// Print files that could not be read to stderr.
pub fn print_read_errors(reports: &[FileReport], workspace_root: Option<&Path>) {
  for report in reports {
    if let FileStatus::Error { message } = &report.status {
      eprintln!(
        "{} {}: {}",
        "error:".if_supports_color(Stream::Stderr, |s| s.red()),
        make_relative_path(&report.path, workspace_root),
        message
      );
    }
  }
}

/// Print explicitly named files that were skipped (verbose mode only).
pub fn print_skipped_files(reports: &[FileReport], workspace_root: Option<&Path>) {
  if !is_verbose() {
    return;
  }

  for report in reports {
    if let FileStatus::Skipped { reason } = &report.status {
      eprintln!(
        "  {} {} ({})",
        "-".if_supports_color(Stream::Stderr, |s| s.dimmed()),
        make_relative_path(&report.path, workspace_root),
        reason
      );
    }
  }
}

/// Print the success message when every header is present and current.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have a current copyright header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y failed, Z errors, W skipped"
/// In verbose mode, also shows per-code counts and timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let failed = summary.files_failed;
  let failed_str = if failed > 0 {
    failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let errored = summary.files_errored;
  let errored_str = if errored > 0 {
    errored.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    errored.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };

  let symbol = if summary.has_failures() {
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string()
  };

  let mut summary_line = format!(
    "{} Summary: {} OK, {} failed, {} errors, {} skipped",
    symbol,
    summary.files_passed.if_supports_color(Stream::Stdout, |s| s.cyan()),
    failed_str,
    errored_str,
    summary.files_skipped.if_supports_color(Stream::Stdout, |s| s.dimmed()),
  );

  if is_verbose() {
    for (code, count) in &summary.diagnostics_by_code {
      summary_line.push_str(&format!(", {code}: {count}"));
    }
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the workspace root for display.
///
/// Paths outside the root are shown as given.
pub fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  let relative: Option<PathBuf> = workspace_root.and_then(|root| {
    if path.is_absolute() && root.is_absolute() && path.starts_with(root) {
      pathdiff::diff_paths(path, root)
    } else {
      None
    }
  });

  relative
    .as_deref()
    .unwrap_or(path)
    .to_string_lossy()
    .replace('\\', "/")
}
