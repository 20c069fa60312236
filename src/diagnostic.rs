//! # Diagnostic Module
//!
//! Value types describing a single problem found in a file's copyright header.
//!
//! Every [`Diagnostic`] carries a stable short code (see [`DiagnosticKind::code`])
//! that host tooling uses for suppression and filtering. The codes must never
//! change once released.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The two ways a copyright header can be wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
  /// The leading lines do not match the header template (absent, truncated,
  /// reordered or altered).
  MissingCopyrightHeader,
  /// The header matches the template, but its end year is not the expected
  /// one.
  BadCopyrightEndYear,
}

impl DiagnosticKind {
  /// All kinds, in code order.
  pub const ALL: [DiagnosticKind; 2] = [DiagnosticKind::MissingCopyrightHeader, DiagnosticKind::BadCopyrightEndYear];

  /// Stable code used for suppression (`H101`, `H102`).
  pub const fn code(self) -> &'static str {
    match self {
      DiagnosticKind::MissingCopyrightHeader => "H101",
      DiagnosticKind::BadCopyrightEndYear => "H102",
    }
  }

  /// Name of the error class as reported by host lint frameworks.
  pub const fn name(self) -> &'static str {
    match self {
      DiagnosticKind::MissingCopyrightHeader => "MissingCopyrightHeaderError",
      DiagnosticKind::BadCopyrightEndYear => "BadCopyrightEndYearError",
    }
  }
}

impl fmt::Display for DiagnosticKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

impl Serialize for DiagnosticKind {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.name())
  }
}

/// Error returned when a string is not a known diagnostic code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown diagnostic code: {0}")]
pub struct ParseCodeError(pub String);

impl FromStr for DiagnosticKind {
  type Err = ParseCodeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let code = s.trim();
    Self::ALL
      .into_iter()
      .find(|kind| kind.code().eq_ignore_ascii_case(code))
      .ok_or_else(|| ParseCodeError(s.to_string()))
  }
}

/// A single problem found in a file's copyright header.
///
/// Diagnostics are plain values: two diagnostics with the same kind, position
/// and message compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub kind: DiagnosticKind,
  /// 1-based line number.
  pub line: usize,
  /// 0-based character offset within the line.
  pub column: usize,
  /// Human-readable description, without the code.
  pub message: String,
  pub code: &'static str,
}

impl Diagnostic {
  /// The header is absent or does not conform to the template.
  ///
  /// Always anchored at the very start of the file.
  pub fn missing_header() -> Self {
    Self {
      kind: DiagnosticKind::MissingCopyrightHeader,
      line: 1,
      column: 0,
      message: "Copyright header is missing, or doesn't match the expected format".to_string(),
      code: DiagnosticKind::MissingCopyrightHeader.code(),
    }
  }

  /// The header's end year differs from the expected one.
  ///
  /// `column` is the 0-based character offset of the end-year digits on
  /// line 1 (21 for the Enthought header). flake8-ets reported the start of
  /// the year range instead (16), so columns differ from its output.
  pub fn bad_end_year(found: i32, expected: i32, column: usize) -> Self {
    Self {
      kind: DiagnosticKind::BadCopyrightEndYear,
      line: 1,
      column,
      message: format!("Copyright end year ({found}) should be {expected}"),
      code: DiagnosticKind::BadCopyrightEndYear.code(),
    }
  }

  /// The message prefixed with the code, e.g. `H101 Copyright header is ...`.
  pub fn full_message(&self) -> String {
    format!("{} {}", self.code, self.message)
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}: {} {}", self.line, self.column, self.code, self.message)
  }
}
