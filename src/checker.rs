//! # Checker Module
//!
//! The header-matching engine. [`HeaderChecker`] compares the leading lines of
//! a file against a [`HeaderTemplate`] and reports at most one
//! [`Diagnostic`]:
//!
//! - `H101` (MissingCopyrightHeaderError) when the lines do not match the
//!   template, anchored at line 1, column 0
//! - `H102` (BadCopyrightEndYearError) when they match but the end year is
//!   not the expected one, anchored at the end-year digits on line 1
//!
//! The first failure wins; a malformed header never also reports a wrong
//! year. Checking is pure: no I/O, no shared state.
//!
//! ## Example
//!
//! ```rust
//! use ets_copyright_checker::checker::copyright_header;
//! use ets_copyright_checker::diagnostic::DiagnosticKind;
//!
//! let lines = ["# This file has no header.\n", "\n", "import math\n"];
//! let diagnostics: Vec<_> = copyright_header(&lines, 2020).collect();
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingCopyrightHeader);
//! ```

use std::sync::LazyLock;

use crate::diagnostic::Diagnostic;
use crate::templates::HeaderTemplate;

static DEFAULT_CHECKER: LazyLock<HeaderChecker> = LazyLock::new(HeaderChecker::default);

/// Outcome of matching a file's leading lines against the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
  /// The header is absent, truncated or differs from the template.
  Missing,
  /// Every template line matched.
  Found {
    start_year: i32,
    end_year: i32,
    /// Character offset of the end-year digits on line 1.
    end_year_column: usize,
  },
}

/// Checks files against a copyright header template.
#[derive(Debug, Clone, Default)]
pub struct HeaderChecker {
  template: HeaderTemplate,
}

impl HeaderChecker {
  pub const fn new(template: HeaderTemplate) -> Self {
    Self { template }
  }

  pub const fn template(&self) -> &HeaderTemplate {
    &self.template
  }

  /// Matches the leading lines against the template.
  ///
  /// Lines may keep their `\n` or `\r\n` terminators. Only the first
  /// [`line_count`](HeaderTemplate::line_count) lines are inspected.
  pub fn match_header<S: AsRef<str>>(&self, lines: &[S]) -> HeaderMatch {
    if lines.len() < self.template.line_count() {
      return HeaderMatch::Missing;
    }
    let Some((first, rest)) = lines.split_first() else {
      return HeaderMatch::Missing;
    };

    let Some(years) = self.template.match_year_line(strip_line_terminator(first.as_ref())) else {
      return HeaderMatch::Missing;
    };

    let literals_match = self
      .template
      .literal_lines()
      .iter()
      .zip(rest)
      .all(|(expected, actual)| strip_line_terminator(actual.as_ref()) == expected);
    if !literals_match {
      return HeaderMatch::Missing;
    }

    HeaderMatch::Found {
      start_year: years.start,
      end_year: years.end,
      end_year_column: years.end_column,
    }
  }

  /// Checks a file's lines, yielding at most one diagnostic.
  ///
  /// An empty file yields nothing. The returned iterator is lazy: no
  /// matching happens until it is first advanced.
  pub fn check<'a, S: AsRef<str>>(
    &'a self,
    lines: &'a [S],
    expected_end_year: i32,
  ) -> impl Iterator<Item = Diagnostic> + 'a {
    std::iter::once_with(move || self.first_violation(lines, expected_end_year)).flatten()
  }

  fn first_violation<S: AsRef<str>>(&self, lines: &[S], expected_end_year: i32) -> Option<Diagnostic> {
    if lines.is_empty() {
      return None;
    }

    match self.match_header(lines) {
      HeaderMatch::Missing => Some(Diagnostic::missing_header()),
      HeaderMatch::Found {
        end_year,
        end_year_column,
        ..
      } if end_year != expected_end_year => Some(Diagnostic::bad_end_year(end_year, expected_end_year, end_year_column)),
      HeaderMatch::Found { .. } => None,
    }
  }
}

/// Checks lines against the built-in Enthought header.
///
/// This is the entry point host lint frameworks call once per file.
pub fn copyright_header<S: AsRef<str>>(lines: &[S], end_year: i32) -> impl Iterator<Item = Diagnostic> + '_ {
  DEFAULT_CHECKER.check(lines, end_year)
}

/// Strips one trailing `\r\n`, `\n` or `\r`.
fn strip_line_terminator(line: &str) -> &str {
  line
    .strip_suffix("\r\n")
    .or_else(|| line.strip_suffix('\n'))
    .or_else(|| line.strip_suffix('\r'))
    .unwrap_or(line)
}
