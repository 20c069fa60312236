//! # Templates Module
//!
//! This module defines the copyright header template that files are checked
//! against.
//!
//! A template is a block of comment lines. Its first line carries the
//! `{{years}}` placeholder, which stands for a `YYYY-YYYY` year range; every
//! other line is matched literally, comment marker included.
//!
//! The built-in template is the Enthought Tool Suite BSD header:
//!
//! ```text
//! # (C) Copyright 2005-2020 Enthought, Inc., Austin, TX
//! # All rights reserved.
//! #
//! # This software is provided without warranty under the terms of the BSD
//! # license included in LICENSE.txt and may be redistributed only under
//! # the conditions described in the aforementioned license. The license
//! # is also available online at http://www.enthought.com/licenses/BSD.txt
//! #
//! # Thanks for using Enthought open source!
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ets_copyright_checker::templates::HeaderTemplate;
//!
//! let template = HeaderTemplate::parse("# Copyright {{years}} ACME\n# All rights reserved.\n").unwrap();
//! assert_eq!(template.line_count(), 2);
//!
//! let years = template.match_year_line("# Copyright 1999-2024 ACME").unwrap();
//! assert_eq!(years.start, 1999);
//! assert_eq!(years.end, 2024);
//! assert_eq!(years.end_column, 17);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::verbose_log;

/// Placeholder for the `YYYY-YYYY` range on a template's first line.
pub const YEARS_PLACEHOLDER: &str = "{{years}}";

/// The Enthought Tool Suite header, with the year range as a placeholder.
pub const ENTHOUGHT_HEADER: &str = "\
# (C) Copyright {{years}} Enthought, Inc., Austin, TX
# All rights reserved.
#
# This software is provided without warranty under the terms of the BSD
# license included in LICENSE.txt and may be redistributed only under
# the conditions described in the aforementioned license. The license
# is also available online at http://www.enthought.com/licenses/BSD.txt
#
# Thanks for using Enthought open source!
";

static ENTHOUGHT_TEMPLATE: LazyLock<HeaderTemplate> =
  LazyLock::new(|| HeaderTemplate::parse(ENTHOUGHT_HEADER).expect("built-in header template must parse"));

/// Error type for template loading and parsing.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template file could not be read.
  #[error("Failed to read header template '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The template has no lines.
  #[error("Header template is empty")]
  Empty,

  /// The first line could not be turned into a pattern.
  #[error("Invalid header template pattern: {0}")]
  Pattern(#[from] regex::Error),

  /// The first line does not contain the year placeholder exactly once.
  #[error("The first line of the header template must contain {{{{years}}}} exactly once")]
  MissingPlaceholder,

  /// The year placeholder appears on a line other than the first.
  #[error("{{{{years}}}} may only appear on the first line of the header template (found on line {line})")]
  MisplacedPlaceholder { line: usize },
}

/// Year range extracted from the first header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
  pub start: i32,
  pub end: i32,
  /// Character offset of the end-year digits within the line.
  pub end_column: usize,
}

/// An ordered list of header line matchers: one year-range pattern line
/// followed by literal lines.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
  /// Text before the year range on the first line.
  prefix: String,
  /// Text after the year range on the first line.
  suffix: String,
  /// Anchored pattern for the first line, with `start` and `end` captures.
  year_line: Regex,
  /// Remaining lines, without terminators.
  literal_lines: Vec<String>,
}

impl Default for HeaderTemplate {
  fn default() -> Self {
    Self::enthought()
  }
}

impl HeaderTemplate {
  /// The built-in Enthought Tool Suite header.
  pub fn enthought() -> Self {
    ENTHOUGHT_TEMPLATE.clone()
  }

  /// Parses template text.
  ///
  /// Trailing line terminators are ignored, and both `\n` and `\r\n` line
  /// endings are accepted.
  ///
  /// # Errors
  ///
  /// Returns an error if the template is empty, or if `{{years}}` is not on
  /// the first line exactly once.
  pub fn parse(text: &str) -> Result<Self, TemplateError> {
    let text = text.trim_end_matches(['\r', '\n']);
    if text.is_empty() {
      return Err(TemplateError::Empty);
    }
    let mut lines = text.lines();

    let first = lines.next().ok_or(TemplateError::Empty)?;
    if first.matches(YEARS_PLACEHOLDER).count() != 1 {
      return Err(TemplateError::MissingPlaceholder);
    }
    let (prefix, suffix) = first
      .split_once(YEARS_PLACEHOLDER)
      .ok_or(TemplateError::MissingPlaceholder)?;

    let mut literal_lines = Vec::new();
    for (index, line) in lines.enumerate() {
      if line.contains(YEARS_PLACEHOLDER) {
        return Err(TemplateError::MisplacedPlaceholder { line: index + 2 });
      }
      literal_lines.push(line.to_string());
    }

    // `[0-9]` rather than `\d`, which would also accept non-ASCII digits.
    let pattern = format!(
      r"^{}(?P<start>[0-9]{{4}})-(?P<end>[0-9]{{4}}){}$",
      regex::escape(prefix),
      regex::escape(suffix)
    );
    let year_line = Regex::new(&pattern)?;

    Ok(Self {
      prefix: prefix.to_string(),
      suffix: suffix.to_string(),
      year_line,
      literal_lines,
    })
  }

  /// Loads a template from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or does not parse (see
  /// [`parse`](Self::parse)).
  pub fn load(path: &Path) -> Result<Self, TemplateError> {
    verbose_log!("Loading header template from: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| TemplateError::ReadError {
      path: path.to_path_buf(),
      source,
    })?;

    Self::parse(&text)
  }

  /// Number of lines a matching header spans.
  pub fn line_count(&self) -> usize {
    1 + self.literal_lines.len()
  }

  /// The lines after the year line, without terminators.
  pub fn literal_lines(&self) -> &[String] {
    &self.literal_lines
  }

  /// Matches the first header line (without its terminator) and extracts the
  /// year range.
  ///
  /// Returns `None` if the line does not have the template's shape.
  pub fn match_year_line(&self, line: &str) -> Option<YearRange> {
    let caps = self.year_line.captures(line)?;
    let start = caps.name("start")?;
    let end = caps.name("end")?;

    Some(YearRange {
      start: start.as_str().parse().ok()?,
      end: end.as_str().parse().ok()?,
      end_column: line[..end.start()].chars().count(),
    })
  }

  /// Renders the header for a year range, one `\n`-terminated line per
  /// template line.
  pub fn render(&self, start_year: i32, end_year: i32) -> String {
    let mut header = format!("{}{start_year:04}-{end_year:04}{}\n", self.prefix, self.suffix);
    for line in &self.literal_lines {
      header.push_str(line);
      header.push('\n');
    }
    header
  }
}
