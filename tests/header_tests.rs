mod common;

use common::{lines, python_module};
use ets_copyright_checker::checker::{HeaderChecker, HeaderMatch, copyright_header};
use ets_copyright_checker::diagnostic::DiagnosticKind;
use ets_copyright_checker::templates::HeaderTemplate;

const GOOD_HEADER: &str = "\
# (C) Copyright 2005-2020 Enthought, Inc., Austin, TX
# All rights reserved.
#
# This software is provided without warranty under the terms of the BSD
# license included in LICENSE.txt and may be redistributed only under
# the conditions described in the aforementioned license. The license
# is also available online at http://www.enthought.com/licenses/BSD.txt
#
# Thanks for using Enthought open source!
";

#[test]
fn test_current_header_has_no_diagnostics() {
  let lines = lines(GOOD_HEADER);
  assert_eq!(copyright_header(&lines, 2020).count(), 0);
}

#[test]
fn test_rendered_template_matches_literal_header() {
  assert_eq!(HeaderTemplate::enthought().render(2005, 2020), GOOD_HEADER);
}

#[test]
fn test_empty_file_has_no_diagnostics() {
  let empty: [&str; 0] = [];
  for year in [1999, 2020, 2999] {
    assert_eq!(copyright_header(&empty, year).count(), 0);
  }
}

#[test]
fn test_missing_header() {
  let lines = lines("# This file has no header\n\nimport math\n");
  let diagnostics: Vec<_> = copyright_header(&lines, 2020).collect();

  assert_eq!(diagnostics.len(), 1);
  let diagnostic = &diagnostics[0];
  assert_eq!(diagnostic.kind, DiagnosticKind::MissingCopyrightHeader);
  assert_eq!((diagnostic.line, diagnostic.column), (1, 0));
  assert_eq!(diagnostic.code, "H101");
  assert!(diagnostic.full_message().starts_with("H101 "));
  assert!(
    diagnostic
      .full_message()
      .contains("header is missing, or doesn't match")
  );
}

#[test]
fn test_stale_end_year() {
  let lines = lines(GOOD_HEADER);
  let diagnostics: Vec<_> = copyright_header(&lines, 2021).collect();

  assert_eq!(diagnostics.len(), 1);
  let diagnostic = &diagnostics[0];
  assert_eq!(diagnostic.kind, DiagnosticKind::BadCopyrightEndYear);
  assert_eq!(diagnostic.line, 1);
  assert_eq!(diagnostic.column, "# (C) Copyright 2005-".len());
  assert!(diagnostic.full_message().starts_with("H102 "));
  assert!(diagnostic.full_message().contains("end year (2020) should be 2021"));
}

#[test]
fn test_end_year_ahead_of_expected_is_also_reported() {
  let lines = lines(&python_module(2005, 2030));
  let diagnostic = copyright_header(&lines, 2020).next().expect("diagnostic");
  assert_eq!(diagnostic.message, "Copyright end year (2030) should be 2020");
}

#[test]
fn test_checking_is_idempotent() {
  let inputs = [lines(GOOD_HEADER), lines("print('hello')\n"), Vec::new()];
  for input in &inputs {
    for year in [2020, 2021] {
      let first: Vec<_> = copyright_header(input, year).collect();
      let second: Vec<_> = copyright_header(input, year).collect();
      assert_eq!(first, second);
    }
  }
}

#[test]
fn test_start_year_is_not_validated() {
  for start in [1000, 2019, 2020, 2099, 9999] {
    let lines = lines(&python_module(start, 2020));
    assert_eq!(copyright_header(&lines, 2020).count(), 0, "start year {start}");
  }
}

#[test]
fn test_end_to_end_year_scenarios() {
  let module = python_module(2005, 2020);
  let good = lines(&module);
  assert_eq!(copyright_header(&good, 2020).count(), 0);

  let stale: Vec<_> = copyright_header(&good, 2021).collect();
  assert_eq!(stale.len(), 1);
  assert_eq!(stale[0].code, "H102");

  let mut replaced = good.clone();
  replaced[0] = "# (C) Copyright 2005-2020 Someone Else\n".to_string();
  for year in [2020, 2021] {
    let diagnostics: Vec<_> = copyright_header(&replaced, year).collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "H101");
  }
}

#[test]
fn test_crlf_and_unterminated_lines_are_accepted() {
  let crlf = GOOD_HEADER.replace('\n', "\r\n");
  assert_eq!(copyright_header(&lines(&crlf), 2020).count(), 0);

  let bare: Vec<&str> = GOOD_HEADER.lines().collect();
  assert_eq!(copyright_header(&bare, 2020).count(), 0);
}

#[test]
fn test_truncated_header_is_missing() {
  let mut lines = lines(GOOD_HEADER);
  lines.pop();

  let diagnostics: Vec<_> = copyright_header(&lines, 2020).collect();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingCopyrightHeader);
}

#[test]
fn test_altered_literal_line_short_circuits_year_check() {
  let mut lines = lines(GOOD_HEADER);
  lines[4] = "# license included in LICENSE.md and may be redistributed only under\n".to_string();

  // Wrong year too, but only the structural problem is reported.
  let diagnostics: Vec<_> = copyright_header(&lines, 2021).collect();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].kind, DiagnosticKind::MissingCopyrightHeader);
}

#[test]
fn test_header_must_start_on_first_line() {
  let text = format!("#!/usr/bin/env python\n{GOOD_HEADER}");
  let diagnostics: Vec<_> = copyright_header(&lines(&text), 2020).collect();
  assert_eq!(diagnostics.len(), 1);
  assert_eq!(diagnostics[0].code, "H101");
}

#[test]
fn test_malformed_year_range_is_missing() {
  for first_line in [
    "# (C) Copyright 2005 Enthought, Inc., Austin, TX\n",
    "# (C) Copyright 05-20 Enthought, Inc., Austin, TX\n",
    "# (C) Copyright 2005-2020  Enthought, Inc., Austin, TX\n",
    "# (C) Copyright 2005-2020 Enthought, Inc., Austin, TX.\n",
  ] {
    let mut lines = lines(GOOD_HEADER);
    lines[0] = first_line.to_string();
    let diagnostics: Vec<_> = copyright_header(&lines, 2020).collect();
    assert_eq!(diagnostics.len(), 1, "{first_line:?}");
    assert_eq!(diagnostics[0].code, "H101", "{first_line:?}");
  }
}

#[test]
fn test_extra_lines_after_header_are_ignored() {
  let lines = lines(&python_module(2005, 2020));
  assert!(lines.len() > HeaderTemplate::enthought().line_count());
  assert_eq!(copyright_header(&lines, 2020).count(), 0);
}

#[test]
fn test_match_header_exposes_years() {
  let checker = HeaderChecker::default();
  let lines = lines(&python_module(2008, 2019));

  assert_eq!(
    checker.match_header(&lines),
    HeaderMatch::Found {
      start_year: 2008,
      end_year: 2019,
      end_year_column: 21,
    }
  );
  assert_eq!(checker.match_header(&["import os\n"]), HeaderMatch::Missing);
}

#[test]
fn test_check_is_lazy_and_reusable() {
  let checker = HeaderChecker::default();
  let lines = lines(GOOD_HEADER);

  let mut pending = checker.check(&lines, 2021);
  let first = pending.next().expect("one diagnostic");
  assert!(pending.next().is_none());
  assert_eq!(first.code, "H102");

  assert_eq!(checker.check(&lines, 2020).count(), 0);
}
