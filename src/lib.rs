//! # ets-copyright-checker
//!
//! A checker that ensures source files start with the Enthought Tool Suite
//! copyright header, and that the end year of its `YYYY-YYYY` range is the
//! expected one.
//!
//! The checker reads only the first lines of each file (as many as the header
//! template has) and reports at most one diagnostic per file:
//!
//! * `H101` MissingCopyrightHeaderError: the header is absent or altered
//! * `H102` BadCopyrightEndYearError: the header is intact but its end year is
//!   stale
//!
//! ## Usage as a Library
//!
//! The core check is a pure function over a file's lines:
//!
//! ```rust
//! use ets_copyright_checker::checker::copyright_header;
//! use ets_copyright_checker::templates::HeaderTemplate;
//!
//! let header = HeaderTemplate::enthought().render(2005, 2020);
//! let lines: Vec<&str> = header.split_inclusive('\n').collect();
//!
//! assert_eq!(copyright_header(&lines, 2020).count(), 0);
//!
//! let diagnostic = copyright_header(&lines, 2021).next().expect("stale year");
//! assert_eq!(diagnostic.code, "H102");
//! assert_eq!(diagnostic.full_message(), "H102 Copyright end year (2020) should be 2021");
//! ```
//!
//! To check files on disk, use the [`processor`]:
//!
//! ```rust,no_run
//! use ets_copyright_checker::checker::HeaderChecker;
//! use ets_copyright_checker::processor::{Processor, ProcessorConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let processor = Processor::new(ProcessorConfig::new(HeaderChecker::default(), 2024))?;
//! let reports = processor.process(&["src".to_string()]).await?;
//!
//! for report in reports.iter().filter(|r| r.is_failure()) {
//!     println!("{}", report.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! * [`checker`] - Header matching and diagnostics for one file's lines
//! * [`templates`] - The header template and custom template parsing
//! * [`processor`] - File collection and concurrent checking
//! * [`config`] - `.ets-copyright.toml` configuration
//! * [`report`] - Per-file results and JSON/CSV reports
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`checker`]: crate::checker
//! [`templates`]: crate::templates
//! [`processor`]: crate::processor
//! [`config`]: crate::config
//! [`report`]: crate::report
//! [`logging`]: crate::logging

pub mod checker;
pub mod config;
pub mod diagnostic;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
pub mod workspace;
