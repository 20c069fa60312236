//! # Check Command
//!
//! This module implements the check command for copyright headers.
//! This is the default command when no subcommand is specified.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, ValueEnum};
use ets_copyright_checker::checker::HeaderChecker;
use ets_copyright_checker::config::{Config, load_config, validate_year};
use ets_copyright_checker::diagnostic::DiagnosticKind;
use ets_copyright_checker::info_log;
use ets_copyright_checker::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use ets_copyright_checker::output::{
  print_all_files_ok, print_blank_line, print_diagnostics, print_hint, print_read_errors, print_skipped_files,
  print_start_message, print_summary,
};
use ets_copyright_checker::processor::{Processor, ProcessorConfig};
use ets_copyright_checker::report::{ProcessingSummary, ReportFormat, ReportGenerator};
use ets_copyright_checker::templates::HeaderTemplate;
use ets_copyright_checker::workspace::resolve_workspace;
use tracing::debug;

/// Format of the findings written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  /// flake8-style `path:line:col: CODE message` lines and a summary
  #[default]
  Text,
  /// A JSON document with the summary and per-file results
  Json,
}

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Files, directories or glob patterns to check. Directories are walked
  /// recursively.
  #[arg(required_unless_present = "print_header")]
  pub patterns: Vec<String>,

  /// Expected end year of the copyright range (default: current year)
  #[arg(long, value_name = "YEAR", value_parser = parse_end_year)]
  pub end_year: Option<i32>,

  /// Custom header template; its first line must contain `{{years}}`
  #[arg(long, short = 'f', value_name = "FILE")]
  pub template_file: Option<PathBuf>,

  /// Path to config file (default: .ets-copyright.toml in workspace root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i')]
  pub ignore: Vec<String>,

  /// Only check files with these extensions when walking directories
  /// (repeatable, case-insensitive; default: py)
  #[arg(long, value_name = "EXT")]
  pub ext: Vec<String>,

  /// Diagnostic codes to suppress (repeatable or comma-separated: H101, H102)
  #[arg(long, value_name = "CODE", value_delimiter = ',', value_parser = parse_code)]
  pub disable: Vec<DiagnosticKind>,

  /// Output format for findings
  #[arg(long, value_name = "FORMAT", default_value_t = OutputFormat::Text, value_enum)]
  pub format: OutputFormat,

  /// Generate a JSON report and save it to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Generate a CSV report and save it to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Print the expected header for the end year and exit
  #[arg(long)]
  pub print_header: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except findings and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

fn parse_end_year(value: &str) -> Result<i32, String> {
  let year = value
    .trim()
    .parse::<i32>()
    .map_err(|_| format!("{value} is not a year"))?;
  validate_year(year)
}

fn parse_code(value: &str) -> Result<DiagnosticKind, String> {
  value.parse::<DiagnosticKind>().map_err(|e| e.to_string())
}

/// Settings resolved from CLI flags, the config file and defaults, in that
/// order of precedence.
struct Settings {
  end_year: i32,
  template: HeaderTemplate,
  ignore: Vec<String>,
  extensions: Vec<String>,
  disabled: Vec<DiagnosticKind>,
}

impl Settings {
  fn resolve(args: &CheckArgs, config: Option<Config>) -> Result<Self> {
    let config = config.unwrap_or_default();

    let end_year = args
      .end_year
      .or(config.end_year)
      .unwrap_or_else(|| chrono::Local::now().year());

    let template = match args.template_file.as_ref().or(config.template_file.as_ref()) {
      Some(path) => {
        debug!("Using header template: {}", path.display());
        HeaderTemplate::load(path).with_context(|| format!("Failed to load header template from {}", path.display()))?
      }
      None => HeaderTemplate::enthought(),
    };

    let mut ignore = config.ignore.clone();
    ignore.extend(args.ignore.iter().cloned());

    let extensions = if args.ext.is_empty() {
      config.effective_extensions()
    } else {
      args.ext.clone()
    };

    let mut disabled = config.disabled_kinds();
    for kind in &args.disable {
      if !disabled.contains(kind) {
        disabled.push(*kind);
      }
    }

    Ok(Self {
      end_year,
      template,
      ignore,
      extensions,
      disabled,
    })
  }
}

/// Run the check command with the given arguments.
///
/// Findings are reported through the returned exit code; `Err` is reserved
/// for usage and configuration problems.
pub async fn run_check(args: CheckArgs) -> Result<ExitCode> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose, args.colors);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let workspace = resolve_workspace(&args.patterns)?;
  let workspace_root = workspace.root().to_path_buf();
  debug!(
    "Using {} workspace root: {}",
    if workspace.is_git() { "git" } else { "directory" },
    workspace_root.display()
  );

  let config = load_config(args.config.as_deref(), &workspace_root, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file");
  }

  let settings = Settings::resolve(&args, config)?;

  if args.print_header {
    print!("{}", settings.template.render(settings.end_year, settings.end_year));
    return Ok(ExitCode::SUCCESS);
  }

  debug!(
    "Expected end year: {}, extensions: {:?}, disabled: {:?}",
    settings.end_year, settings.extensions, settings.disabled
  );

  let processor = Processor::new(ProcessorConfig {
    ignore_patterns: settings.ignore,
    extensions: settings.extensions,
    disabled: settings.disabled,
    workspace_root: Some(workspace_root.clone()),
    ..ProcessorConfig::new(HeaderChecker::new(settings.template), settings.end_year)
  })?;

  let collected = processor.collect_files(&args.patterns)?;
  let text_output = args.format == OutputFormat::Text;
  if text_output {
    print_start_message(collected.files.len());
  }

  let start_time = Instant::now();
  let file_reports = processor.process_collected(collected).await;
  let summary = ProcessingSummary::from_reports(&file_reports, start_time.elapsed());

  match args.format {
    OutputFormat::Text => {
      print_skipped_files(&file_reports, Some(&workspace_root));
      let printed = print_diagnostics(&file_reports, Some(&workspace_root));
      print_read_errors(&file_reports, Some(&workspace_root));

      if !summary.has_failures() {
        print_all_files_ok();
      }
      print_blank_line();
      print_summary(&summary);

      if printed > 0 {
        print_hint("Run with --print-header to see the expected header.");
      }
    }
    OutputFormat::Json => {
      let json = ReportGenerator::new(ReportFormat::Json).render(&file_reports, &summary)?;
      println!("{json}");
      print_read_errors(&file_reports, Some(&workspace_root));
    }
  }

  let reports = [
    (ReportFormat::Json, args.report_json.as_ref()),
    (ReportFormat::Csv, args.report_csv.as_ref()),
  ];
  for (format, output_path) in reports {
    let Some(output_path) = output_path else {
      continue;
    };
    let report_generator = ReportGenerator::new(format);
    if let Err(e) = report_generator.generate(&file_reports, &summary, output_path) {
      eprintln!("Error generating {} report: {:#}", format, e);
    } else if text_output {
      info_log!("Generated {} report at {}", format, output_path.display());
    }
  }

  if summary.has_failures() {
    Ok(ExitCode::from(1))
  } else {
    Ok(ExitCode::SUCCESS)
  }
}
