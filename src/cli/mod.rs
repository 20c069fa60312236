//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing and supports subcommands for
//! extensibility.

mod check;

use std::sync::LazyLock;

pub use check::{CheckArgs, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// `--version` output with the commit embedded by build.rs, when known.
static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
  let version = env!("CARGO_PKG_VERSION");
  match (env!("GIT_HASH"), env!("GIT_DATE")) {
    ("", _) => version.to_string(),
    (hash, "") => format!("{version} ({hash})"),
    (hash, date) => format!("{version} ({hash} {date})"),
  }
});

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION.as_str(),
  about,
  styles = CUSTOM_STYLES,
  args_conflicts_with_subcommands = true,
  subcommand_negates_reqs = true,
  after_help = "Examples:
  # Check every Python file under the current directory
  ets-copyright-checker .

  # Check against a specific end year
  ets-copyright-checker --end-year 2024 src/

  # Only report missing headers, not stale years
  ets-copyright-checker --disable H102 src/

  # Machine-readable output
  ets-copyright-checker --format json src/ > results.json

  # Ignore generated files
  ets-copyright-checker --ignore \"**/_version.py\" --ignore \"docs/\" .

  # Show the header a file is expected to start with
  ets-copyright-checker --print-header
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub check_args: CheckArgs,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Check copyright headers in source files (default)
  Check(CheckArgs),
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Get the effective check arguments, whether from a subcommand or top-level
  pub fn get_check_args(self) -> CheckArgs {
    match self.command {
      Some(Command::Check(args)) => args,
      None => self.check_args,
    }
  }
}
