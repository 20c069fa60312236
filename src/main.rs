//! # ets-copyright-checker
//!
//! Checks that source files start with the Enthought Tool Suite copyright
//! header and that its end year is current.

mod cli;

use std::process::ExitCode;

use owo_colors::{OwoColorize, Stream};

use crate::cli::{Cli, run_check};

/// Exit status for usage and configuration errors, matching clap's own.
const USAGE_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run_check(cli.get_check_args()).await {
    Ok(code) => code,
    Err(e) => {
      eprintln!("{} {:#}", "ERROR:".if_supports_color(Stream::Stderr, |s| s.red()), e);
      ExitCode::from(USAGE_ERROR)
    }
  }
}
