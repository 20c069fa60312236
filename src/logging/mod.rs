//! # Logging Module
//!
//! Logging utilities for ets-copyright-checker:
//! - structured diagnostics through `tracing`, initialized by [`init_tracing`]
//! - verbose progress messages on stderr ([`verbose_log!`](crate::verbose_log))
//! - informational messages on stdout ([`info_log!`](crate::info_log)),
//!   silenced by quiet mode
//!
//! Verbose logs go to stderr and info logs to stdout, so findings can be
//! piped while progress stays visible.
//!
//! ## Example
//!
//! ```rust
//! use ets_copyright_checker::logging::{ColorMode, set_verbose};
//! use ets_copyright_checker::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Checking file: {}", "setup.py");
//! info_log!("Wrote report to {}", "report.json");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message in yellow when stdout supports color.
///
/// Used by the [`info_log!`](crate::info_log) macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
