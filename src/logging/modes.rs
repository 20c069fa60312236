use std::io::IsTerminal;
use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by the [`verbose_log!`](crate::verbose_log) and
/// [`info_log!`](crate::info_log) macros.
///
/// Starts as `Normal` until [`set_verbose`] or [`set_quiet`] is called.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the color mode globally.
  ///
  /// `Auto` leaves the decision to owo-colors' per-stream TTY detection.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

impl std::fmt::Display for ColorMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      ColorMode::Auto => "auto",
      ColorMode::Never => "never",
      ColorMode::Always => "always",
    };
    f.write_str(name)
  }
}

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `-q` maps to `error`, no flag to
/// `warn`, and `-v`, `-vv`, `-vvv` to `info`, `debug` and `trace`. Logs go to
/// stderr so stdout stays parseable.
///
/// `colors` decides whether levels are styled with ANSI codes; `Auto` styles
/// them only when stderr is a terminal.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(quiet: bool, verbosity: u8, colors: ColorMode) {
  let default_level = if quiet {
    "error"
  } else {
    match verbosity {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  let ansi = match colors {
    ColorMode::Auto => std::io::stderr().is_terminal(),
    ColorMode::Never => false,
    ColorMode::Always => true,
  };

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(ansi)
    .with_target(false)
    .without_time()
    .try_init();
}

/// Enables verbose output.
///
/// When verbose logging is enabled, the [`verbose_log!`](crate::verbose_log)
/// macro writes to stderr.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Enables quiet output: only findings and errors are printed.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
pub fn is_verbose() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Quiet)
}
