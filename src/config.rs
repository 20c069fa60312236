//! # Configuration Module
//!
//! Configuration support for ets-copyright-checker: the expected end year, a
//! custom header template, ignore patterns, the file extensions to check and
//! suppressed diagnostic codes.
//!
//! Configuration can be specified in a `.ets-copyright.toml` file or via the
//! `ETS_COPYRIGHT_CONFIG` environment variable.
//!
//! ```toml
//! end-year = 2024
//! template-file = "header.txt"
//! ignore = ["docs/", "**/_version.py"]
//! extensions = ["py", "pyx"]
//! disable = ["H102"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::diagnostic::DiagnosticKind;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".ets-copyright.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "ETS_COPYRIGHT_CONFIG";

/// Extensions checked when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

/// Main configuration struct.
///
/// Loaded from a `.ets-copyright.toml` file. Every field is optional; CLI
/// flags take precedence over anything set here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Expected end year of the copyright range.
  #[serde(default)]
  pub end_year: Option<i32>,

  /// Custom header template file. Relative paths are resolved against the
  /// directory of the config file when loaded through [`Config::load`].
  #[serde(default)]
  pub template_file: Option<PathBuf>,

  /// Glob patterns for files and directories to skip.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// File extensions to check, without the leading dot.
  #[serde(default)]
  pub extensions: Option<Vec<String>>,

  /// Diagnostic codes to suppress.
  #[serde(default)]
  pub disable: Vec<String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A value is out of range or malformed.
  #[error("Invalid value for '{key}': {message}")]
  InvalidValue { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    if let Some(template_file) = config.template_file.take() {
      let base = path.parent().unwrap_or_else(|| Path::new("."));
      config.template_file = Some(base.join(template_file));
    }

    Ok(config.normalize())
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - `end-year` is a four-digit year
  /// - extensions don't include the leading dot and are not empty
  /// - every disabled code is a known diagnostic code
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(year) = self.end_year {
      validate_year(year).map_err(|message| ConfigError::InvalidValue {
        key: "end-year".to_string(),
        message,
      })?;
    }

    for ext in self.extensions.iter().flatten() {
      if ext.is_empty() {
        return Err(ConfigError::InvalidValue {
          key: "extensions".to_string(),
          message: "extension cannot be empty".to_string(),
        });
      }
      if ext.starts_with('.') {
        return Err(ConfigError::InvalidValue {
          key: "extensions".to_string(),
          message: format!("extension '{ext}' should not include leading dot"),
        });
      }
    }

    for code in &self.disable {
      code.parse::<DiagnosticKind>().map_err(|e| ConfigError::InvalidValue {
        key: "disable".to_string(),
        message: e.to_string(),
      })?;
    }

    Ok(())
  }

  /// The configured extensions, or [`DEFAULT_EXTENSIONS`].
  pub fn effective_extensions(&self) -> Vec<String> {
    self
      .extensions
      .clone()
      .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
  }

  /// The disabled codes as diagnostic kinds. Unknown codes are skipped;
  /// [`validate`](Self::validate) rejects them on load.
  pub fn disabled_kinds(&self) -> Vec<DiagnosticKind> {
    self.disable.iter().filter_map(|code| code.parse().ok()).collect()
  }

  /// Lowercase extensions for case-insensitive matching, uppercase codes.
  fn normalize(self) -> Self {
    Self {
      extensions: self
        .extensions
        .map(|exts| exts.into_iter().map(|ext| ext.to_lowercase()).collect()),
      disable: self.disable.into_iter().map(|code| code.trim().to_uppercase()).collect(),
      ..self
    }
  }
}

/// Checks that a year has exactly four digits, like the header's year range.
pub fn validate_year(year: i32) -> Result<i32, String> {
  if (1000..=9999).contains(&year) {
    Ok(year)
  } else {
    Err(format!("{year} is not a four-digit year"))
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `ETS_COPYRIGHT_CONFIG` environment variable
/// 3. `.ets-copyright.toml` in the workspace root
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let workspace_config = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if workspace_config.exists() {
    verbose_log!("Using workspace config: {}", workspace_config.display());
    return Some(workspace_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `workspace_root` - The workspace root directory
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if discovery is disabled or no config
/// file is found. An explicit path that does not exist is an error.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  if let Some(path) = explicit_path
    && !path.exists()
  {
    anyhow::bail!("Config file not found: {}", path.display());
  }

  match discover_config_path(explicit_path, workspace_root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_valid_config() {
    let config_content = concat!(
      "end-year = 2024\n",
      "template-file = \"header.txt\"\n",
      "ignore = [\"docs/\", \"**/_version.py\"]\n",
      "extensions = [\"py\", \"pyx\"]\n",
      "disable = [\"H102\"]\n",
    );

    let config: Config = toml::from_str(config_content).expect("valid config should parse");

    assert_eq!(config.end_year, Some(2024));
    assert_eq!(config.template_file, Some(PathBuf::from("header.txt")));
    assert_eq!(config.ignore, vec!["docs/", "**/_version.py"]);
    assert_eq!(config.extensions, Some(vec!["py".to_string(), "pyx".to_string()]));
    assert_eq!(config.disabled_kinds(), vec![DiagnosticKind::BadCopyrightEndYear]);
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");

    assert_eq!(config, Config::default());
    assert_eq!(config.effective_extensions(), vec!["py"]);
    assert!(config.disabled_kinds().is_empty());
  }

  #[test]
  fn test_unknown_keys_are_rejected() {
    let result: Result<Config, _> = toml::from_str("end_year = 2024\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_end_year() {
    let config = Config {
      end_year: Some(24),
      ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { key, .. }) if key == "end-year"));

    let config = Config {
      end_year: Some(2024),
      ..Config::default()
    };
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_validate_leading_dot() {
    let config = Config {
      extensions: Some(vec![".py".to_string()]),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "extensions"));
  }

  #[test]
  fn test_validate_unknown_code() {
    let config = Config {
      disable: vec!["E501".to_string()],
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(err.to_string().contains("E501"));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);

    std::fs::write(
      &config_path,
      concat!(
        "template-file = \"header.txt\"\n",
        "extensions = [\"PY\"]\n",
        "disable = [\"h101\"]\n",
      ),
    )
    .expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.template_file, Some(temp_dir.path().join("header.txt")));
    assert_eq!(config.extensions, Some(vec!["py".to_string()]));
    assert_eq!(config.disable, vec!["H101"]);
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.ets-copyright.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "end-year = \n").expect("write config");

    assert!(matches!(
      Config::load(&config_path).expect_err("should fail"),
      ConfigError::ParseError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_workspace_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());

    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_disabled() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "end-year = 2020\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load should succeed");
    assert!(config.is_none());
  }

  #[test]
  fn test_load_config_missing_explicit_path_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.toml");

    assert!(load_config(Some(&missing), temp_dir.path(), false).is_err());
  }
}
