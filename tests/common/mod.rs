#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use ets_copyright_checker::config::CONFIG_ENV_VAR;
use ets_copyright_checker::templates::HeaderTemplate;

/// The Enthought header for a year range, followed by a module body.
pub fn python_module(start_year: i32, end_year: i32) -> String {
  format!(
    "{}\nimport math\n",
    HeaderTemplate::enthought().render(start_year, end_year)
  )
}

/// Splits text into lines the way the processor reads them, keeping
/// terminators.
pub fn lines(text: &str) -> Vec<String> {
  text.split_inclusive('\n').map(str::to_string).collect()
}

/// Writes a file relative to `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// The checker binary, run from `dir` with colors off and no inherited
/// config.
pub fn checker_cmd(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("ets-copyright-checker")?;
  cmd
    .current_dir(dir)
    .env_remove(CONFIG_ENV_VAR)
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  Ok(cmd)
}
