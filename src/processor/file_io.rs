//! # File I/O Module
//!
//! Reads the leading lines of a file for header checking.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

/// Longest line read in full. Longer lines are cut off and end the read.
pub const MAX_LINE_BYTES: u64 = 64 * 1024;

const BOM: char = '\u{feff}';

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads at most `max_lines` lines from the start of a file.
  ///
  /// Lines keep their terminators (`\n` or `\r\n`); the last line may have
  /// none. A leading byte order mark is dropped. Invalid UTF-8 is replaced
  /// with U+FFFD, so binary files simply fail to match a header instead of
  /// erroring. An empty file yields no lines.
  ///
  /// A line longer than [`MAX_LINE_BYTES`] is returned truncated and is the
  /// last line read.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read.
  pub async fn read_leading_lines(path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let file = tokio::fs::File::open(path)
      .await
      .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut lines = Vec::with_capacity(max_lines);
    let mut buf = Vec::new();
    while lines.len() < max_lines {
      buf.clear();
      let read = (&mut reader)
        .take(MAX_LINE_BYTES)
        .read_until(b'\n', &mut buf)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
      if read == 0 {
        break;
      }

      let mut line = String::from_utf8_lossy(&buf).into_owned();
      if lines.is_empty() && line.starts_with(BOM) {
        line.drain(..BOM.len_utf8());
      }
      lines.push(line);

      if read as u64 == MAX_LINE_BYTES && buf.last() != Some(&b'\n') {
        break;
      }
    }

    Ok(lines)
  }
}
