//! Changelog loading.
//!
//! Each application ships a `changelog.toml` next to its config file:
//!
//! ```toml
//! [[entry]]
//! version = "0.2.0"
//! date    = "2025-06-01"
//! changes = ["Share groups", "Inline stage editing"]
//! ```
//!
//! The file is re-read on every `/changelog` request so it can be updated
//! without a restart.

use std::path::Path;

use serde::Deserialize;

use crate::Result;

/// A single released version's worth of changes.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangelogEntry {
  #[serde(default)]
  pub version: String,
  #[serde(default)]
  pub date:    String,
  #[serde(default)]
  pub changes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChangelogFile {
  #[serde(default)]
  entry: Vec<ChangelogEntry>,
}

/// Load changelog entries from a TOML file, newest first as authored.
pub fn load_changelog(path: impl AsRef<Path>) -> Result<Vec<ChangelogEntry>> {
  let text = std::fs::read_to_string(path)?;
  let file: ChangelogFile = toml::from_str(&text)?;
  Ok(file.entry)
}
