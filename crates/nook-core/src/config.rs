//! Runtime application configuration, deserialised from `config.toml`
//! (layered under `NOOK_*` environment overrides by each binary).

use std::path::PathBuf;

use serde::Deserialize;

use crate::roster::Roster;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  pub app_name:         String,
  #[serde(default)]
  pub app_version:      String,
  #[serde(default)]
  pub app_release_date: String,
  #[serde(default = "default_changelog_path")]
  pub changelog_path:   PathBuf,
  pub host:             String,
  pub port:             u16,
  pub db_path:          PathBuf,
  pub jwt_secret:       String,
  #[serde(default)]
  pub users:            Roster,
}

fn default_changelog_path() -> PathBuf {
  PathBuf::from("changelog.toml")
}

impl AppConfig {
  /// `host:port`, ready for a TCP bind.
  pub fn listen_address(&self) -> String {
    format!("{}:{}", self.host, self.port)
  }
}
