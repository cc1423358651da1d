//! Error types for `nook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read file: {0}")]
  Io(#[from] std::io::Error),

  #[error("failed to parse TOML: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
