//! Error type for `nook-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("failed to create database directory {path:?}: {source}")]
  CreateDir {
    path:   PathBuf,
    source: std::io::Error,
  },

  /// A migration statement (or its bookkeeping insert) failed. All strictly
  /// earlier statements remain applied.
  #[error("migration {name} failed: {source}")]
  Migration {
    name:   String,
    source: rusqlite::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
