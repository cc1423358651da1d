//! Error type for `nook-auth`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Unknown username or wrong password. Deliberately not distinguished.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("invalid or expired token")]
  InvalidToken,

  #[error("failed to sign token: {0}")]
  TokenSigning(#[source] jsonwebtoken::errors::Error),

  #[error("failed to hash password: {0}")]
  PasswordHash(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
